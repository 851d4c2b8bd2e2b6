// src/domain/analytics/user_agent.rs
use super::entity::DeviceType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentInfo {
    pub device_type: DeviceType,
    pub browser: &'static str,
    pub os: &'static str,
}

pub fn classify_user_agent(user_agent: &str) -> UserAgentInfo {
    let ua = user_agent.to_ascii_lowercase();

    let device_type = if ua.contains("ipad")
        || ua.contains("tablet")
        || (ua.contains("android") && !ua.contains("mobile"))
    {
        DeviceType::Tablet
    } else if ua.contains("mobi") || ua.contains("iphone") || ua.contains("android") {
        DeviceType::Mobile
    } else {
        DeviceType::Desktop
    };

    // Order matters: Edge and Opera also advertise Chrome, Chrome advertises Safari.
    let browser = if ua.contains("edg/") || ua.contains("edge/") {
        "Edge"
    } else if ua.contains("opr/") || ua.contains("opera") {
        "Opera"
    } else if ua.contains("chrome/") || ua.contains("crios/") {
        "Chrome"
    } else if ua.contains("firefox/") || ua.contains("fxios/") {
        "Firefox"
    } else if ua.contains("safari/") {
        "Safari"
    } else {
        "Other"
    };

    let os = if ua.contains("windows") {
        "Windows"
    } else if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
        "iOS"
    } else if ua.contains("android") {
        "Android"
    } else if ua.contains("mac os") || ua.contains("macintosh") {
        "macOS"
    } else if ua.contains("linux") || ua.contains("x11") {
        "Linux"
    } else {
        "Other"
    };

    UserAgentInfo {
        device_type,
        browser,
        os,
    }
}
