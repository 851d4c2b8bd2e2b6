// src/application/analytics.rs
//! URL helpers shared by the redirect and verify flows.

use crate::domain::link::UtmParams;
use reqwest::Url;

/// Reduce a `Referer` header to the referring host, e.g.
/// `https://www.google.com/search?q=x` becomes `google.com`.
pub fn normalize_referrer(referrer: Option<&str>) -> Option<String> {
    let raw = referrer.map(str::trim).filter(|r| !r.is_empty())?;
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    if host.is_empty() {
        return None;
    }
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host,
    })
}

/// Loopback visitors are reported as `Local` without a GeoIP lookup.
pub fn local_country(ip: &str) -> Option<&'static str> {
    matches!(ip.trim(), "127.0.0.1" | "::1" | "localhost").then_some("Local")
}

/// Append the link's UTM parameters to its destination, replacing any
/// existing parameters with the same name and keeping everything else.
pub fn append_utm(destination: &str, utm: &UtmParams) -> String {
    let pairs = utm.pairs();
    if pairs.is_empty() {
        return destination.to_string();
    }
    let Ok(mut url) = Url::parse(destination) else {
        return destination.to_string();
    };

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !pairs.iter().any(|(utm_key, _)| key.as_ref() == *utm_key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .extend_pairs(pairs);
    url.into()
}
