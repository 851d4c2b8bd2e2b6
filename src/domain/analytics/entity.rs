// src/domain/analytics/entity.rs
use crate::domain::link::LinkId;
use chrono::{DateTime, NaiveDate, Utc};
use std::{fmt, str::FromStr};

use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceType {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Self::Mobile),
            "tablet" => Ok(Self::Tablet),
            "desktop" => Ok(Self::Desktop),
            other => Err(DomainError::Validation(format!(
                "unknown device type '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub id: i64,
    pub link_id: LinkId,
    pub timestamp: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub country_code: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub device_type: DeviceType,
    pub browser: String,
    pub os: String,
}

#[derive(Debug, Clone)]
pub struct NewClickEvent {
    pub link_id: LinkId,
    pub timestamp: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub country_code: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub device_type: DeviceType,
    pub browser: String,
    pub os: String,
}

/// Click count grouped by an optional label (country, referrer, device).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountBucket {
    pub label: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}
