// src/domain/campaign/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CampaignId(pub i64);

impl CampaignId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("campaign id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<CampaignId> for i64 {
    fn from(value: CampaignId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignName(String);

impl CampaignName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::Validation("campaign name cannot be empty".into()));
        }
        if value.chars().count() > 100 {
            return Err(DomainError::Validation(
                "campaign name must be at most 100 characters".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<CampaignName> for String {
    fn from(value: CampaignName) -> Self {
        value.0
    }
}

impl fmt::Display for CampaignName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `#RRGGBB` hex color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignColor(String);

impl CampaignColor {
    pub const DEFAULT: &'static str = "#3B82F6";

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        let valid = value.len() == 7
            && value.starts_with('#')
            && value[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(DomainError::Validation(format!(
                "color '{value}' must be a #RRGGBB hex value"
            )));
        }
        Ok(Self(value.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CampaignColor {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl From<CampaignColor> for String {
    fn from(value: CampaignColor) -> Self {
        value.0
    }
}
