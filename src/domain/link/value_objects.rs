// src/domain/link/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

pub const SHORT_CODE_MAX_LEN: usize = 64;
const URL_MAX_LEN: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub i64);

impl LinkId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("link id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<LinkId> for i64 {
    fn from(value: LinkId) -> Self {
        value.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::Validation("short code cannot be empty".into()));
        }
        if value.len() > SHORT_CODE_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "short code must be at most {SHORT_CODE_MAX_LEN} characters"
            )));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        {
            return Err(DomainError::Validation(
                "short code may only contain letters, digits, '-' and '_'".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ShortCode> for String {
    fn from(value: ShortCode) -> Self {
        value.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationUrl(String);

impl DestinationUrl {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::Validation("original_url cannot be empty".into()));
        }
        if value.len() > URL_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "original_url must be at most {URL_MAX_LEN} characters"
            )));
        }
        let lower = value.to_ascii_lowercase();
        let rest = lower
            .strip_prefix("https://")
            .or_else(|| lower.strip_prefix("http://"))
            .ok_or_else(|| {
                DomainError::Validation("original_url must start with http:// or https://".into())
            })?;
        if rest.is_empty() || rest.starts_with('/') || value.chars().any(char::is_whitespace) {
            return Err(DomainError::Validation(format!(
                "'{value}' is not a valid URL"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first `max_chars` characters, used in audit summaries.
    pub fn preview(&self, max_chars: usize) -> String {
        self.0.chars().take(max_chars).collect()
    }
}

impl From<DestinationUrl> for String {
    fn from(value: DestinationUrl) -> Self {
        value.0
    }
}

impl fmt::Display for DestinationUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectType {
    Permanent,
    #[default]
    Temporary,
}

impl RedirectType {
    pub fn from_code(code: i32) -> DomainResult<Self> {
        match code {
            301 => Ok(Self::Permanent),
            302 => Ok(Self::Temporary),
            other => Err(DomainError::Validation(format!(
                "redirect_type must be 301 or 302, got {other}"
            ))),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Permanent => 301,
            Self::Temporary => 302,
        }
    }
}

impl fmt::Display for RedirectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Comma separated labels, trimmed and de-duplicated in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tags(String);

impl Tags {
    pub fn parse(raw: &str) -> Option<Self> {
        let mut seen: Vec<&str> = Vec::new();
        for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if !seen.iter().any(|existing| existing.eq_ignore_ascii_case(tag)) {
                seen.push(tag);
            }
        }
        if seen.is_empty() {
            None
        } else {
            Some(Self(seen.join(",")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.split(',')
    }
}

impl From<Tags> for String {
    fn from(value: Tags) -> Self {
        value.0
    }
}

/// Email allowlist for login-protected links.
///
/// Stored as a JSON array; legacy rows may hold a comma separated string, so
/// both encodings are accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedEmails(Vec<String>);

impl AllowedEmails {
    pub fn from_list<I, S>(emails: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for email in emails {
            let email = email.as_ref().trim().to_lowercase();
            if !email.is_empty() && !normalized.contains(&email) {
                normalized.push(email);
            }
        }
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn parse_stored(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match serde_json::from_str::<Vec<String>>(trimmed) {
            Ok(list) => Self::from_list(list),
            Err(_) => Self::from_list(trimmed.split(',')),
        }
    }

    pub fn to_stored(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| self.0.join(","))
    }

    pub fn permits(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.0.iter().any(|allowed| *allowed == email)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtmParams {
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub term: Option<String>,
    pub content: Option<String>,
}

impl UtmParams {
    /// Non-empty parameters in canonical order.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("utm_source", &self.source),
            ("utm_medium", &self.medium),
            ("utm_campaign", &self.campaign),
            ("utm_term", &self.term),
            ("utm_content", &self.content),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }
}
