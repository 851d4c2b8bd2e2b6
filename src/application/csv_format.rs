// src/application/csv_format.rs
//! CSV layout shared by link export and import.

use crate::{
    application::{
        commands::links::LinkInput,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{campaign::Campaign, link::Link},
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One exported link, columns in file order.
#[derive(Debug, Serialize)]
pub struct ExportRow {
    pub short_code: String,
    pub original_url: String,
    pub title: String,
    pub tags: String,
    pub is_active: bool,
    pub redirect_type: i32,
    pub campaign_name: String,
    pub require_login: bool,
    pub allowed_emails: String,
    pub expires_at: String,
    pub clicks: i64,
    pub created_at: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_term: String,
    pub utm_content: String,
}

impl ExportRow {
    pub fn from_link(link: Link, campaign_name: Option<&str>) -> Self {
        let timestamp = |at: DateTime<Utc>| at.format(NAIVE_TIMESTAMP_FORMAT).to_string();
        Self {
            short_code: link.short_code.into(),
            original_url: link.original_url.into(),
            title: link.title.unwrap_or_default(),
            tags: link.tags.map(String::from).unwrap_or_default(),
            is_active: link.is_active,
            redirect_type: link.redirect_type.code(),
            campaign_name: campaign_name.unwrap_or_default().to_string(),
            require_login: link.require_login,
            allowed_emails: link
                .allowed_emails
                .map(|emails| emails.as_slice().join(","))
                .unwrap_or_default(),
            expires_at: link.expires_at.map(timestamp).unwrap_or_default(),
            clicks: link.clicks,
            created_at: timestamp(link.created_at),
            utm_source: link.utm.source.unwrap_or_default(),
            utm_medium: link.utm.medium.unwrap_or_default(),
            utm_campaign: link.utm.campaign.unwrap_or_default(),
            utm_term: link.utm.term.unwrap_or_default(),
            utm_content: link.utm.content.unwrap_or_default(),
        }
    }
}

pub fn write_rows(rows: Vec<ExportRow>) -> ApplicationResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        writer
            .write_record(EXPORT_HEADERS)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
    }
    for row in rows {
        writer
            .serialize(row)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ApplicationError::infrastructure(err.to_string()))
}

const EXPORT_HEADERS: [&str; 17] = [
    "short_code",
    "original_url",
    "title",
    "tags",
    "is_active",
    "redirect_type",
    "campaign_name",
    "require_login",
    "allowed_emails",
    "expires_at",
    "clicks",
    "created_at",
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
];

/// An imported row; columns are matched by header name and all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImportRow {
    pub short_code: Option<String>,
    pub original_url: Option<String>,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub is_active: Option<String>,
    pub redirect_type: Option<String>,
    pub campaign_name: Option<String>,
    pub require_login: Option<String>,
    pub allowed_emails: Option<String>,
    pub expires_at: Option<String>,
    pub track_activity: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
}

/// A data row with its 1-based line number in the file (the header is row 1).
#[derive(Debug)]
pub struct NumberedRow {
    pub number: usize,
    pub row: Result<ImportRow, String>,
}

pub fn read_rows(content: &[u8]) -> ApplicationResult<Vec<NumberedRow>> {
    let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content);
    reader
        .headers()
        .map_err(|err| ApplicationError::validation(format!("Invalid CSV: {err}")))?;

    Ok(reader
        .deserialize::<ImportRow>()
        .enumerate()
        .map(|(index, row)| NumberedRow {
            number: index + 2,
            row: row.map_err(|err| err.to_string()),
        })
        .collect())
}

impl ImportRow {
    pub fn original_url(&self) -> Option<&str> {
        self.original_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Convert to link input. Unknown campaign names are ignored.
    pub fn into_input(self, campaigns: &[Campaign]) -> Result<LinkInput, String> {
        let campaign_id = self.campaign_name.as_deref().and_then(|name| {
            campaigns
                .iter()
                .find(|c| c.name.as_str().eq_ignore_ascii_case(name))
                .map(|c| i64::from(c.id))
        });
        let redirect_type = self
            .redirect_type
            .as_deref()
            .map(|raw| {
                raw.parse::<i32>()
                    .map_err(|_| format!("invalid redirect_type '{raw}'"))
            })
            .transpose()?;

        Ok(LinkInput {
            original_url: self.original_url,
            short_code: self.short_code,
            title: Some(self.title),
            tags: Some(self.tags),
            campaign_id: Some(campaign_id),
            is_active: parse_optional_bool(self.is_active.as_deref())?,
            expires_at: Some(
                self.expires_at
                    .as_deref()
                    .map(parse_timestamp)
                    .transpose()?,
            ),
            password: None,
            require_login: parse_optional_bool(self.require_login.as_deref())?,
            allowed_emails: Some(self.allowed_emails.map(|raw| {
                raw.split(',')
                    .map(|email| email.trim().to_string())
                    .collect()
            })),
            redirect_type,
            track_activity: parse_optional_bool(self.track_activity.as_deref())?,
            utm_source: Some(self.utm_source),
            utm_medium: Some(self.utm_medium),
            utm_campaign: Some(self.utm_campaign),
            utm_term: Some(self.utm_term),
            utm_content: Some(self.utm_content),
        })
    }
}

pub fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(format!("invalid boolean '{other}'")),
    }
}

fn parse_optional_bool(raw: Option<&str>) -> Result<Option<bool>, String> {
    raw.filter(|v| !v.is_empty()).map(parse_bool).transpose()
}

/// RFC 3339, or `YYYY-mm-dd HH:MM:SS` read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, NAIVE_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("invalid expires_at '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn booleans_accept_common_spellings() {
        for truthy in ["true", "1", "YES"] {
            assert_eq!(parse_bool(truthy), Ok(true));
        }
        for falsy in ["false", "0", "no"] {
            assert_eq!(parse_bool(falsy), Ok(false));
        }
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn timestamps_accept_rfc3339_and_plain_utc() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-03-01T12:30:00Z"), Ok(expected));
        assert_eq!(parse_timestamp("2025-03-01T14:30:00+02:00"), Ok(expected));
        assert_eq!(parse_timestamp("2025-03-01 12:30:00"), Ok(expected));
        assert!(parse_timestamp("March 1st").is_err());
    }

    #[test]
    fn rows_are_read_by_header_and_numbered_from_two() {
        let csv = "\u{feff}title,original_url,is_active\nHome,https://example.com,yes\n,,\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 2);
        assert_eq!(rows[1].number, 3);

        let first = rows[0].row.as_ref().unwrap();
        assert_eq!(first.original_url(), Some("https://example.com"));
        assert_eq!(first.title.as_deref(), Some("Home"));
        assert!(rows[1].row.as_ref().unwrap().original_url().is_none());
    }

    #[test]
    fn invalid_booleans_reject_the_row() {
        let row = ImportRow {
            original_url: Some("https://example.com".into()),
            require_login: Some("sometimes".into()),
            ..ImportRow::default()
        };
        assert_eq!(
            row.into_input(&[]).unwrap_err(),
            "invalid boolean 'sometimes'"
        );
    }

    #[test]
    fn empty_export_still_has_headers() {
        let csv = write_rows(Vec::new()).unwrap();
        assert!(csv.starts_with("short_code,original_url,title,tags,is_active"));
        assert!(csv.trim_end().ends_with("utm_content"));
    }
}
