use crate::domain::{
    analytics::{CountBucket, DailyCount},
    link::Link,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkDto {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub owner_id: i64,
    pub org_id: i64,
    pub campaign_id: Option<i64>,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub is_active: bool,
    pub clicks: i64,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time::option")]
    pub expires_at: Option<DateTime<Utc>>,
    pub has_password: bool,
    pub require_login: bool,
    pub allowed_emails: Vec<String>,
    pub redirect_type: i32,
    pub track_activity: bool,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
}

impl From<Link> for LinkDto {
    fn from(link: Link) -> Self {
        Self {
            id: link.id.into(),
            has_password: link.password_hash.is_some(),
            short_code: link.short_code.into(),
            original_url: link.original_url.into(),
            owner_id: link.owner_id.into(),
            org_id: link.org_id.into(),
            campaign_id: link.campaign_id.map(Into::into),
            title: link.title,
            tags: link.tags.map(Into::into),
            is_active: link.is_active,
            clicks: link.clicks,
            created_at: link.created_at,
            expires_at: link.expires_at,
            require_login: link.require_login,
            allowed_emails: link
                .allowed_emails
                .map(|emails| emails.as_slice().to_vec())
                .unwrap_or_default(),
            redirect_type: link.redirect_type.code(),
            track_activity: link.track_activity,
            utm_source: link.utm.source,
            utm_medium: link.utm.medium,
            utm_campaign: link.utm.campaign,
            utm_term: link.utm.term,
            utm_content: link.utm.content,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyClicksDto {
    pub date: String,
    pub count: i64,
}

impl From<DailyCount> for DailyClicksDto {
    fn from(value: DailyCount) -> Self {
        Self {
            date: value.date.format("%Y-%m-%d").to_string(),
            count: value.count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountryCountDto {
    pub country: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReferrerCountDto {
    pub referrer: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeviceCountDto {
    pub device: String,
    pub count: i64,
}

fn label_or(bucket: CountBucket, fallback: &str) -> (String, i64) {
    let label = bucket
        .label
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    (label, bucket.count)
}

impl CountryCountDto {
    pub fn from_bucket(bucket: CountBucket) -> Self {
        let (country, count) = label_or(bucket, "Unknown");
        Self { country, count }
    }
}

impl ReferrerCountDto {
    pub fn from_bucket(bucket: CountBucket) -> Self {
        let (referrer, count) = label_or(bucket, "Direct");
        Self { referrer, count }
    }
}

impl DeviceCountDto {
    pub fn from_bucket(bucket: CountBucket) -> Self {
        let (device, count) = label_or(bucket, "Unknown");
        Self { device, count }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkStatsDto {
    #[serde(flatten)]
    pub link: LinkDto,
    pub clicks_over_time: Vec<DailyClicksDto>,
    pub top_countries: Vec<CountryCountDto>,
    pub top_referrers: Vec<ReferrerCountDto>,
    pub device_breakdown: Vec<DeviceCountDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifiedLinkDto {
    pub original_url: String,
}
