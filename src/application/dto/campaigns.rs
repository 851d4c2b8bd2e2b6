use crate::domain::campaign::Campaign;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CampaignDto {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub owner_id: i64,
    pub org_id: i64,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<Campaign> for CampaignDto {
    fn from(c: Campaign) -> Self {
        Self {
            id: c.id.into(),
            name: c.name.into(),
            color: c.color.into(),
            owner_id: c.owner_id.into(),
            org_id: c.org_id.into(),
            created_at: c.created_at,
        }
    }
}
