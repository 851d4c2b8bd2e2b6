use crate::domain::audit::AuditLog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogDto {
    pub id: i64,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub org_id: Option<i64>,
    pub action: String,
    pub target_type: String,
    pub target_id: Option<i64>,
    #[schema(value_type = Object)]
    pub details: Option<serde_json::Value>,
    #[serde(with = "serde_time")]
    pub timestamp: DateTime<Utc>,
}

impl AuditLogDto {
    pub fn from_parts(log: AuditLog, username: Option<String>) -> Self {
        Self {
            id: log.id,
            user_id: log.user_id.map(Into::into),
            username,
            org_id: log.org_id.map(Into::into),
            action: log.action,
            target_type: log.target_type,
            target_id: log.target_id,
            details: log.details,
            timestamp: log.timestamp,
        }
    }
}
