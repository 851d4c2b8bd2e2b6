use crate::domain::user::{AccessRequestStatus, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_approved: bool,
    pub request_status: AccessRequestStatus,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            email: user.email.into(),
            username: user.username.into(),
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            is_approved: user.is_approved,
            request_status: user.request_status,
            created_at: user.created_at,
        }
    }
}
