// src/domain/user/entity.rs
use crate::domain::user::value_objects::{
    AccessRequestStatus, Email, PasswordHash, UserId, Username,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    /// Subject id at the external identity provider.
    pub external_id: Option<String>,
    /// `None` for accounts that only sign in through the identity provider.
    pub password_hash: Option<PasswordHash>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_approved: bool,
    pub request_status: AccessRequestStatus,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Approved users and superusers may create and modify links.
    pub fn can_manage_links(&self) -> bool {
        self.is_approved || self.is_superuser
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub external_id: Option<String>,
    pub password_hash: Option<PasswordHash>,
    pub is_superuser: bool,
    pub is_approved: bool,
    pub request_status: AccessRequestStatus,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        username: Username,
        email: Email,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            email,
            full_name: None,
            avatar_url: None,
            external_id: None,
            password_hash: Some(password_hash),
            is_superuser: false,
            is_approved: false,
            request_status: AccessRequestStatus::None,
            created_at,
        }
    }

    /// An account known through the identity provider, without a local password.
    pub fn external(
        external_id: impl Into<String>,
        username: Username,
        email: Email,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            email,
            full_name: None,
            avatar_url: None,
            external_id: Some(external_id.into()),
            password_hash: None,
            is_superuser: false,
            is_approved: false,
            request_status: AccessRequestStatus::None,
            created_at,
        }
    }

    pub fn with_avatar_url(mut self, avatar_url: Option<String>) -> Self {
        self.avatar_url = avatar_url.filter(|url| !url.trim().is_empty());
        self
    }

    pub fn with_full_name(mut self, full_name: Option<String>) -> Self {
        self.full_name = full_name.filter(|name| !name.trim().is_empty());
        self
    }

    /// The first account on a fresh install administers the platform.
    pub fn into_bootstrap_superuser(mut self) -> Self {
        self.is_superuser = true;
        self.is_approved = true;
        self.request_status = AccessRequestStatus::Approved;
        self
    }
}

/// Identity details refreshed from the identity provider on every sign-in.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub external_id: String,
    pub username: Username,
    pub email: Email,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub id: UserId,
    pub is_active: Option<bool>,
    pub is_approved: Option<bool>,
    pub request_status: Option<AccessRequestStatus>,
    pub profile: Option<UserProfile>,
}

impl UserUpdate {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            is_active: None,
            is_approved: None,
            request_status: None,
            profile: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.is_active.is_none()
            && self.is_approved.is_none()
            && self.request_status.is_none()
            && self.profile.is_none()
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn with_is_approved(mut self, is_approved: bool) -> Self {
        self.is_approved = Some(is_approved);
        self
    }

    pub fn with_request_status(mut self, status: AccessRequestStatus) -> Self {
        self.request_status = Some(status);
        self
    }
}
