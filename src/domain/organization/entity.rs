// src/domain/organization/entity.rs
use super::value_objects::{
    InviteId, InviteStatus, MemberRole, OrganizationId, OrganizationName, OrganizationSlug, Plan,
};
use crate::domain::user::{Email, UserId};
use chrono::{DateTime, Duration, Utc};

/// How long an invite token stays redeemable.
pub const INVITE_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: OrganizationName,
    pub slug: OrganizationSlug,
    pub plan: Plan,
    pub is_active: bool,
    pub is_link_privacy_enabled: bool,
    pub allow_member_delete: bool,
    pub allow_member_edit: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrganization {
    pub name: OrganizationName,
    pub slug: OrganizationSlug,
    pub plan: Plan,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OrganizationUpdate {
    pub id: OrganizationId,
    pub name: Option<OrganizationName>,
    pub slug: Option<OrganizationSlug>,
    pub is_link_privacy_enabled: Option<bool>,
    pub allow_member_delete: Option<bool>,
    pub allow_member_edit: Option<bool>,
}

impl OrganizationUpdate {
    pub fn new(id: OrganizationId) -> Self {
        Self {
            id,
            name: None,
            slug: None,
            is_link_privacy_enabled: None,
            allow_member_delete: None,
            allow_member_edit: None,
        }
    }

    pub fn with_name(mut self, name: OrganizationName, slug: OrganizationSlug) -> Self {
        self.name = Some(name);
        self.slug = Some(slug);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.is_link_privacy_enabled.is_none()
            && self.allow_member_delete.is_none()
            && self.allow_member_edit.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct Membership {
    pub user_id: UserId,
    pub org_id: OrganizationId,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationStats {
    pub member_count: i64,
    pub link_count: i64,
    pub active_links: i64,
    pub campaign_count: i64,
    pub total_clicks: i64,
}

#[derive(Debug, Clone)]
pub struct Invite {
    pub id: InviteId,
    pub org_id: OrganizationId,
    pub invited_by: UserId,
    pub email: Email,
    pub role: MemberRole,
    pub token: String,
    pub status: InviteStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Invite {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[derive(Debug, Clone)]
pub struct NewInvite {
    pub org_id: OrganizationId,
    pub invited_by: UserId,
    pub email: Email,
    pub role: MemberRole,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewInvite {
    pub fn new(
        org_id: OrganizationId,
        invited_by: UserId,
        email: Email,
        role: MemberRole,
        token: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            org_id,
            invited_by,
            email,
            role,
            token,
            created_at,
            expires_at: created_at + Duration::days(INVITE_TTL_DAYS),
        }
    }
}
