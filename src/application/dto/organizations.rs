use crate::domain::{
    organization::{
        Invite, InviteStatus, MemberRole, Membership, Organization, OrganizationStats, Plan,
    },
    user::User,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub plan: Plan,
    pub is_active: bool,
    pub is_link_privacy_enabled: bool,
    pub allow_member_delete: bool,
    pub allow_member_edit: bool,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationDto {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id.into(),
            name: org.name.into(),
            slug: org.slug.into(),
            plan: org.plan,
            is_active: org.is_active,
            is_link_privacy_enabled: org.is_link_privacy_enabled,
            allow_member_delete: org.allow_member_delete,
            allow_member_edit: org.allow_member_edit,
            created_at: org.created_at,
        }
    }
}

/// One of the caller's memberships, as listed by the org switcher.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MembershipSummaryDto {
    pub org_id: i64,
    pub org_name: String,
    pub org_slug: String,
    pub role: MemberRole,
    #[serde(with = "serde_time")]
    pub joined_at: DateTime<Utc>,
}

impl MembershipSummaryDto {
    pub fn from_parts(membership: &Membership, org: &Organization) -> Self {
        Self {
            org_id: org.id.into(),
            org_name: org.name.to_string(),
            org_slug: org.slug.to_string(),
            role: membership.role,
            joined_at: membership.joined_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MembershipDto {
    pub user_id: i64,
    pub org_id: i64,
    pub role: MemberRole,
    #[serde(with = "serde_time")]
    pub joined_at: DateTime<Utc>,
}

impl From<Membership> for MembershipDto {
    fn from(m: Membership) -> Self {
        Self {
            user_id: m.user_id.into(),
            org_id: m.org_id.into(),
            role: m.role,
            joined_at: m.joined_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberDto {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: MemberRole,
    #[serde(with = "serde_time")]
    pub joined_at: DateTime<Utc>,
}

impl MemberDto {
    pub fn from_parts(membership: Membership, user: User) -> Self {
        Self {
            user_id: membership.user_id.into(),
            username: user.username.into(),
            email: user.email.into(),
            full_name: user.full_name,
            role: membership.role,
            joined_at: membership.joined_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InviteDto {
    pub id: i64,
    pub org_id: i64,
    pub invited_by: i64,
    pub email: String,
    pub role: MemberRole,
    pub token: String,
    pub status: InviteStatus,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub expires_at: DateTime<Utc>,
}

impl From<Invite> for InviteDto {
    fn from(invite: Invite) -> Self {
        Self {
            id: invite.id.into(),
            org_id: invite.org_id.into(),
            invited_by: invite.invited_by.into(),
            email: invite.email.into(),
            role: invite.role,
            token: invite.token,
            status: invite.status,
            created_at: invite.created_at,
            expires_at: invite.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationStatsDto {
    pub org_id: i64,
    pub member_count: i64,
    pub link_count: i64,
    pub active_links: i64,
    pub campaign_count: i64,
    pub total_clicks: i64,
}

impl OrganizationStatsDto {
    pub fn from_parts(org: &Organization, stats: OrganizationStats) -> Self {
        Self {
            org_id: org.id.into(),
            member_count: stats.member_count,
            link_count: stats.link_count,
            active_links: stats.active_links,
            campaign_count: stats.campaign_count,
            total_clicks: stats.total_clicks,
        }
    }
}
