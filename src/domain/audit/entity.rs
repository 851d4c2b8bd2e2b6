// src/domain/audit/entity.rs
use crate::domain::{organization::OrganizationId, user::UserId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Import,
    Invite,
    Revoke,
    Remove,
    ChangeRole,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Import => "import",
            Self::Invite => "invite",
            Self::Revoke => "revoke",
            Self::Remove => "remove",
            Self::ChangeRole => "change_role",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditTarget {
    Link,
    Campaign,
    Organization,
    Member,
    Invite,
}

impl AuditTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Campaign => "campaign",
            Self::Organization => "organization",
            Self::Member => "member",
            Self::Invite => "invite",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditLog {
    pub id: i64,
    pub user_id: Option<UserId>,
    pub org_id: Option<OrganizationId>,
    pub action: String,
    pub target_type: String,
    pub target_id: Option<i64>,
    pub details: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub user_id: UserId,
    pub org_id: OrganizationId,
    pub action: AuditAction,
    pub target_type: AuditTarget,
    pub target_id: Option<i64>,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub action: Option<String>,
    pub target_type: Option<String>,
    /// Restricts entries to those written by one user.
    pub user_id: Option<UserId>,
}

impl AuditFilter {
    pub fn matches(&self, log: &AuditLog) -> bool {
        self.action.as_deref().is_none_or(|a| log.action == a)
            && self
                .target_type
                .as_deref()
                .is_none_or(|t| log.target_type == t)
            && self.user_id.is_none_or(|u| log.user_id == Some(u))
    }
}
