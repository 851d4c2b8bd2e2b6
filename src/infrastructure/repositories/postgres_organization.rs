// src/infrastructure/repositories/postgres_organization.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::organization::{
    Invite, InviteId, InviteRepository, InviteStatus, MemberRole, Membership,
    MembershipRepository, NewInvite, NewOrganization, Organization, OrganizationId,
    OrganizationName, OrganizationRepository, OrganizationSlug, OrganizationStats,
    OrganizationUpdate,
};
use crate::domain::user::{Email, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

pub(super) const ORG_COLUMNS: &str = "id, name, slug, plan, is_active, is_link_privacy_enabled, \
     allow_member_delete, allow_member_edit, created_at";

const INVITE_COLUMNS: &str =
    "id, org_id, invited_by, email, role, token, status, created_at, expires_at";

#[derive(Clone)]
pub struct PostgresOrganizationRepository {
    pool: PgPool,
}

impl PostgresOrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct OrganizationRow {
    id: i64,
    name: String,
    slug: String,
    plan: String,
    is_active: bool,
    is_link_privacy_enabled: bool,
    allow_member_delete: bool,
    allow_member_edit: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrganizationRow> for Organization {
    type Error = DomainError;

    fn try_from(row: OrganizationRow) -> Result<Self, Self::Error> {
        Ok(Organization {
            id: OrganizationId::new(row.id)?,
            name: OrganizationName::new(row.name)?,
            slug: OrganizationSlug::new(row.slug)?,
            plan: row.plan.parse()?,
            is_active: row.is_active,
            is_link_privacy_enabled: row.is_link_privacy_enabled,
            allow_member_delete: row.allow_member_delete,
            allow_member_edit: row.allow_member_edit,
            created_at: row.created_at,
        })
    }
}

fn into_organizations(rows: Vec<OrganizationRow>) -> DomainResult<Vec<Organization>> {
    rows.into_iter().map(Organization::try_from).collect()
}

#[derive(Debug, FromRow)]
struct StatsRow {
    member_count: i64,
    link_count: i64,
    active_links: i64,
    campaign_count: i64,
    total_clicks: i64,
}

#[async_trait]
impl OrganizationRepository for PostgresOrganizationRepository {
    async fn insert(&self, new_org: NewOrganization) -> DomainResult<Organization> {
        let sql = format!(
            "INSERT INTO organizations (name, slug, plan, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {ORG_COLUMNS}"
        );
        let row = sqlx::query_as::<_, OrganizationRow>(&sql)
            .bind(new_org.name.as_str())
            .bind(new_org.slug.as_str())
            .bind(new_org.plan.as_str())
            .bind(new_org.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Organization::try_from(row)
    }

    async fn find_by_id(&self, id: OrganizationId) -> DomainResult<Option<Organization>> {
        let sql = format!("SELECT {ORG_COLUMNS} FROM organizations WHERE id = $1");
        let row = sqlx::query_as::<_, OrganizationRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.map(Organization::try_from).transpose()
    }

    async fn slug_exists(&self, slug: &OrganizationSlug) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM organizations WHERE slug = $1)")
            .bind(slug.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn update(&self, update: OrganizationUpdate) -> DomainResult<Organization> {
        if update.is_empty() {
            return self
                .find_by_id(update.id)
                .await?
                .ok_or_else(|| DomainError::NotFound("Organization not found".into()));
        }

        let OrganizationUpdate {
            id,
            name,
            slug,
            is_link_privacy_enabled,
            allow_member_delete,
            allow_member_edit,
        } = update;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE organizations SET ");
        let mut fields = builder.separated(", ");
        if let Some(name) = name {
            fields.push("name = ").push_bind_unseparated(String::from(name));
        }
        if let Some(slug) = slug {
            fields.push("slug = ").push_bind_unseparated(String::from(slug));
        }
        if let Some(flag) = is_link_privacy_enabled {
            fields
                .push("is_link_privacy_enabled = ")
                .push_bind_unseparated(flag);
        }
        if let Some(flag) = allow_member_delete {
            fields.push("allow_member_delete = ").push_bind_unseparated(flag);
        }
        if let Some(flag) = allow_member_edit {
            fields.push("allow_member_edit = ").push_bind_unseparated(flag);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(format!(" RETURNING {ORG_COLUMNS}"));

        let row = builder
            .build_query_as::<OrganizationRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("Organization not found".into()))?;
        Organization::try_from(row)
    }

    async fn list_all(&self) -> DomainResult<Vec<Organization>> {
        let sql = format!("SELECT {ORG_COLUMNS} FROM organizations ORDER BY id");
        let rows = sqlx::query_as::<_, OrganizationRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        into_organizations(rows)
    }

    async fn list_for_user(&self, user_id: UserId) -> DomainResult<Vec<Organization>> {
        let sql = format!(
            "SELECT {} FROM organizations o
             JOIN memberships m ON m.org_id = o.id
             WHERE m.user_id = $1
             ORDER BY m.joined_at, o.id",
            ORG_COLUMNS
                .split(", ")
                .map(|column| format!("o.{column}"))
                .collect::<Vec<_>>()
                .join(", ")
        );
        let rows = sqlx::query_as::<_, OrganizationRow>(&sql)
            .bind(i64::from(user_id))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        into_organizations(rows)
    }

    async fn find_bootstrap(&self) -> DomainResult<Option<Organization>> {
        let sql = format!("SELECT {ORG_COLUMNS} FROM organizations ORDER BY id LIMIT 1");
        let row = sqlx::query_as::<_, OrganizationRow>(&sql)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.map(Organization::try_from).transpose()
    }

    async fn stats(&self, id: OrganizationId) -> DomainResult<OrganizationStats> {
        let row = sqlx::query_as::<_, StatsRow>(
            r"SELECT
                (SELECT COUNT(1) FROM memberships WHERE org_id = $1) AS member_count,
                (SELECT COUNT(1) FROM links WHERE org_id = $1 AND NOT is_deleted) AS link_count,
                (SELECT COUNT(1) FROM links
                    WHERE org_id = $1 AND NOT is_deleted AND is_active) AS active_links,
                (SELECT COUNT(1) FROM campaigns WHERE org_id = $1) AS campaign_count,
                (SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM links
                    WHERE org_id = $1 AND NOT is_deleted) AS total_clicks",
        )
        .bind(i64::from(id))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(OrganizationStats {
            member_count: row.member_count,
            link_count: row.link_count,
            active_links: row.active_links,
            campaign_count: row.campaign_count,
            total_clicks: row.total_clicks,
        })
    }
}

#[derive(Clone)]
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MembershipRow {
    user_id: i64,
    org_id: i64,
    role: String,
    joined_at: DateTime<Utc>,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = DomainError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        Ok(Membership {
            user_id: UserId::new(row.user_id)?,
            org_id: OrganizationId::new(row.org_id)?,
            role: row.role.parse()?,
            joined_at: row.joined_at,
        })
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn insert(&self, membership: Membership) -> DomainResult<Membership> {
        let row = sqlx::query_as::<_, MembershipRow>(
            "INSERT INTO memberships (user_id, org_id, role, joined_at)
             VALUES ($1, $2, $3, $4)
             RETURNING user_id, org_id, role, joined_at",
        )
        .bind(i64::from(membership.user_id))
        .bind(i64::from(membership.org_id))
        .bind(membership.role.as_str())
        .bind(membership.joined_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Membership::try_from(row)
    }

    async fn find(
        &self,
        user_id: UserId,
        org_id: OrganizationId,
    ) -> DomainResult<Option<Membership>> {
        let row = sqlx::query_as::<_, MembershipRow>(
            "SELECT user_id, org_id, role, joined_at FROM memberships
             WHERE user_id = $1 AND org_id = $2",
        )
        .bind(i64::from(user_id))
        .bind(i64::from(org_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;
        row.map(Membership::try_from).transpose()
    }

    async fn list_for_user(&self, user_id: UserId) -> DomainResult<Vec<Membership>> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            "SELECT user_id, org_id, role, joined_at FROM memberships
             WHERE user_id = $1
             ORDER BY joined_at, org_id",
        )
        .bind(i64::from(user_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        rows.into_iter().map(Membership::try_from).collect()
    }

    async fn list_for_org(&self, org_id: OrganizationId) -> DomainResult<Vec<Membership>> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            "SELECT user_id, org_id, role, joined_at FROM memberships
             WHERE org_id = $1
             ORDER BY joined_at, user_id",
        )
        .bind(i64::from(org_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        rows.into_iter().map(Membership::try_from).collect()
    }

    async fn update_role(
        &self,
        user_id: UserId,
        org_id: OrganizationId,
        role: MemberRole,
    ) -> DomainResult<Membership> {
        let row = sqlx::query_as::<_, MembershipRow>(
            "UPDATE memberships SET role = $3
             WHERE user_id = $1 AND org_id = $2
             RETURNING user_id, org_id, role, joined_at",
        )
        .bind(i64::from(user_id))
        .bind(i64::from(org_id))
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("Member not found".into()))?;
        Membership::try_from(row)
    }

    async fn demote_owners(&self, org_id: OrganizationId) -> DomainResult<()> {
        sqlx::query("UPDATE memberships SET role = 'admin' WHERE org_id = $1 AND role = 'owner'")
            .bind(i64::from(org_id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn remove(&self, user_id: UserId, org_id: OrganizationId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM memberships WHERE user_id = $1 AND org_id = $2")
            .bind(i64::from(user_id))
            .bind(i64::from(org_id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Member not found".into()));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct PostgresInviteRepository {
    pool: PgPool,
}

impl PostgresInviteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct InviteRow {
    id: i64,
    org_id: i64,
    invited_by: i64,
    email: String,
    role: String,
    token: String,
    status: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl TryFrom<InviteRow> for Invite {
    type Error = DomainError;

    fn try_from(row: InviteRow) -> Result<Self, Self::Error> {
        Ok(Invite {
            id: InviteId::new(row.id)?,
            org_id: OrganizationId::new(row.org_id)?,
            invited_by: UserId::new(row.invited_by)?,
            email: Email::new(row.email)?,
            role: row.role.parse()?,
            token: row.token,
            status: row.status.parse()?,
            created_at: row.created_at,
            expires_at: row.expires_at,
        })
    }
}

#[async_trait]
impl InviteRepository for PostgresInviteRepository {
    async fn insert(&self, invite: NewInvite) -> DomainResult<Invite> {
        let sql = format!(
            "INSERT INTO invites (org_id, invited_by, email, role, token, created_at, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {INVITE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, InviteRow>(&sql)
            .bind(i64::from(invite.org_id))
            .bind(i64::from(invite.invited_by))
            .bind(invite.email.as_str())
            .bind(invite.role.as_str())
            .bind(&invite.token)
            .bind(invite.created_at)
            .bind(invite.expires_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Invite::try_from(row)
    }

    async fn find_by_id(&self, id: InviteId) -> DomainResult<Option<Invite>> {
        let sql = format!("SELECT {INVITE_COLUMNS} FROM invites WHERE id = $1");
        let row = sqlx::query_as::<_, InviteRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.map(Invite::try_from).transpose()
    }

    async fn find_by_token(&self, token: &str) -> DomainResult<Option<Invite>> {
        let sql = format!("SELECT {INVITE_COLUMNS} FROM invites WHERE token = $1");
        let row = sqlx::query_as::<_, InviteRow>(&sql)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.map(Invite::try_from).transpose()
    }

    async fn list_pending(&self, org_id: OrganizationId) -> DomainResult<Vec<Invite>> {
        let sql = format!(
            "SELECT {INVITE_COLUMNS} FROM invites
             WHERE org_id = $1 AND status = $2
             ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, InviteRow>(&sql)
            .bind(i64::from(org_id))
            .bind(InviteStatus::Pending.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter().map(Invite::try_from).collect()
    }

    async fn set_status(&self, id: InviteId, status: InviteStatus) -> DomainResult<()> {
        let result = sqlx::query("UPDATE invites SET status = $2 WHERE id = $1")
            .bind(i64::from(id))
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Invite not found".into()));
        }
        Ok(())
    }
}
