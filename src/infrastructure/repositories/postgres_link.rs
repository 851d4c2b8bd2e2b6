// src/infrastructure/repositories/postgres_link.rs
use super::map_sqlx;
use crate::domain::campaign::CampaignId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::link::{
    AllowedEmails, DestinationUrl, Link, LinkChanges, LinkFilter, LinkId, LinkReadRepository,
    LinkScope, LinkWriteRepository, NewLink, RedirectType, ShortCode, Tags, UtmParams,
};
use crate::domain::organization::OrganizationId;
use crate::domain::user::{PasswordHash, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const LINK_COLUMNS: &str = "id, short_code, original_url, owner_id, org_id, campaign_id, title, \
     tags, is_active, clicks, created_at, expires_at, is_deleted, password_hash, require_login, \
     allowed_emails, redirect_type, track_activity, utm_source, utm_medium, utm_campaign, \
     utm_term, utm_content";

/// Serves both sides of the link store; commands and queries hold it behind different traits.
#[derive(Clone)]
pub struct PostgresLinkRepository {
    pool: PgPool,
}

impl PostgresLinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LinkRow {
    id: i64,
    short_code: String,
    original_url: String,
    owner_id: i64,
    org_id: i64,
    campaign_id: Option<i64>,
    title: Option<String>,
    tags: Option<String>,
    is_active: bool,
    clicks: i64,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    is_deleted: bool,
    password_hash: Option<String>,
    require_login: bool,
    allowed_emails: Option<String>,
    redirect_type: i32,
    track_activity: bool,
    utm_source: Option<String>,
    utm_medium: Option<String>,
    utm_campaign: Option<String>,
    utm_term: Option<String>,
    utm_content: Option<String>,
}

impl TryFrom<LinkRow> for Link {
    type Error = DomainError;

    fn try_from(row: LinkRow) -> Result<Self, Self::Error> {
        Ok(Link {
            id: LinkId::new(row.id)?,
            short_code: ShortCode::new(row.short_code)?,
            original_url: DestinationUrl::new(row.original_url)?,
            owner_id: UserId::new(row.owner_id)?,
            org_id: OrganizationId::new(row.org_id)?,
            campaign_id: row.campaign_id.map(CampaignId::new).transpose()?,
            title: row.title,
            tags: row.tags.as_deref().and_then(Tags::parse),
            is_active: row.is_active,
            clicks: row.clicks,
            created_at: row.created_at,
            expires_at: row.expires_at,
            is_deleted: row.is_deleted,
            password_hash: row
                .password_hash
                .filter(|hash| !hash.is_empty())
                .map(PasswordHash::new)
                .transpose()?,
            require_login: row.require_login,
            allowed_emails: row
                .allowed_emails
                .as_deref()
                .and_then(AllowedEmails::parse_stored),
            redirect_type: RedirectType::from_code(row.redirect_type)?,
            track_activity: row.track_activity,
            utm: UtmParams {
                source: row.utm_source,
                medium: row.utm_medium,
                campaign: row.utm_campaign,
                term: row.utm_term,
                content: row.utm_content,
            },
        })
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

impl PostgresLinkRepository {
    async fn fetch_by_id(&self, id: LinkId) -> DomainResult<Link> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Link not found".into()))
    }
}

#[async_trait]
impl LinkWriteRepository for PostgresLinkRepository {
    async fn insert(&self, link: NewLink) -> DomainResult<Link> {
        let NewLink {
            short_code,
            original_url,
            owner_id,
            org_id,
            campaign_id,
            title,
            tags,
            is_active,
            created_at,
            expires_at,
            password_hash,
            require_login,
            allowed_emails,
            redirect_type,
            track_activity,
            utm,
        } = link;

        let sql = format!(
            "INSERT INTO links (short_code, original_url, owner_id, org_id, campaign_id, title,
                 tags, is_active, created_at, expires_at, password_hash, require_login,
                 allowed_emails, redirect_type, track_activity, utm_source, utm_medium,
                 utm_campaign, utm_term, utm_content)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                 $17, $18, $19, $20)
             RETURNING {LINK_COLUMNS}"
        );
        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(String::from(short_code))
            .bind(String::from(original_url))
            .bind(i64::from(owner_id))
            .bind(i64::from(org_id))
            .bind(campaign_id.map(i64::from))
            .bind(title)
            .bind(tags.map(String::from))
            .bind(is_active)
            .bind(created_at)
            .bind(expires_at)
            .bind(password_hash.map(String::from))
            .bind(require_login)
            .bind(allowed_emails.as_ref().map(AllowedEmails::to_stored))
            .bind(redirect_type.code())
            .bind(track_activity)
            .bind(blank_to_none(utm.source))
            .bind(blank_to_none(utm.medium))
            .bind(blank_to_none(utm.campaign))
            .bind(blank_to_none(utm.term))
            .bind(blank_to_none(utm.content))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Link::try_from(row)
    }

    async fn update(&self, id: LinkId, changes: LinkChanges) -> DomainResult<Link> {
        if changes.is_empty() {
            return self.fetch_by_id(id).await;
        }

        let LinkChanges {
            short_code,
            original_url,
            is_active,
            campaign_id,
            title,
            tags,
            expires_at,
            password_hash,
            require_login,
            allowed_emails,
            redirect_type,
            track_activity,
            utm,
        } = changes;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE links SET ");
        let mut fields = builder.separated(", ");
        if let Some(code) = short_code {
            fields.push("short_code = ").push_bind_unseparated(String::from(code));
        }
        if let Some(url) = original_url {
            fields.push("original_url = ").push_bind_unseparated(String::from(url));
        }
        if let Some(is_active) = is_active {
            fields.push("is_active = ").push_bind_unseparated(is_active);
        }
        if let Some(campaign_id) = campaign_id {
            fields
                .push("campaign_id = ")
                .push_bind_unseparated(campaign_id.map(i64::from));
        }
        if let Some(title) = title {
            fields.push("title = ").push_bind_unseparated(title);
        }
        if let Some(tags) = tags {
            fields
                .push("tags = ")
                .push_bind_unseparated(tags.map(String::from));
        }
        if let Some(expires_at) = expires_at {
            fields.push("expires_at = ").push_bind_unseparated(expires_at);
        }
        if let Some(hash) = password_hash {
            fields
                .push("password_hash = ")
                .push_bind_unseparated(hash.map(String::from));
        }
        if let Some(require_login) = require_login {
            fields.push("require_login = ").push_bind_unseparated(require_login);
        }
        if let Some(emails) = allowed_emails {
            fields
                .push("allowed_emails = ")
                .push_bind_unseparated(emails.as_ref().map(AllowedEmails::to_stored));
        }
        if let Some(redirect_type) = redirect_type {
            fields
                .push("redirect_type = ")
                .push_bind_unseparated(redirect_type.code());
        }
        if let Some(track) = track_activity {
            fields.push("track_activity = ").push_bind_unseparated(track);
        }
        let utm_columns = [
            ("utm_source = ", utm.source),
            ("utm_medium = ", utm.medium),
            ("utm_campaign = ", utm.campaign),
            ("utm_term = ", utm.term),
            ("utm_content = ", utm.content),
        ];
        for (column, change) in utm_columns {
            if let Some(value) = change {
                fields.push(column).push_bind_unseparated(blank_to_none(value));
            }
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(format!(" RETURNING {LINK_COLUMNS}"));

        let row = builder
            .build_query_as::<LinkRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("Link not found".into()))?;

        Link::try_from(row)
    }

    async fn soft_delete(&self, id: LinkId) -> DomainResult<()> {
        let result = sqlx::query("UPDATE links SET is_deleted = TRUE WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Link not found".into()));
        }
        Ok(())
    }

    async fn increment_clicks(&self, id: LinkId) -> DomainResult<()> {
        sqlx::query("UPDATE links SET clicks = clicks + 1 WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn detach_campaign(&self, campaign_id: CampaignId) -> DomainResult<()> {
        sqlx::query("UPDATE links SET campaign_id = NULL WHERE campaign_id = $1")
            .bind(i64::from(campaign_id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}

#[async_trait]
impl LinkReadRepository for PostgresLinkRepository {
    async fn find_by_id(&self, id: LinkId) -> DomainResult<Option<Link>> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE id = $1");
        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.map(Link::try_from).transpose()
    }

    async fn find_by_code(&self, code: &ShortCode) -> DomainResult<Option<Link>> {
        let sql =
            format!("SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1 AND NOT is_deleted");
        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(code.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.map(Link::try_from).transpose()
    }

    async fn code_exists(&self, code: &ShortCode) -> DomainResult<bool> {
        // Deleted links keep their code reserved.
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM links WHERE short_code = $1)")
            .bind(code.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn list(
        &self,
        scope: LinkScope,
        filter: &LinkFilter,
        skip: u32,
        limit: u32,
    ) -> DomainResult<Vec<Link>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE NOT is_deleted AND org_id = "
        ));
        builder.push_bind(i64::from(scope.org_id));

        if let Some(owner_id) = scope.owner_id {
            builder.push(" AND owner_id = ").push_bind(i64::from(owner_id));
        }
        if let Some(campaign_id) = filter.campaign_id {
            builder
                .push(" AND campaign_id = ")
                .push_bind(i64::from(campaign_id));
        }
        if let Some(is_active) = filter.is_active {
            builder.push(" AND is_active = ").push_bind(is_active);
        }
        if let Some(term) = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
        {
            let pattern = like_pattern(term);
            builder.push(" AND (short_code ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR original_url ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR tags ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        builder.push(" ORDER BY created_at DESC, id DESC OFFSET ");
        builder.push_bind(i64::from(skip));
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(limit));

        let rows = builder
            .build_query_as::<LinkRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter().map(Link::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("promo"), "%promo%");
    }

    #[test]
    fn blank_utm_values_are_stored_as_null() {
        assert_eq!(blank_to_none(Some("  ".into())), None);
        assert_eq!(blank_to_none(Some("mail".into())).as_deref(), Some("mail"));
    }
}
