// src/infrastructure/repositories/postgres_audit_log.rs
use super::map_sqlx;
use crate::domain::audit::{AuditFilter, AuditLog, AuditLogRepository, NewAuditLog};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::organization::OrganizationId;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, types::Json};

#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: i64,
    user_id: Option<i64>,
    org_id: Option<i64>,
    action: String,
    target_type: String,
    target_id: Option<i64>,
    details: Option<Json<serde_json::Value>>,
    timestamp: DateTime<Utc>,
}

impl TryFrom<AuditLogRow> for AuditLog {
    type Error = DomainError;

    fn try_from(row: AuditLogRow) -> Result<Self, Self::Error> {
        Ok(AuditLog {
            id: row.id,
            user_id: row.user_id.map(UserId::new).transpose()?,
            org_id: row.org_id.map(OrganizationId::new).transpose()?,
            action: row.action,
            target_type: row.target_type,
            target_id: row.target_id,
            details: row.details.map(|Json(value)| value),
            timestamp: row.timestamp,
        })
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO audit_logs (user_id, org_id, action, target_type, target_id, details, timestamp)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(i64::from(log.user_id))
        .bind(i64::from(log.org_id))
        .bind(log.action.as_str())
        .bind(log.target_type.as_str())
        .bind(log.target_id)
        .bind(Json(log.details))
        .bind(log.timestamp)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }

    async fn list(
        &self,
        org_id: OrganizationId,
        filter: &AuditFilter,
        skip: u32,
        limit: u32,
    ) -> DomainResult<Vec<AuditLog>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT id, user_id, org_id, action, target_type, target_id, details, timestamp
             FROM audit_logs WHERE org_id = ",
        );
        builder.push_bind(i64::from(org_id));
        if let Some(action) = &filter.action {
            builder.push(" AND action = ").push_bind(action.clone());
        }
        if let Some(target_type) = &filter.target_type {
            builder
                .push(" AND target_type = ")
                .push_bind(target_type.clone());
        }
        if let Some(user_id) = filter.user_id {
            builder.push(" AND user_id = ").push_bind(i64::from(user_id));
        }
        builder.push(" ORDER BY timestamp DESC, id DESC OFFSET ");
        builder.push_bind(i64::from(skip));
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(limit));

        let rows = builder
            .build_query_as::<AuditLogRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter().map(AuditLog::try_from).collect()
    }
}
