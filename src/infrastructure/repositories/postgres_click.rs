// src/infrastructure/repositories/postgres_click.rs
use super::map_sqlx;
use crate::domain::analytics::{
    ClickEventRepository, CountBucket, DailyCount, NewClickEvent,
};
use crate::domain::errors::DomainResult;
use crate::domain::link::LinkId;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresClickEventRepository {
    pool: PgPool,
}

impl PostgresClickEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn grouped(
        &self,
        column: &'static str,
        link_id: LinkId,
        limit: Option<u32>,
    ) -> DomainResult<Vec<CountBucket>> {
        let mut sql = format!(
            "SELECT {column} AS label, COUNT(1) AS count FROM click_events
             WHERE link_id = $1
             GROUP BY {column}
             ORDER BY count DESC, label"
        );
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        let rows = sqlx::query_as::<_, BucketRow>(&sql)
            .bind(i64::from(link_id))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(rows
            .into_iter()
            .map(|row| CountBucket {
                label: row.label,
                count: row.count,
            })
            .collect())
    }
}

#[derive(Debug, FromRow)]
struct BucketRow {
    label: Option<String>,
    count: i64,
}

#[derive(Debug, FromRow)]
struct DailyRow {
    day: NaiveDate,
    count: i64,
}

#[async_trait]
impl ClickEventRepository for PostgresClickEventRepository {
    async fn insert(&self, event: NewClickEvent) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO click_events (link_id, timestamp, ip_address, country_code, user_agent,
                 referrer, device_type, browser, os)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(i64::from(event.link_id))
        .bind(event.timestamp)
        .bind(event.ip_address)
        .bind(event.country_code)
        .bind(event.user_agent)
        .bind(event.referrer)
        .bind(event.device_type.as_str())
        .bind(event.browser)
        .bind(event.os)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(())
    }

    async fn daily_counts(
        &self,
        link_id: LinkId,
        since: DateTime<Utc>,
    ) -> DomainResult<Vec<DailyCount>> {
        let rows = sqlx::query_as::<_, DailyRow>(
            "SELECT (timestamp AT TIME ZONE 'UTC')::date AS day, COUNT(1) AS count
             FROM click_events
             WHERE link_id = $1 AND timestamp >= $2
             GROUP BY day
             ORDER BY day",
        )
        .bind(i64::from(link_id))
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(rows
            .into_iter()
            .map(|row| DailyCount {
                date: row.day,
                count: row.count,
            })
            .collect())
    }

    async fn top_countries(&self, link_id: LinkId, limit: u32) -> DomainResult<Vec<CountBucket>> {
        self.grouped("country_code", link_id, Some(limit)).await
    }

    async fn top_referrers(&self, link_id: LinkId, limit: u32) -> DomainResult<Vec<CountBucket>> {
        self.grouped("referrer", link_id, Some(limit)).await
    }

    async fn device_breakdown(&self, link_id: LinkId) -> DomainResult<Vec<CountBucket>> {
        self.grouped("device_type", link_id, None).await
    }
}
