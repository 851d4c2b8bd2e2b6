// src/domain/analytics/repository.rs
use super::entity::{CountBucket, DailyCount, NewClickEvent};
use crate::domain::{errors::DomainResult, link::LinkId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ClickEventRepository: Send + Sync {
    async fn insert(&self, event: NewClickEvent) -> DomainResult<()>;

    /// Per-day counts since `since`, ascending by date.
    async fn daily_counts(
        &self,
        link_id: LinkId,
        since: DateTime<Utc>,
    ) -> DomainResult<Vec<DailyCount>>;

    /// Descending by count.
    async fn top_countries(&self, link_id: LinkId, limit: u32) -> DomainResult<Vec<CountBucket>>;

    /// Descending by count.
    async fn top_referrers(&self, link_id: LinkId, limit: u32) -> DomainResult<Vec<CountBucket>>;

    async fn device_breakdown(&self, link_id: LinkId) -> DomainResult<Vec<CountBucket>>;
}
