// src/domain/link/repository.rs
use super::{
    entity::{Link, LinkChanges, LinkFilter, LinkScope, NewLink},
    value_objects::{LinkId, ShortCode},
};
use crate::domain::{campaign::CampaignId, errors::DomainResult};
use async_trait::async_trait;

#[async_trait]
pub trait LinkWriteRepository: Send + Sync {
    /// Fails with `DomainError::Conflict` when the short code is taken.
    async fn insert(&self, link: NewLink) -> DomainResult<Link>;

    async fn update(&self, id: LinkId, changes: LinkChanges) -> DomainResult<Link>;

    async fn soft_delete(&self, id: LinkId) -> DomainResult<()>;

    async fn increment_clicks(&self, id: LinkId) -> DomainResult<()>;

    /// Clears `campaign_id` on every link of the campaign.
    async fn detach_campaign(&self, campaign_id: CampaignId) -> DomainResult<()>;
}

#[async_trait]
pub trait LinkReadRepository: Send + Sync {
    /// Returns soft-deleted links too; callers decide how to treat them.
    async fn find_by_id(&self, id: LinkId) -> DomainResult<Option<Link>>;

    /// Live (not deleted) link with this code.
    async fn find_by_code(&self, code: &ShortCode) -> DomainResult<Option<Link>>;

    /// Deleted links keep their code reserved.
    async fn code_exists(&self, code: &ShortCode) -> DomainResult<bool>;

    /// Newest first.
    async fn list(
        &self,
        scope: LinkScope,
        filter: &LinkFilter,
        skip: u32,
        limit: u32,
    ) -> DomainResult<Vec<Link>>;
}
