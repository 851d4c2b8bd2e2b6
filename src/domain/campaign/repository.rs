// src/domain/campaign/repository.rs
use super::{
    entity::{Campaign, CampaignUpdate, NewCampaign},
    value_objects::CampaignId,
};
use crate::domain::{errors::DomainResult, organization::OrganizationId, user::UserId};
use async_trait::async_trait;

#[async_trait]
pub trait CampaignRepository: Send + Sync {
    async fn insert(&self, campaign: NewCampaign) -> DomainResult<Campaign>;

    async fn find_by_id(&self, id: CampaignId) -> DomainResult<Option<Campaign>>;

    /// Ordered by name. `owner_id` narrows the result to one member's campaigns.
    async fn list(
        &self,
        org_id: OrganizationId,
        owner_id: Option<UserId>,
    ) -> DomainResult<Vec<Campaign>>;

    async fn update(&self, update: CampaignUpdate) -> DomainResult<Campaign>;

    async fn delete(&self, id: CampaignId) -> DomainResult<()>;
}
