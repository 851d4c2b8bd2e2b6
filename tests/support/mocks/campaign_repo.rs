// tests/support/mocks/campaign_repo.rs
use super::store::MemoryStore;
use async_trait::async_trait;
use linkforge::domain::campaign::{
    Campaign, CampaignId, CampaignRepository, CampaignUpdate, NewCampaign,
};
use linkforge::domain::errors::{DomainError, DomainResult};
use linkforge::domain::organization::OrganizationId;
use linkforge::domain::user::UserId;

#[derive(Clone)]
pub struct MemoryCampaignRepo(pub MemoryStore);

fn not_found() -> DomainError {
    DomainError::NotFound("Campaign not found".into())
}

#[async_trait]
impl CampaignRepository for MemoryCampaignRepo {
    async fn insert(&self, campaign: NewCampaign) -> DomainResult<Campaign> {
        let mut tables = self.0.lock();
        let campaign = Campaign {
            id: CampaignId(tables.next_id("campaigns")),
            name: campaign.name,
            color: campaign.color,
            owner_id: campaign.owner_id,
            org_id: campaign.org_id,
            created_at: campaign.created_at,
        };
        tables.campaigns.push(campaign.clone());
        Ok(campaign)
    }

    async fn find_by_id(&self, id: CampaignId) -> DomainResult<Option<Campaign>> {
        Ok(self.0.lock().campaigns.iter().find(|c| c.id == id).cloned())
    }

    async fn list(
        &self,
        org_id: OrganizationId,
        owner_id: Option<UserId>,
    ) -> DomainResult<Vec<Campaign>> {
        let mut campaigns: Vec<_> = self
            .0
            .lock()
            .campaigns
            .iter()
            .filter(|c| c.org_id == org_id && owner_id.is_none_or(|o| c.owner_id == o))
            .cloned()
            .collect();
        campaigns.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()).then(a.id.cmp(&b.id)));
        Ok(campaigns)
    }

    async fn update(&self, update: CampaignUpdate) -> DomainResult<Campaign> {
        let mut tables = self.0.lock();
        let campaign = tables
            .campaigns
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or_else(not_found)?;
        if let Some(name) = update.name {
            campaign.name = name;
        }
        if let Some(color) = update.color {
            campaign.color = color;
        }
        Ok(campaign.clone())
    }

    async fn delete(&self, id: CampaignId) -> DomainResult<()> {
        let mut tables = self.0.lock();
        let before = tables.campaigns.len();
        tables.campaigns.retain(|c| c.id != id);
        if tables.campaigns.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}
