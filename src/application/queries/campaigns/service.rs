use std::sync::Arc;

use crate::{
    application::{
        commands::campaigns::load_accessible_campaign,
        context::ContextResolver,
        dto::{AuthenticatedUser, CampaignDto},
        error::ApplicationResult,
    },
    domain::{campaign::CampaignRepository, organization::OrganizationId},
};

pub struct CampaignQueryService {
    repo: Arc<dyn CampaignRepository>,
    contexts: ContextResolver,
}

impl CampaignQueryService {
    pub fn new(repo: Arc<dyn CampaignRepository>, contexts: ContextResolver) -> Self {
        Self { repo, contexts }
    }

    /// Ordered by name; members only see campaigns they own.
    pub async fn list(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
    ) -> ApplicationResult<Vec<CampaignDto>> {
        let ctx = self.contexts.resolve(actor, org).await?;
        let campaigns = self.repo.list(ctx.org_id(), ctx.owner_filter()).await?;
        Ok(campaigns.into_iter().map(Into::into).collect())
    }

    pub async fn get(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
        campaign_id: i64,
    ) -> ApplicationResult<CampaignDto> {
        let ctx = self.contexts.resolve(actor, org).await?;
        let campaign = load_accessible_campaign(self.repo.as_ref(), &ctx, campaign_id).await?;
        Ok(campaign.into())
    }
}
