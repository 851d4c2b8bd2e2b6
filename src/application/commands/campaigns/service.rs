use std::sync::Arc;

use crate::{
    application::{
        audit_trail::AuditTrail,
        context::{ContextResolver, RequestContext},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        campaign::{Campaign, CampaignId, CampaignRepository},
        link::LinkWriteRepository,
    },
};

pub struct CampaignCommandService {
    pub(super) campaign_repo: Arc<dyn CampaignRepository>,
    pub(super) link_repo: Arc<dyn LinkWriteRepository>,
    pub(super) contexts: ContextResolver,
    pub(super) audit: AuditTrail,
    pub(super) clock: Arc<dyn Clock>,
}

impl CampaignCommandService {
    pub fn new(
        campaign_repo: Arc<dyn CampaignRepository>,
        link_repo: Arc<dyn LinkWriteRepository>,
        contexts: ContextResolver,
        audit: AuditTrail,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            campaign_repo,
            link_repo,
            contexts,
            audit,
            clock,
        }
    }
}

/// A campaign of the caller's organization that the caller may manage.
pub(crate) async fn load_accessible_campaign(
    repo: &dyn CampaignRepository,
    ctx: &RequestContext,
    id: i64,
) -> ApplicationResult<Campaign> {
    let not_found = || ApplicationError::not_found("Campaign not found");
    let id = CampaignId::new(id).map_err(|_| not_found())?;
    let campaign = repo
        .find_by_id(id)
        .await?
        .filter(|c| c.org_id == ctx.org_id())
        .ok_or_else(not_found)?;
    if !ctx.is_manager() && campaign.owner_id != ctx.user_id() {
        return Err(ApplicationError::forbidden("Not enough permissions"));
    }
    Ok(campaign)
}
