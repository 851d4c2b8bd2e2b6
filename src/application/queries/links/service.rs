use std::sync::Arc;

use crate::{
    application::{context::ContextResolver, ports::time::Clock},
    domain::{
        analytics::ClickEventRepository, campaign::CampaignRepository, link::LinkReadRepository,
    },
};

pub struct LinkQueryService {
    pub(super) read_repo: Arc<dyn LinkReadRepository>,
    pub(super) campaign_repo: Arc<dyn CampaignRepository>,
    pub(super) click_repo: Arc<dyn ClickEventRepository>,
    pub(super) contexts: ContextResolver,
    pub(super) clock: Arc<dyn Clock>,
}

impl LinkQueryService {
    pub fn new(
        read_repo: Arc<dyn LinkReadRepository>,
        campaign_repo: Arc<dyn CampaignRepository>,
        click_repo: Arc<dyn ClickEventRepository>,
        contexts: ContextResolver,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            read_repo,
            campaign_repo,
            click_repo,
            contexts,
            clock,
        }
    }
}
