use super::LinkQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, LinkDto},
        error::ApplicationResult,
        queries::clamp_limit,
    },
    domain::{campaign::CampaignId, link::LinkFilter, organization::OrganizationId},
};

const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 500;

#[derive(Debug, Default)]
pub struct ListLinksQuery {
    pub search: Option<String>,
    pub campaign_id: Option<i64>,
    pub is_active: Option<bool>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl LinkQueryService {
    pub async fn list(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
        query: ListLinksQuery,
    ) -> ApplicationResult<Vec<LinkDto>> {
        let ctx = self.contexts.resolve(actor, org).await?;
        let filter = LinkFilter {
            search: query.search.filter(|s| !s.trim().is_empty()),
            campaign_id: query.campaign_id.map(CampaignId),
            is_active: query.is_active,
        };
        let limit = clamp_limit(query.limit, DEFAULT_LIMIT, MAX_LIMIT);

        let links = self
            .read_repo
            .list(ctx.link_scope(), &filter, query.skip.unwrap_or(0), limit)
            .await?;
        Ok(links.into_iter().map(Into::into).collect())
    }
}
