use super::LinkQueryService;
use crate::{
    application::{
        csv_format::{self, ExportRow},
        dto::{AuthenticatedUser, CsvExport},
        error::ApplicationResult,
    },
    domain::{link::LinkFilter, organization::OrganizationId},
};
use std::collections::HashMap;

/// Export reads every visible link in one page of this size.
const EXPORT_PAGE: u32 = u32::MAX;

impl LinkQueryService {
    pub async fn export_csv(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
    ) -> ApplicationResult<CsvExport> {
        let ctx = self.contexts.resolve(actor, org).await?;
        let links = self
            .read_repo
            .list(ctx.link_scope(), &LinkFilter::default(), 0, EXPORT_PAGE)
            .await?;
        let campaigns: HashMap<_, _> = self
            .campaign_repo
            .list(ctx.org_id(), None)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name.to_string()))
            .collect();

        let rows = links
            .into_iter()
            .map(|link| {
                let campaign = link.campaign_id.and_then(|id| campaigns.get(&id));
                ExportRow::from_link(link, campaign.map(String::as_str))
            })
            .collect();
        let content = csv_format::write_rows(rows)?;
        let filename = format!(
            "{}_export_{}.csv",
            ctx.org.slug,
            self.clock.now().format("%Y%m%d_%H%M%S")
        );

        tracing::info!(org_id = %ctx.org_id(), filename = %filename, "links exported");
        Ok(CsvExport { filename, content })
    }
}
