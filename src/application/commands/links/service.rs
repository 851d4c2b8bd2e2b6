use std::sync::Arc;

use crate::{
    application::{
        audit_trail::AuditTrail,
        context::{ContextResolver, RequestContext},
        error::{ApplicationError, ApplicationResult},
        ports::{
            geo::GeoLocator, security::PasswordHasher, time::Clock, util::ShortCodeGenerator,
        },
    },
    domain::{
        analytics::ClickEventRepository,
        campaign::{CampaignId, CampaignRepository},
        link::{Link, LinkId, LinkReadRepository, LinkWriteRepository, ShortCode},
    },
};

/// Attempts at drawing an unused random short code before giving up.
const CODE_GENERATION_ATTEMPTS: usize = 10;

pub struct LinkCommandService {
    pub(super) write_repo: Arc<dyn LinkWriteRepository>,
    pub(super) read_repo: Arc<dyn LinkReadRepository>,
    pub(super) campaign_repo: Arc<dyn CampaignRepository>,
    pub(super) click_repo: Arc<dyn ClickEventRepository>,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) short_codes: Arc<dyn ShortCodeGenerator>,
    pub(super) geo: Arc<dyn GeoLocator>,
    pub(super) contexts: ContextResolver,
    pub(super) audit: AuditTrail,
    pub(super) clock: Arc<dyn Clock>,
}

/// Whether the caller edits or deletes a link; the organization policy
/// consulted for members differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LinkMutation {
    Edit,
    Delete,
}

impl LinkCommandService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        write_repo: Arc<dyn LinkWriteRepository>,
        read_repo: Arc<dyn LinkReadRepository>,
        campaign_repo: Arc<dyn CampaignRepository>,
        click_repo: Arc<dyn ClickEventRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        short_codes: Arc<dyn ShortCodeGenerator>,
        geo: Arc<dyn GeoLocator>,
        contexts: ContextResolver,
        audit: AuditTrail,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            campaign_repo,
            click_repo,
            password_hasher,
            short_codes,
            geo,
            contexts,
            audit,
            clock,
        }
    }

    /// A campaign id supplied by the caller must name a campaign of the
    /// caller's organization.
    pub(super) async fn resolve_campaign(
        &self,
        ctx: &RequestContext,
        campaign_id: Option<i64>,
    ) -> ApplicationResult<Option<CampaignId>> {
        let Some(raw) = campaign_id else {
            return Ok(None);
        };
        let not_found = || ApplicationError::validation("Campaign not found");
        let id = CampaignId::new(raw).map_err(|_| not_found())?;
        match self.campaign_repo.find_by_id(id).await? {
            Some(campaign) if campaign.org_id == ctx.org_id() => Ok(Some(campaign.id)),
            _ => Err(not_found()),
        }
    }

    pub(super) async fn ensure_code_available(&self, code: &ShortCode) -> ApplicationResult<()> {
        if self.read_repo.code_exists(code).await? {
            Err(ApplicationError::validation("Short code already exists"))
        } else {
            Ok(())
        }
    }

    pub(super) async fn generate_code(&self) -> ApplicationResult<ShortCode> {
        for _ in 0..CODE_GENERATION_ATTEMPTS {
            let code = ShortCode::new(self.short_codes.generate())?;
            if !self.read_repo.code_exists(&code).await? {
                return Ok(code);
            }
            tracing::debug!(code = %code, "generated short code collided, retrying");
        }
        Err(ApplicationError::infrastructure(
            "could not allocate a unique short code",
        ))
    }

    /// Load a live link of the caller's organization that the caller may modify.
    pub(super) async fn load_for_mutation(
        &self,
        ctx: &RequestContext,
        id: i64,
        mutation: LinkMutation,
    ) -> ApplicationResult<Link> {
        let not_found = || ApplicationError::not_found("Link not found");
        let id = LinkId::new(id).map_err(|_| not_found())?;
        let link = self
            .read_repo
            .find_by_id(id)
            .await?
            .filter(|link| !link.is_deleted && link.org_id == ctx.org_id())
            .ok_or_else(not_found)?;

        if !ctx.is_manager() {
            if link.owner_id != ctx.user_id() {
                return Err(ApplicationError::forbidden("Not enough permissions"));
            }
            ensure_member_policy(ctx, mutation)?;
        }
        Ok(link)
    }
}

fn ensure_member_policy(
    ctx: &RequestContext,
    mutation: LinkMutation,
) -> ApplicationResult<()> {
    match mutation {
        LinkMutation::Edit if !ctx.org.allow_member_edit => Err(ApplicationError::forbidden(
            "Member editing is disabled for this organization",
        )),
        LinkMutation::Delete if !ctx.org.allow_member_delete => Err(
            ApplicationError::forbidden("Member deletion is disabled for this organization"),
        ),
        _ => Ok(()),
    }
}
