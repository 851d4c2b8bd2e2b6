use std::sync::Arc;

use crate::{
    application::{
        context::{ContextResolver, RequestContext, ensure_superuser},
        dto::{AuthenticatedUser, MembershipSummaryDto, OrganizationDto, OrganizationStatsDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        organization::{
            InviteRepository, MembershipRepository, OrganizationId, OrganizationRepository,
        },
        user::UserRepository,
    },
};

pub struct OrganizationQueryService {
    pub(super) org_repo: Arc<dyn OrganizationRepository>,
    pub(super) membership_repo: Arc<dyn MembershipRepository>,
    pub(super) invite_repo: Arc<dyn InviteRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) contexts: ContextResolver,
}

impl OrganizationQueryService {
    pub fn new(
        org_repo: Arc<dyn OrganizationRepository>,
        membership_repo: Arc<dyn MembershipRepository>,
        invite_repo: Arc<dyn InviteRepository>,
        user_repo: Arc<dyn UserRepository>,
        contexts: ContextResolver,
    ) -> Self {
        Self {
            org_repo,
            membership_repo,
            invite_repo,
            user_repo,
            contexts,
        }
    }

    /// The context every organization-scoped request runs in.
    pub async fn resolve_context(
        &self,
        actor: &AuthenticatedUser,
        org: Option<OrganizationId>,
    ) -> ApplicationResult<RequestContext> {
        self.contexts.resolve(actor, org).await
    }

    pub async fn list_mine(&self, actor: &AuthenticatedUser) -> ApplicationResult<Vec<OrganizationDto>> {
        let user = self.contexts.load_user(actor).await?;
        let orgs = self.org_repo.list_for_user(user.id).await?;
        Ok(orgs.into_iter().map(Into::into).collect())
    }

    /// Memberships in join order, each with its organization's name and slug.
    pub async fn list_memberships(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<MembershipSummaryDto>> {
        let user = self.contexts.load_user(actor).await?;
        let memberships = self.membership_repo.list_for_user(user.id).await?;
        let orgs = self.org_repo.list_for_user(user.id).await?;

        Ok(memberships
            .iter()
            .filter_map(|membership| {
                orgs.iter()
                    .find(|org| org.id == membership.org_id)
                    .map(|org| MembershipSummaryDto::from_parts(membership, org))
            })
            .collect())
    }

    pub async fn list_all(&self, actor: &AuthenticatedUser) -> ApplicationResult<Vec<OrganizationDto>> {
        let user = self.contexts.load_user(actor).await?;
        ensure_superuser(&user)?;
        let orgs = self.org_repo.list_all().await?;
        Ok(orgs.into_iter().map(Into::into).collect())
    }

    pub async fn get(
        &self,
        actor: &AuthenticatedUser,
        org_id: OrganizationId,
    ) -> ApplicationResult<OrganizationDto> {
        let ctx = self.contexts.resolve(actor, Some(org_id)).await?;
        Ok(ctx.org.into())
    }

    pub async fn stats(
        &self,
        actor: &AuthenticatedUser,
        org_id: OrganizationId,
    ) -> ApplicationResult<OrganizationStatsDto> {
        let user = self.contexts.load_user(actor).await?;
        ensure_superuser(&user)?;
        let org = self
            .org_repo
            .find_by_id(org_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Organization not found"))?;
        let stats = self.org_repo.stats(org.id).await?;
        Ok(OrganizationStatsDto::from_parts(&org, stats))
    }
}
