use std::sync::Arc;

use crate::{
    application::{
        audit_trail::AuditTrail,
        context::ContextResolver,
        error::ApplicationResult,
        ports::{
            time::Clock,
            util::{SecretGenerator, SlugGenerator},
        },
    },
    domain::{
        organization::{
            InviteRepository, MembershipRepository, OrganizationRepository, OrganizationSlug,
        },
        user::UserRepository,
    },
};

pub struct OrganizationCommandService {
    pub(super) org_repo: Arc<dyn OrganizationRepository>,
    pub(super) membership_repo: Arc<dyn MembershipRepository>,
    pub(super) invite_repo: Arc<dyn InviteRepository>,
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) contexts: ContextResolver,
    pub(super) slugger: Arc<dyn SlugGenerator>,
    pub(super) invite_tokens: Arc<dyn SecretGenerator>,
    pub(super) audit: AuditTrail,
    pub(super) clock: Arc<dyn Clock>,
}

impl OrganizationCommandService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        org_repo: Arc<dyn OrganizationRepository>,
        membership_repo: Arc<dyn MembershipRepository>,
        invite_repo: Arc<dyn InviteRepository>,
        user_repo: Arc<dyn UserRepository>,
        contexts: ContextResolver,
        slugger: Arc<dyn SlugGenerator>,
        invite_tokens: Arc<dyn SecretGenerator>,
        audit: AuditTrail,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            org_repo,
            membership_repo,
            invite_repo,
            user_repo,
            contexts,
            slugger,
            invite_tokens,
            audit,
            clock,
        }
    }

    /// Slug for `name`, suffixed with `-1`, `-2`, ... until unused.
    pub(super) async fn unique_slug(
        &self,
        name: &str,
        current: Option<&OrganizationSlug>,
    ) -> ApplicationResult<OrganizationSlug> {
        let base = match self.slugger.slugify(name) {
            s if s.is_empty() => "org".to_string(),
            s => s,
        };
        let base = OrganizationSlug::new(base)?;

        let mut candidate = base.clone();
        let mut n = 0;
        loop {
            if current == Some(&candidate) || !self.org_repo.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
            n += 1;
            candidate = base.with_suffix(n);
        }
    }
}
