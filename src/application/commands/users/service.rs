use std::sync::Arc;

use crate::application::ports::{
    identity::{IdentityProvider, LoginStateStore},
    security::{PasswordHasher, TokenManager},
    time::Clock,
    util::{SecretGenerator, SlugGenerator},
};
use crate::domain::{
    organization::{MembershipRepository, OrganizationRepository},
    user::UserRepository,
};

/// Collaborators for sign-in through the external identity provider.
#[derive(Clone)]
pub struct ExternalLogin {
    pub provider: Arc<dyn IdentityProvider>,
    pub states: Arc<dyn LoginStateStore>,
    pub secrets: Arc<dyn SecretGenerator>,
}

pub struct UserCommandService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) org_repo: Arc<dyn OrganizationRepository>,
    pub(super) membership_repo: Arc<dyn MembershipRepository>,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) token_manager: Arc<dyn TokenManager>,
    pub(super) slugger: Arc<dyn SlugGenerator>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) external_login: Option<ExternalLogin>,
    pub(super) bootstrap_org_name: String,
}

impl UserCommandService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        org_repo: Arc<dyn OrganizationRepository>,
        membership_repo: Arc<dyn MembershipRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        slugger: Arc<dyn SlugGenerator>,
        clock: Arc<dyn Clock>,
        external_login: Option<ExternalLogin>,
        bootstrap_org_name: impl Into<String>,
    ) -> Self {
        Self {
            user_repo,
            org_repo,
            membership_repo,
            password_hasher,
            token_manager,
            slugger,
            clock,
            external_login,
            bootstrap_org_name: bootstrap_org_name.into(),
        }
    }
}
