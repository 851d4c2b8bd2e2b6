// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        audit_trail::AuditTrail,
        commands::{
            campaigns::CampaignCommandService,
            links::LinkCommandService,
            organizations::OrganizationCommandService,
            users::{ExternalLogin, UserCommandService},
        },
        context::ContextResolver,
        dto::AuthenticatedUser,
        ports::{
            geo::GeoLocator,
            identity::{IdentityProvider, LoginStateStore},
            security::{PasswordHasher, TokenManager},
            time::Clock,
            util::{SecretGenerator, ShortCodeGenerator, SlugGenerator},
        },
        queries::{
            audit::AuditQueryService, campaigns::CampaignQueryService, links::LinkQueryService,
            organizations::OrganizationQueryService, users::UserQueryService,
        },
    },
    domain::{
        analytics::ClickEventRepository,
        audit::AuditLogRepository,
        campaign::CampaignRepository,
        link::{LinkReadRepository, LinkWriteRepository},
        organization::{InviteRepository, MembershipRepository, OrganizationRepository},
        user::UserRepository,
    },
};

/// Persistence adapters the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub organizations: Arc<dyn OrganizationRepository>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub invites: Arc<dyn InviteRepository>,
    pub link_writes: Arc<dyn LinkWriteRepository>,
    pub link_reads: Arc<dyn LinkReadRepository>,
    pub campaigns: Arc<dyn CampaignRepository>,
    pub clicks: Arc<dyn ClickEventRepository>,
    pub audit_logs: Arc<dyn AuditLogRepository>,
}

/// Non-persistence collaborators.
#[derive(Clone)]
pub struct Ports {
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_manager: Arc<dyn TokenManager>,
    pub clock: Arc<dyn Clock>,
    pub slugger: Arc<dyn SlugGenerator>,
    pub short_codes: Arc<dyn ShortCodeGenerator>,
    pub secrets: Arc<dyn SecretGenerator>,
    pub geo: Arc<dyn GeoLocator>,
    /// `None` when sign-in through an identity provider is not configured.
    pub identity_provider: Option<Arc<dyn IdentityProvider>>,
    pub login_states: Arc<dyn LoginStateStore>,
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub organization_commands: Arc<OrganizationCommandService>,
    pub organization_queries: Arc<OrganizationQueryService>,
    pub link_commands: Arc<LinkCommandService>,
    pub link_queries: Arc<LinkQueryService>,
    pub campaign_commands: Arc<CampaignCommandService>,
    pub campaign_queries: Arc<CampaignQueryService>,
    pub audit_queries: Arc<AuditQueryService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    /// `bootstrap_org_name` names the organization created with the first account.
    pub fn new(repos: Repositories, ports: Ports, bootstrap_org_name: impl Into<String>) -> Self {
        let contexts = ContextResolver::new(
            Arc::clone(&repos.users),
            Arc::clone(&repos.organizations),
            Arc::clone(&repos.memberships),
        );
        let audit = AuditTrail::new(Arc::clone(&repos.audit_logs), Arc::clone(&ports.clock));

        let external_login = ports.identity_provider.as_ref().map(|provider| ExternalLogin {
            provider: Arc::clone(provider),
            states: Arc::clone(&ports.login_states),
            secrets: Arc::clone(&ports.secrets),
        });
        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&repos.users),
            Arc::clone(&repos.organizations),
            Arc::clone(&repos.memberships),
            Arc::clone(&ports.password_hasher),
            Arc::clone(&ports.token_manager),
            Arc::clone(&ports.slugger),
            Arc::clone(&ports.clock),
            external_login,
            bootstrap_org_name,
        ));
        let user_queries = Arc::new(UserQueryService::new(Arc::clone(&repos.users)));

        let organization_commands = Arc::new(OrganizationCommandService::new(
            Arc::clone(&repos.organizations),
            Arc::clone(&repos.memberships),
            Arc::clone(&repos.invites),
            Arc::clone(&repos.users),
            contexts.clone(),
            Arc::clone(&ports.slugger),
            Arc::clone(&ports.secrets),
            audit.clone(),
            Arc::clone(&ports.clock),
        ));
        let organization_queries = Arc::new(OrganizationQueryService::new(
            Arc::clone(&repos.organizations),
            Arc::clone(&repos.memberships),
            Arc::clone(&repos.invites),
            Arc::clone(&repos.users),
            contexts.clone(),
        ));

        let link_commands = Arc::new(LinkCommandService::new(
            Arc::clone(&repos.link_writes),
            Arc::clone(&repos.link_reads),
            Arc::clone(&repos.campaigns),
            Arc::clone(&repos.clicks),
            Arc::clone(&ports.password_hasher),
            Arc::clone(&ports.short_codes),
            Arc::clone(&ports.geo),
            contexts.clone(),
            audit.clone(),
            Arc::clone(&ports.clock),
        ));
        let link_queries = Arc::new(LinkQueryService::new(
            Arc::clone(&repos.link_reads),
            Arc::clone(&repos.campaigns),
            Arc::clone(&repos.clicks),
            contexts.clone(),
            Arc::clone(&ports.clock),
        ));

        let campaign_commands = Arc::new(CampaignCommandService::new(
            Arc::clone(&repos.campaigns),
            Arc::clone(&repos.link_writes),
            contexts.clone(),
            audit,
            Arc::clone(&ports.clock),
        ));
        let campaign_queries = Arc::new(CampaignQueryService::new(
            Arc::clone(&repos.campaigns),
            contexts.clone(),
        ));
        let audit_queries = Arc::new(AuditQueryService::new(
            Arc::clone(&repos.audit_logs),
            Arc::clone(&repos.users),
            contexts,
        ));

        Self {
            user_commands,
            user_queries,
            organization_commands,
            organization_queries,
            link_commands,
            link_queries,
            campaign_commands,
            campaign_queries,
            audit_queries,
            token_manager: ports.token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}
