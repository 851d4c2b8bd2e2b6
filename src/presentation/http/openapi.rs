// src/presentation/http/openapi.rs
use axum::Router;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::auth::register,
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::external_login,
        crate::presentation::http::controllers::auth::external_callback,
        crate::presentation::http::controllers::users::me,
        crate::presentation::http::controllers::users::request_access,
        crate::presentation::http::controllers::users::list_access_requests,
        crate::presentation::http::controllers::users::approve,
        crate::presentation::http::controllers::users::reject,
        crate::presentation::http::controllers::organizations::list_mine,
        crate::presentation::http::controllers::organizations::list_memberships,
        crate::presentation::http::controllers::organizations::list_all,
        crate::presentation::http::controllers::organizations::create,
        crate::presentation::http::controllers::organizations::get,
        crate::presentation::http::controllers::organizations::update,
        crate::presentation::http::controllers::organizations::stats,
        crate::presentation::http::controllers::organizations::list_members,
        crate::presentation::http::controllers::organizations::remove_member,
        crate::presentation::http::controllers::organizations::change_role,
        crate::presentation::http::controllers::organizations::list_invites,
        crate::presentation::http::controllers::organizations::create_invite,
        crate::presentation::http::controllers::organizations::revoke_invite,
        crate::presentation::http::controllers::organizations::accept_invite,
        crate::presentation::http::controllers::links::list_links,
        crate::presentation::http::controllers::links::create_link,
        crate::presentation::http::controllers::links::bulk_create_links,
        crate::presentation::http::controllers::links::bulk_update_links,
        crate::presentation::http::controllers::links::update_link,
        crate::presentation::http::controllers::links::delete_link,
        crate::presentation::http::controllers::links::link_stats,
        crate::presentation::http::controllers::campaigns::list_campaigns,
        crate::presentation::http::controllers::campaigns::create_campaign,
        crate::presentation::http::controllers::campaigns::get_campaign,
        crate::presentation::http::controllers::campaigns::update_campaign,
        crate::presentation::http::controllers::campaigns::delete_campaign,
        crate::presentation::http::controllers::audit::list_audit_logs,
        crate::presentation::http::controllers::export::export_csv,
        crate::presentation::http::controllers::export::import_csv,
        crate::presentation::http::controllers::public::verify,
        crate::presentation::http::controllers::public::redirect,
        super::routes::health,
        super::routes::root
    ),
    components(
        schemas(
            StatusResponse,
            WelcomeResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::OkResponse,
            crate::presentation::http::controllers::auth::RegisterRequest,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::auth::LoginResponse,
            crate::presentation::http::controllers::organizations::CreateOrganizationRequest,
            crate::presentation::http::controllers::organizations::UpdateOrganizationRequest,
            crate::presentation::http::controllers::organizations::ChangeRoleRequest,
            crate::presentation::http::controllers::organizations::CreateInviteRequest,
            crate::presentation::http::controllers::organizations::AcceptInviteRequest,
            crate::presentation::http::controllers::links::LinkRequest,
            crate::presentation::http::controllers::links::BulkUpdateRequest,
            crate::presentation::http::controllers::campaigns::CreateCampaignRequest,
            crate::presentation::http::controllers::campaigns::UpdateCampaignRequest,
            crate::presentation::http::controllers::public::VerifyRequest,
            crate::application::dto::UserDto,
            crate::application::dto::AuthTokenDto,
            crate::application::dto::OrganizationDto,
            crate::application::dto::OrganizationStatsDto,
            crate::application::dto::MembershipDto,
            crate::application::dto::MembershipSummaryDto,
            crate::application::dto::MemberDto,
            crate::application::dto::InviteDto,
            crate::application::dto::LinkDto,
            crate::application::dto::LinkStatsDto,
            crate::application::dto::DailyClicksDto,
            crate::application::dto::CountryCountDto,
            crate::application::dto::ReferrerCountDto,
            crate::application::dto::DeviceCountDto,
            crate::application::dto::VerifiedLinkDto,
            crate::application::dto::CampaignDto,
            crate::application::dto::AuditLogDto,
            crate::application::dto::ImportReportDto
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "Profile and access requests"),
        (name = "Organizations", description = "Organizations, members and invites"),
        (name = "Links", description = "Short link management and analytics"),
        (name = "Campaigns", description = "Link grouping"),
        (name = "Audit", description = "Organization audit trail"),
        (name = "Export", description = "CSV import and export"),
        (name = "Public", description = "Redirects and protected link verification"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Linkforge API",
        description = "Multi-tenant URL shortener",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if !urls.iter().any(|url| url == "http://localhost:3071") {
            urls.push("http://localhost:3071".to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new().merge(swagger).merge(redoc)
}
