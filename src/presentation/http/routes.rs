// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{audit, auth, campaigns, export, links, organizations, public, users},
    middleware::rate_limit::limited,
    openapi::{self, StatusResponse, WelcomeResponse},
};
use axum::{
    Extension, Json, Router,
    http::{HeaderName, HeaderValue, Method, header},
    routing::{delete, get, post, put},
};
use std::time::Duration;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: HttpState) -> Router {
    let rate_limit = state.settings.rate_limit;

    let throttled = limited(
        Router::new()
            .route(
                "/api/auth/login",
                get(auth::external_login).post(auth::login),
            )
            .route("/api/auth/callback", get(auth::external_callback))
            .route("/api/verify/{code}", post(public::verify))
            .route("/{code}", get(public::redirect)),
        rate_limit,
    );

    Router::new()
        .merge(openapi::docs_router())
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/users/me", get(users::me))
        .route("/api/users/request-access", post(users::request_access))
        .route("/api/users/requests", get(users::list_access_requests))
        .route("/api/users/{id}/approve", post(users::approve))
        .route("/api/users/{id}/reject", post(users::reject))
        .route(
            "/api/orgs",
            get(organizations::list_mine).post(organizations::create),
        )
        .route("/api/orgs/mine", get(organizations::list_memberships))
        .route("/api/orgs/all", get(organizations::list_all))
        .route(
            "/api/orgs/invites/accept",
            post(organizations::accept_invite),
        )
        .route(
            "/api/orgs/{id}",
            get(organizations::get).put(organizations::update),
        )
        .route("/api/orgs/{id}/stats", get(organizations::stats))
        .route("/api/orgs/{id}/members", get(organizations::list_members))
        .route(
            "/api/orgs/{id}/members/{user_id}",
            delete(organizations::remove_member),
        )
        .route(
            "/api/orgs/{id}/members/{user_id}/role",
            put(organizations::change_role),
        )
        .route(
            "/api/orgs/{id}/invites",
            get(organizations::list_invites).post(organizations::create_invite),
        )
        .route(
            "/api/orgs/{id}/invites/{invite_id}",
            delete(organizations::revoke_invite),
        )
        .route(
            "/api/links",
            get(links::list_links).post(links::create_link),
        )
        .route(
            "/api/links/bulk",
            post(links::bulk_create_links).put(links::bulk_update_links),
        )
        .route(
            "/api/links/{id}",
            put(links::update_link).delete(links::delete_link),
        )
        // Same parameter name as the sibling route; the value is a short code.
        .route("/api/links/{id}/stats", get(links::link_stats))
        .route(
            "/api/campaigns",
            get(campaigns::list_campaigns).post(campaigns::create_campaign),
        )
        .route(
            "/api/campaigns/{id}",
            get(campaigns::get_campaign)
                .put(campaigns::update_campaign)
                .delete(campaigns::delete_campaign),
        )
        .route("/api/audit", get(audit::list_audit_logs))
        .route(
            "/api/export/csv",
            get(export::export_csv).post(export::import_csv),
        )
        .merge(throttled)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.settings.allowed_origins))
        .layer(Extension(state))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin.trim_end_matches('/')).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-org-id"),
        ])
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting with the project name.", body = crate::presentation::http::openapi::WelcomeResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn root(Extension(state): Extension<HttpState>) -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: format!("Welcome to {} API", state.settings.project_name),
    })
}
