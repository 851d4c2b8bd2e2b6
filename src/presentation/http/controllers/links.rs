// src/presentation/http/controllers/links.rs
use super::{double_option, double_option_timestamp};
use crate::application::{
    commands::links::{BulkUpdateLinksCommand, LinkInput},
    dto::{LinkDto, LinkStatsDto},
    queries::links::ListLinksQuery,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, OrgHeader};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListLinksParams {
    pub search: Option<String>,
    pub campaign_id: Option<i64>,
    pub is_active: Option<bool>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

/// Body of link create and update requests. On update, omitted fields keep
/// their value and `null` clears nullable ones.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LinkRequest {
    pub original_url: Option<String>,
    pub short_code: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub tags: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub campaign_id: Option<Option<i64>>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "double_option_timestamp")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub expires_at: Option<Option<DateTime<Utc>>>,
    /// An empty string removes the password.
    pub password: Option<String>,
    pub require_login: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Vec<String>>)]
    pub allowed_emails: Option<Option<Vec<String>>>,
    pub redirect_type: Option<i32>,
    pub track_activity: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub utm_source: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub utm_medium: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub utm_campaign: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub utm_term: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub utm_content: Option<Option<String>>,
}

impl From<LinkRequest> for LinkInput {
    fn from(request: LinkRequest) -> Self {
        Self {
            original_url: request.original_url,
            short_code: request.short_code,
            title: request.title,
            tags: request.tags,
            campaign_id: request.campaign_id,
            is_active: request.is_active,
            expires_at: request.expires_at,
            password: request.password,
            require_login: request.require_login,
            allowed_emails: request.allowed_emails,
            redirect_type: request.redirect_type,
            track_activity: request.track_activity,
            utm_source: request.utm_source,
            utm_medium: request.utm_medium,
            utm_campaign: request.utm_campaign,
            utm_term: request.utm_term,
            utm_content: request.utm_content,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BulkUpdateRequest {
    pub link_ids: Vec<i64>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub campaign_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub tags: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option_timestamp")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub expires_at: Option<Option<DateTime<Utc>>>,
    pub redirect_type: Option<i32>,
    pub track_activity: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub utm_source: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub utm_medium: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub utm_campaign: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub utm_term: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub utm_content: Option<Option<String>>,
}

impl From<BulkUpdateRequest> for BulkUpdateLinksCommand {
    fn from(request: BulkUpdateRequest) -> Self {
        Self {
            link_ids: request.link_ids,
            is_active: request.is_active,
            campaign_id: request.campaign_id,
            tags: request.tags,
            expires_at: request.expires_at,
            redirect_type: request.redirect_type,
            track_activity: request.track_activity,
            utm_source: request.utm_source,
            utm_medium: request.utm_medium,
            utm_campaign: request.utm_campaign,
            utm_term: request.utm_term,
            utm_content: request.utm_content,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/links",
    params(ListLinksParams, ("X-Org-Id" = Option<i64>, Header, description = "Organization to act in")),
    responses((status = 200, description = "Links visible to the caller, newest first.", body = [LinkDto])),
    tag = "Links"
)]
pub async fn list_links(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    OrgHeader(org): OrgHeader,
    Query(params): Query<ListLinksParams>,
) -> HttpResult<Json<Vec<LinkDto>>> {
    let query = ListLinksQuery {
        search: params.search,
        campaign_id: params.campaign_id,
        is_active: params.is_active,
        skip: params.skip,
        limit: params.limit,
    };

    state
        .services
        .link_queries
        .list(&user, org, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/links",
    request_body = LinkRequest,
    responses(
        (status = 200, description = "Link created.", body = LinkDto),
        (status = 400, description = "Invalid input or duplicate code.", body = crate::presentation::http::error::ErrorResponse),
        (status = 422, description = "Short code contains '+'.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Links"
)]
pub async fn create_link(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    OrgHeader(org): OrgHeader,
    Json(payload): Json<LinkRequest>,
) -> HttpResult<Json<LinkDto>> {
    state
        .services
        .link_commands
        .create(&user, org, payload.into())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/links/bulk",
    request_body = Vec<LinkRequest>,
    responses((status = 200, description = "Links created; duplicates skipped.", body = [LinkDto])),
    tag = "Links"
)]
pub async fn bulk_create_links(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    OrgHeader(org): OrgHeader,
    Json(payload): Json<Vec<LinkRequest>>,
) -> HttpResult<Json<Vec<LinkDto>>> {
    let inputs = payload.into_iter().map(LinkInput::from).collect();

    state
        .services
        .link_commands
        .bulk_create(&user, org, inputs)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/links/bulk",
    request_body = BulkUpdateRequest,
    responses((status = 200, description = "Links updated.", body = [LinkDto])),
    tag = "Links"
)]
pub async fn bulk_update_links(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    OrgHeader(org): OrgHeader,
    Json(payload): Json<BulkUpdateRequest>,
) -> HttpResult<Json<Vec<LinkDto>>> {
    state
        .services
        .link_commands
        .bulk_update(&user, org, payload.into())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/links/{id}",
    params(("id" = i64, Path, description = "Link id")),
    request_body = LinkRequest,
    responses((status = 200, description = "Link updated.", body = LinkDto)),
    tag = "Links"
)]
pub async fn update_link(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    OrgHeader(org): OrgHeader,
    Path(id): Path<i64>,
    Json(payload): Json<LinkRequest>,
) -> HttpResult<Json<LinkDto>> {
    state
        .services
        .link_commands
        .update(&user, org, id, payload.into())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/links/{id}",
    params(("id" = i64, Path, description = "Link id")),
    responses((status = 200, description = "Link soft-deleted.", body = LinkDto)),
    tag = "Links"
)]
pub async fn delete_link(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    OrgHeader(org): OrgHeader,
    Path(id): Path<i64>,
) -> HttpResult<Json<LinkDto>> {
    state
        .services
        .link_commands
        .delete(&user, org, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/links/{code}/stats",
    params(("code" = String, Path, description = "Short code")),
    responses((status = 200, description = "Click analytics for the link.", body = LinkStatsDto)),
    tag = "Links"
)]
pub async fn link_stats(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    OrgHeader(org): OrgHeader,
    Path(code): Path<String>,
) -> HttpResult<Json<LinkStatsDto>> {
    state
        .services
        .link_queries
        .stats(&user, org, &code)
        .await
        .into_http()
        .map(Json)
}
