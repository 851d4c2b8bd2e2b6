// src/presentation/http/controllers/campaigns.rs
use super::OkResponse;
use crate::application::{
    commands::campaigns::{CreateCampaignCommand, UpdateCampaignCommand},
    dto::CampaignDto,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, OrgHeader};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCampaignRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/campaigns",
    responses((status = 200, description = "Campaigns visible to the caller.", body = [CampaignDto])),
    tag = "Campaigns"
)]
pub async fn list_campaigns(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    OrgHeader(org): OrgHeader,
) -> HttpResult<Json<Vec<CampaignDto>>> {
    state
        .services
        .campaign_queries
        .list(&user, org)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/campaigns",
    request_body = CreateCampaignRequest,
    responses((status = 200, description = "Campaign created.", body = CampaignDto)),
    tag = "Campaigns"
)]
pub async fn create_campaign(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    OrgHeader(org): OrgHeader,
    Json(payload): Json<CreateCampaignRequest>,
) -> HttpResult<Json<CampaignDto>> {
    let command = CreateCampaignCommand {
        name: payload.name,
        color: payload.color,
    };

    state
        .services
        .campaign_commands
        .create(&user, org, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/campaigns/{id}",
    params(("id" = i64, Path, description = "Campaign id")),
    responses((status = 200, description = "Campaign details.", body = CampaignDto)),
    tag = "Campaigns"
)]
pub async fn get_campaign(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    OrgHeader(org): OrgHeader,
    Path(id): Path<i64>,
) -> HttpResult<Json<CampaignDto>> {
    state
        .services
        .campaign_queries
        .get(&user, org, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/campaigns/{id}",
    params(("id" = i64, Path, description = "Campaign id")),
    request_body = UpdateCampaignRequest,
    responses((status = 200, description = "Campaign updated.", body = CampaignDto)),
    tag = "Campaigns"
)]
pub async fn update_campaign(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    OrgHeader(org): OrgHeader,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCampaignRequest>,
) -> HttpResult<Json<CampaignDto>> {
    let command = UpdateCampaignCommand {
        name: payload.name,
        color: payload.color,
    };

    state
        .services
        .campaign_commands
        .update(&user, org, id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/campaigns/{id}",
    params(("id" = i64, Path, description = "Campaign id")),
    responses((status = 200, description = "Campaign deleted; its links are detached.", body = OkResponse)),
    tag = "Campaigns"
)]
pub async fn delete_campaign(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    OrgHeader(org): OrgHeader,
    Path(id): Path<i64>,
) -> HttpResult<Json<OkResponse>> {
    state
        .services
        .campaign_commands
        .delete(&user, org, id)
        .await
        .into_http()?;
    Ok(OkResponse::ok())
}
