// src/presentation/http/controllers/organizations.rs
use super::OkResponse;
use crate::application::{
    commands::organizations::{
        AcceptInviteCommand, ChangeRoleCommand, CreateInviteCommand, CreateOrganizationCommand,
        UpdateOrganizationCommand,
    },
    error::ApplicationError,
    dto::{
        InviteDto, MemberDto, MembershipDto, MembershipSummaryDto, OrganizationDto,
        OrganizationStatsDto,
    },
};
use crate::domain::{
    organization::{InviteId, OrganizationId},
    user::UserId,
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrganizationRequest {
    pub name: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateOrganizationRequest {
    pub name: Option<String>,
    pub is_link_privacy_enabled: Option<bool>,
    pub allow_member_delete: Option<bool>,
    pub allow_member_edit: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeRoleRequest {
    pub role: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInviteRequest {
    pub email: String,
    #[serde(default = "default_invite_role")]
    pub role: String,
}

fn default_invite_role() -> String {
    "member".into()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AcceptInviteRequest {
    pub token: String,
}

fn org_id(raw: i64) -> HttpResult<OrganizationId> {
    OrganizationId::new(raw).map_err(|_| HttpError::from_error(not_found("Organization not found")))
}

fn user_id(raw: i64) -> HttpResult<UserId> {
    UserId::new(raw).map_err(|_| HttpError::from_error(not_found("Member not found")))
}

fn not_found(msg: &str) -> ApplicationError {
    ApplicationError::not_found(msg)
}

#[utoipa::path(
    get,
    path = "/api/orgs",
    responses((status = 200, description = "Organizations the caller belongs to.", body = [OrganizationDto])),
    tag = "Organizations"
)]
pub async fn list_mine(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<OrganizationDto>>> {
    state
        .services
        .organization_queries
        .list_mine(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/orgs/mine",
    responses((status = 200, description = "The caller's memberships with roles.", body = [MembershipSummaryDto])),
    tag = "Organizations"
)]
pub async fn list_memberships(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<MembershipSummaryDto>>> {
    state
        .services
        .organization_queries
        .list_memberships(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/orgs/all",
    responses((status = 200, description = "Every organization (superuser only).", body = [OrganizationDto])),
    tag = "Organizations"
)]
pub async fn list_all(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<OrganizationDto>>> {
    state
        .services
        .organization_queries
        .list_all(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/orgs",
    request_body = CreateOrganizationRequest,
    responses((status = 200, description = "Organization created.", body = OrganizationDto)),
    tag = "Organizations"
)]
pub async fn create(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateOrganizationRequest>,
) -> HttpResult<Json<OrganizationDto>> {
    state
        .services
        .organization_commands
        .create(&user, CreateOrganizationCommand { name: payload.name })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/orgs/{id}",
    params(("id" = i64, Path, description = "Organization id")),
    responses((status = 200, description = "Organization details.", body = OrganizationDto)),
    tag = "Organizations"
)]
pub async fn get(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<OrganizationDto>> {
    state
        .services
        .organization_queries
        .get(&user, org_id(id)?)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/orgs/{id}",
    params(("id" = i64, Path, description = "Organization id")),
    request_body = UpdateOrganizationRequest,
    responses((status = 200, description = "Organization updated.", body = OrganizationDto)),
    tag = "Organizations"
)]
pub async fn update(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateOrganizationRequest>,
) -> HttpResult<Json<OrganizationDto>> {
    let command = UpdateOrganizationCommand {
        name: payload.name,
        is_link_privacy_enabled: payload.is_link_privacy_enabled,
        allow_member_delete: payload.allow_member_delete,
        allow_member_edit: payload.allow_member_edit,
    };

    state
        .services
        .organization_commands
        .update(&user, org_id(id)?, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/orgs/{id}/stats",
    params(("id" = i64, Path, description = "Organization id")),
    responses((status = 200, description = "Usage counters (superuser only).", body = OrganizationStatsDto)),
    tag = "Organizations"
)]
pub async fn stats(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<OrganizationStatsDto>> {
    state
        .services
        .organization_queries
        .stats(&user, org_id(id)?)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/orgs/{id}/members",
    params(("id" = i64, Path, description = "Organization id")),
    responses((status = 200, description = "Members with their roles.", body = [MemberDto])),
    tag = "Organizations"
)]
pub async fn list_members(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<MemberDto>>> {
    state
        .services
        .organization_queries
        .list_members(&user, org_id(id)?)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/orgs/{id}/members/{user_id}",
    params(
        ("id" = i64, Path, description = "Organization id"),
        ("user_id" = i64, Path, description = "Member user id")
    ),
    responses((status = 200, description = "Member removed.", body = OkResponse)),
    tag = "Organizations"
)]
pub async fn remove_member(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((id, member_id)): Path<(i64, i64)>,
) -> HttpResult<Json<OkResponse>> {
    state
        .services
        .organization_commands
        .remove_member(&user, org_id(id)?, user_id(member_id)?)
        .await
        .into_http()?;
    Ok(OkResponse::ok())
}

#[utoipa::path(
    put,
    path = "/api/orgs/{id}/members/{user_id}/role",
    params(
        ("id" = i64, Path, description = "Organization id"),
        ("user_id" = i64, Path, description = "Member user id")
    ),
    request_body = ChangeRoleRequest,
    responses((status = 200, description = "Role changed.", body = MembershipDto)),
    tag = "Organizations"
)]
pub async fn change_role(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((id, member_id)): Path<(i64, i64)>,
    Json(payload): Json<ChangeRoleRequest>,
) -> HttpResult<Json<MembershipDto>> {
    state
        .services
        .organization_commands
        .change_role(
            &user,
            org_id(id)?,
            user_id(member_id)?,
            ChangeRoleCommand { role: payload.role },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/orgs/{id}/invites",
    params(("id" = i64, Path, description = "Organization id")),
    responses((status = 200, description = "Pending invites.", body = [InviteDto])),
    tag = "Organizations"
)]
pub async fn list_invites(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<InviteDto>>> {
    state
        .services
        .organization_queries
        .list_invites(&user, org_id(id)?)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/orgs/{id}/invites",
    params(("id" = i64, Path, description = "Organization id")),
    request_body = CreateInviteRequest,
    responses((status = 200, description = "Invite created.", body = InviteDto)),
    tag = "Organizations"
)]
pub async fn create_invite(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<CreateInviteRequest>,
) -> HttpResult<Json<InviteDto>> {
    let command = CreateInviteCommand {
        email: payload.email,
        role: payload.role,
    };

    state
        .services
        .organization_commands
        .create_invite(&user, org_id(id)?, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/orgs/{id}/invites/{invite_id}",
    params(
        ("id" = i64, Path, description = "Organization id"),
        ("invite_id" = i64, Path, description = "Invite id")
    ),
    responses((status = 200, description = "Invite revoked.", body = OkResponse)),
    tag = "Organizations"
)]
pub async fn revoke_invite(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path((id, invite_id)): Path<(i64, i64)>,
) -> HttpResult<Json<OkResponse>> {
    let invite_id = InviteId::new(invite_id)
        .map_err(|_| HttpError::from_error(not_found("Invite not found")))?;

    state
        .services
        .organization_commands
        .revoke_invite(&user, org_id(id)?, invite_id)
        .await
        .into_http()?;
    Ok(OkResponse::ok())
}

#[utoipa::path(
    post,
    path = "/api/orgs/invites/accept",
    request_body = AcceptInviteRequest,
    responses((status = 200, description = "Invite accepted.", body = MembershipDto)),
    tag = "Organizations"
)]
pub async fn accept_invite(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<AcceptInviteRequest>,
) -> HttpResult<Json<MembershipDto>> {
    state
        .services
        .organization_commands
        .accept_invite(&user, AcceptInviteCommand { token: payload.token })
        .await
        .into_http()
        .map(Json)
}
