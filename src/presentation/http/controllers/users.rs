// src/presentation/http/controllers/users.rs
use crate::application::{commands::users::ReviewAccessCommand, dto::UserDto};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};

#[utoipa::path(
    get,
    path = "/api/users/me",
    responses((status = 200, description = "The calling user.", body = UserDto)),
    tag = "Users"
)]
pub async fn me(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_queries
        .me(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/users/request-access",
    responses(
        (status = 200, description = "Request recorded as pending.", body = UserDto),
        (status = 400, description = "Already approved or already pending.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn request_access(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_commands
        .request_access(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/users/requests",
    responses(
        (status = 200, description = "Users waiting for approval.", body = [UserDto]),
        (status = 403, description = "Superuser only.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn list_access_requests(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<UserDto>>> {
    state
        .services
        .user_queries
        .list_access_requests(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/approve",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 200, description = "User approved.", body = UserDto)),
    tag = "Users"
)]
pub async fn approve(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_commands
        .approve(&user, ReviewAccessCommand { user_id: id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/reject",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 200, description = "User rejected.", body = UserDto)),
    tag = "Users"
)]
pub async fn reject(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_commands
        .reject(&user, ReviewAccessCommand { user_id: id })
        .await
        .into_http()
        .map(Json)
}
