// src/presentation/http/controllers/auth.rs
use crate::application::{
    commands::users::{ExternalCallbackCommand, LoginUserCommand, RegisterUserCommand},
    dto::{AuthTokenDto, UserDto},
    error::ApplicationError,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Query,
    response::Redirect,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: AuthTokenDto,
    pub user: UserDto,
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created.", body = UserDto),
        (status = 409, description = "Username or email taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(()),
    tag = "Auth"
)]
pub async fn register(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<RegisterRequest>,
) -> HttpResult<Json<UserDto>> {
    let command = RegisterUserCommand {
        username: payload.username,
        email: payload.email,
        password: payload.password,
        full_name: payload.full_name,
    };

    state
        .services
        .user_commands
        .register(command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access token issued.", body = LoginResponse),
        (status = 401, description = "Invalid credentials.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(()),
    tag = "Auth"
)]
pub async fn login(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<LoginRequest>,
) -> HttpResult<Json<LoginResponse>> {
    let command = LoginUserCommand {
        username: payload.username,
        password: payload.password,
    };

    let result = state
        .services
        .user_commands
        .login(command)
        .await
        .into_http()?;

    tracing::info!(user_id = %result.user.id, "user logged in");

    Ok(Json(LoginResponse {
        token: result.token,
        user: result.user,
    }))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
}

#[utoipa::path(
    get,
    path = "/api/auth/login",
    responses(
        (status = 307, description = "Redirect to the identity provider."),
        (status = 404, description = "External sign-in is not configured.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(()),
    tag = "Auth"
)]
pub async fn external_login(Extension(state): Extension<HttpState>) -> HttpResult<Redirect> {
    let url = state
        .services
        .user_commands
        .begin_external_login()
        .await
        .into_http()?;
    Ok(Redirect::temporary(&url))
}

/// Finishes an identity provider sign-in and hands the access token to the
/// web app as `?token=…&username=…`.
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    params(CallbackParams),
    responses(
        (status = 307, description = "Redirect to the web app with the access token."),
        (status = 400, description = "Unknown state or failed code exchange.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(()),
    tag = "Auth"
)]
pub async fn external_callback(
    Extension(state): Extension<HttpState>,
    Query(params): Query<CallbackParams>,
) -> HttpResult<Redirect> {
    let command = ExternalCallbackCommand {
        code: params.code,
        state: params.state,
    };
    let result = state
        .services
        .user_commands
        .complete_external_login(command)
        .await
        .into_http()?;

    let target = Url::parse_with_params(
        &state.settings.frontend_url,
        &[
            ("token", result.token.token.as_str()),
            ("username", result.user.username.as_str()),
        ],
    )
    .map_err(|err| ApplicationError::infrastructure(format!("frontend url: {err}")))
    .into_http()?;

    Ok(Redirect::temporary(target.as_str()))
}
