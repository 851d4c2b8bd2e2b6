// src/presentation/http/controllers/public.rs
use crate::application::{
    commands::links::{RedirectDecision, VerifyLinkCommand},
    dto::VerifiedLinkDto,
};
use crate::domain::link::RedirectType;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{ClientInfo, MaybeAuthenticated};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Path,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VerifyRequest {
    #[serde(default)]
    pub password: Option<String>,
}

fn redirect_to(status: StatusCode, location: &str) -> HttpResult<Response> {
    let location = HeaderValue::from_str(location)
        .map_err(|_| HttpError::bad_request("Invalid redirect target"))?;
    Ok((status, [(header::LOCATION, location)]).into_response())
}

#[utoipa::path(
    get,
    path = "/{code}",
    params(("code" = String, Path, description = "Short code; a trailing '+' opens the stats page")),
    responses(
        (status = 301, description = "Permanent redirect to the destination."),
        (status = 302, description = "Redirect to the destination or to a frontend page."),
        (status = 404, description = "Reserved path such as favicon.ico.")
    ),
    security(()),
    tag = "Public"
)]
pub async fn redirect(
    Extension(state): Extension<HttpState>,
    Path(code): Path<String>,
    ClientInfo(visitor): ClientInfo,
) -> HttpResult<Response> {
    let decision = state
        .services
        .link_commands
        .resolve_redirect(&code, visitor)
        .await
        .into_http()?;

    match decision {
        RedirectDecision::NotFound => Ok(StatusCode::NOT_FOUND.into_response()),
        RedirectDecision::Frontend(path) => {
            redirect_to(StatusCode::FOUND, &state.settings.frontend(&path))
        }
        RedirectDecision::Destination { url, redirect_type } => {
            let status = match redirect_type {
                RedirectType::Permanent => StatusCode::MOVED_PERMANENTLY,
                RedirectType::Temporary => StatusCode::FOUND,
            };
            redirect_to(status, &url)
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/verify/{code}",
    params(("code" = String, Path, description = "Short code")),
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Access granted.", body = VerifiedLinkDto),
        (status = 401, description = "Password or login required.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Account not allowed.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security((), ("bearerAuth" = [])),
    tag = "Public"
)]
pub async fn verify(
    Extension(state): Extension<HttpState>,
    Path(code): Path<String>,
    MaybeAuthenticated(user): MaybeAuthenticated,
    ClientInfo(visitor): ClientInfo,
    payload: Option<Json<VerifyRequest>>,
) -> HttpResult<Json<VerifiedLinkDto>> {
    let password = payload.and_then(|Json(body)| body.password);

    state
        .services
        .link_commands
        .verify(&code, user.as_ref(), VerifyLinkCommand { password }, visitor)
        .await
        .into_http()
        .map(Json)
}
