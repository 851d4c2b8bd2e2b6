// src/presentation/http/extractors.rs
use crate::{
    application::{
        commands::links::VisitorInfo, dto::AuthenticatedUser, error::ApplicationError,
    },
    domain::organization::OrganizationId,
    presentation::http::state::HttpState,
};
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use std::net::SocketAddr;

use super::error::HttpError;

pub const ORG_HEADER: &str = "x-org-id";

#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedUser);

#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<AuthenticatedUser>);

/// Organization requested through the `X-Org-Id` header.
#[derive(Debug, Clone, Copy)]
pub struct OrgHeader(pub Option<OrganizationId>);

/// Visitor details recorded with a click.
#[derive(Debug, Clone)]
pub struct ClientInfo(pub VisitorInfo);

fn http_state(parts: &Parts) -> Result<HttpState, HttpError> {
    parts.extensions.get::<HttpState>().cloned().ok_or_else(|| {
        HttpError::from_error(ApplicationError::infrastructure(
            "application state missing",
        ))
    })
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let app_state = http_state(parts)?;

        let header = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::unauthorized(
                    "Not authenticated",
                ))
            })?;

        let user = app_state
            .services
            .authenticate(header.token())
            .await
            .map_err(HttpError::from_error)?;

        Ok(Self(user))
    }
}

impl<S> FromRequestParts<S> for MaybeAuthenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    /// A token that fails verification is treated like an anonymous caller.
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let app_state = http_state(parts)?;

        let Some(header) = parts.headers.typed_get::<Authorization<Bearer>>() else {
            return Ok(Self(None));
        };

        match app_state.services.authenticate(header.token()).await {
            Ok(user) => Ok(Self(Some(user))),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring invalid optional bearer token");
                Ok(Self(None))
            }
        }
    }
}

impl<S> FromRequestParts<S> for OrgHeader
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parse_org_header(&parts.headers).map(Self)
    }
}

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(Self(VisitorInfo {
            ip: client_ip(&parts.headers, peer),
            user_agent: header_str(&parts.headers, header::USER_AGENT.as_str()),
            referrer: header_str(&parts.headers, header::REFERER.as_str()),
        }))
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub fn parse_org_header(headers: &HeaderMap) -> Result<Option<OrganizationId>, HttpError> {
    let Some(raw) = header_str(headers, ORG_HEADER) else {
        return Ok(None);
    };
    raw.parse::<i64>()
        .ok()
        .and_then(|id| OrganizationId::new(id).ok())
        .map(Some)
        .ok_or_else(|| HttpError::bad_request("Invalid X-Org-Id header"))
}

/// Proxy headers win over the socket peer: Cloudflare first, then the first
/// `X-Forwarded-For` hop, then `X-Real-IP`.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    header_str(headers, "cf-connecting-ip")
        .or_else(|| {
            header_str(headers, "x-forwarded-for").and_then(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .find(|hop| !hop.is_empty())
                    .map(str::to_string)
            })
        })
        .or_else(|| header_str(headers, "x-real-ip"))
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn client_ip_prefers_proxy_headers_in_order() {
        let peer: SocketAddr = "10.0.0.9:5555".parse().unwrap();

        let all = headers(&[
            ("cf-connecting-ip", "1.1.1.1"),
            ("x-forwarded-for", "2.2.2.2, 3.3.3.3"),
            ("x-real-ip", "4.4.4.4"),
        ]);
        assert_eq!(client_ip(&all, Some(peer)).as_deref(), Some("1.1.1.1"));

        let forwarded = headers(&[("x-forwarded-for", "2.2.2.2, 3.3.3.3"), ("x-real-ip", "4.4.4.4")]);
        assert_eq!(client_ip(&forwarded, Some(peer)).as_deref(), Some("2.2.2.2"));

        let real = headers(&[("x-real-ip", "4.4.4.4")]);
        assert_eq!(client_ip(&real, Some(peer)).as_deref(), Some("4.4.4.4"));

        assert_eq!(client_ip(&HeaderMap::new(), Some(peer)).as_deref(), Some("10.0.0.9"));
        assert_eq!(client_ip(&HeaderMap::new(), None), None);
    }

    #[test]
    fn org_header_must_be_a_positive_integer() {
        assert_eq!(parse_org_header(&HeaderMap::new()).unwrap(), None);
        assert_eq!(
            parse_org_header(&headers(&[("x-org-id", "12")])).unwrap(),
            Some(OrganizationId(12))
        );
        assert!(parse_org_header(&headers(&[("x-org-id", "abc")])).is_err());
        assert!(parse_org_header(&headers(&[("x-org-id", "0")])).is_err());
    }
}
