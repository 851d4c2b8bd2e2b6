// src/presentation/http/controllers/audit.rs
use crate::application::{dto::AuditLogDto, queries::audit::ListAuditLogsQuery};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, OrgHeader};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Query};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAuditParams {
    pub action: Option<String>,
    pub target_type: Option<String>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/audit",
    params(ListAuditParams),
    responses((status = 200, description = "Audit entries, newest first.", body = [AuditLogDto])),
    tag = "Audit"
)]
pub async fn list_audit_logs(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    OrgHeader(org): OrgHeader,
    Query(params): Query<ListAuditParams>,
) -> HttpResult<Json<Vec<AuditLogDto>>> {
    let query = ListAuditLogsQuery {
        action: params.action,
        target_type: params.target_type,
        skip: params.skip,
        limit: params.limit,
    };

    state
        .services
        .audit_queries
        .list(&actor, org, query)
        .await
        .into_http()
        .map(Json)
}
