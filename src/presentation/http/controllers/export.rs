// src/presentation/http/controllers/export.rs
use crate::application::{commands::links::ImportLinksCommand, dto::ImportReportDto};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, OrgHeader};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Multipart,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};

const UPLOAD_FIELD: &str = "file";

#[utoipa::path(
    get,
    path = "/api/export/csv",
    responses((status = 200, description = "CSV attachment of the caller's links.", content_type = "text/csv", body = String)),
    tag = "Export"
)]
pub async fn export_csv(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    OrgHeader(org): OrgHeader,
) -> HttpResult<Response> {
    let export = state
        .services
        .link_queries
        .export_csv(&user, org)
        .await
        .into_http()?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        export.filename
    ))
    .map_err(|_| HttpError::bad_request("Invalid export filename"))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/api/export/csv",
    request_body(content = String, content_type = "multipart/form-data", description = "CSV upload in the `file` field"),
    responses(
        (status = 200, description = "Import summary.", body = ImportReportDto),
        (status = 400, description = "Missing file or not a CSV.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Export"
)]
pub async fn import_csv(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    OrgHeader(org): OrgHeader,
    mut multipart: Multipart,
) -> HttpResult<Json<ImportReportDto>> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| HttpError::bad_request(err.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content = field
            .bytes()
            .await
            .map_err(|err| HttpError::bad_request(err.body_text()))?;
        upload = Some(ImportLinksCommand {
            filename,
            content: content.to_vec(),
        });
        break;
    }

    let command = upload.ok_or_else(|| HttpError::bad_request("No file uploaded"))?;

    state
        .services
        .link_commands
        .import_csv(&user, org, command)
        .await
        .into_http()
        .map(Json)
}
