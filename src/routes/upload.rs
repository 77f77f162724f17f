use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::{
    dto::import_dto::ImportResponse,
    error::{Error, Result},
    middleware::auth::RecruiterUser,
    services::{
        import_service::NO_FILE_SELECTED,
        template_service::{TemplateService, TEMPLATE_FILENAME},
    },
    AppState,
};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Import candidates from the multipart `file` field (.csv or .xlsx).
#[utoipa::path(
    post,
    path = "/api/recruiter/bulk-upload",
    responses(
        (status = 200, description = "Import finished; see success and error counts"),
        (status = 400, description = "No file, unsupported type or unreadable file"),
        (status = 403, description = "Not a recruiter")
    )
)]
#[axum::debug_handler]
pub async fn bulk_upload(
    State(state): State<AppState>,
    RecruiterUser(recruiter): RecruiterUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        upload = Some((filename, data));
    }

    let (filename, data) = match upload {
        Some((filename, data)) if !filename.is_empty() => (filename, data),
        _ => return Err(Error::BadRequest(NO_FILE_SELECTED.to_string())),
    };

    info!(recruiter_id = %recruiter.id, filename = %filename, bytes = data.len(), "bulk upload received");
    let summary = state.import_service.import_file(&filename, &data).await?;
    Ok(Json(ImportResponse::from(summary)))
}

/// Download the example spreadsheet for bulk upload.
#[utoipa::path(
    get,
    path = "/api/recruiter/template",
    responses(
        (status = 200, description = "XLSX template with two example rows"),
        (status = 403, description = "Not a recruiter")
    )
)]
#[axum::debug_handler(state = AppState)]
pub async fn download_template(_recruiter: RecruiterUser) -> Result<impl IntoResponse> {
    let buffer = TemplateService::generate_candidate_template()?;
    let disposition = format!("attachment; filename=\"{}\"", TEMPLATE_FILENAME);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
