//! The upload endpoint: bank-export CSV in, ZIP of confirmation PDFs out.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{extract_multipart_csv, validate_file_size};
use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::Response,
};
use chrono::Local;
use potvrzenka_core::AppError;
use potvrzenka_processing::archive::ARCHIVE_DOWNLOAD_NAME;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/confirmations",
    tag = "confirmations",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "ZIP archive with one PDF confirmation per accepted row", body = Vec<u8>, content_type = "application/zip"),
        (status = 400, description = "No file uploaded or unreadable multipart body", body = ErrorResponse),
        (status = 413, description = "Upload exceeds the configured size limit", body = ErrorResponse),
        (status = 500, description = "Rendering or archive assembly failed", body = ErrorResponse)
    )
)]
pub async fn generate_confirmations(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let (csv_bytes, filename) = extract_multipart_csv(multipart).await?;
    validate_file_size(csv_bytes.len(), state.config.max_upload_size_bytes)?;

    tracing::info!(
        filename = %filename,
        size = csv_bytes.len(),
        "Processing bank export upload"
    );

    // PDF rendering is CPU-bound; keep it off the async runtime threads.
    let assets = state.assets.clone();
    let issue_date = Local::now().date_naive();
    let batch = tokio::task::spawn_blocking(move || {
        potvrzenka_processing::generate_confirmations(&csv_bytes, &assets, issue_date)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Processing task failed: {}", e)))??;

    tracing::info!(
        documents = batch.document_count,
        archive_bytes = batch.archive.len(),
        "Generated confirmation archive"
    );

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", ARCHIVE_DOWNLOAD_NAME),
        )
        .body(Body::from(batch.archive))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
