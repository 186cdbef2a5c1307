//! Multipart file uploads.

use std::time::Instant;

use axum::extract::{Multipart, State};
use serde::Serialize;

use legalconnect_types::integration::{FileUpload, UploadedFile};

use crate::http::error::AppError;
use crate::http::response::{ApiResult, ok};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResult {
    pub files: Vec<UploadedFile>,
}

/// POST /api/v1/uploads - Every file part is stored; other parts are ignored.
pub async fn upload_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<UploadResult> {
    let start = Instant::now();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("failed to read '{filename}': {e}")))?;
        files.push(FileUpload {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    if files.is_empty() {
        return Err(AppError::BadRequest("no files in upload".to_string()));
    }

    let uploaded = state.upload_service.upload_many(&files).await?;
    Ok(ok(UploadResult { files: uploaded }, start))
}
