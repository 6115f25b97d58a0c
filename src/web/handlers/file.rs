//! File handlers for Web API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::file::{DeleteOutput, ListOutput, SaveOutput};
use crate::web::dto::{
    ApiResponse, FileListResponse, FileUploadResponse, ListFilesQuery, UploadFileForm,
    ValidatedUpload,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Run blocking storage work off the async runtime.
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| {
            tracing::error!("Storage task failed: {}", e);
            ApiError::internal("An internal error occurred")
        })?
        .map_err(ApiError::from)
}

/// POST /api/files - Upload a file.
///
/// Request body: multipart/form-data with a "file" field.
#[utoipa::path(
    post,
    path = "/api/files",
    tag = "files",
    request_body(content = UploadFileForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored, id wrapped in `data`", body = FileUploadResponse),
        (status = 400, description = "File name too long, file too large, or file invalid")
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    ValidatedUpload(upload): ValidatedUpload,
) -> Result<Json<ApiResponse<FileUploadResponse>>, ApiError> {
    let files = state.files.clone();
    let output = run_blocking(move || files.save(upload.file_name, upload.content)).await?;

    match output {
        SaveOutput::Success { id } => Ok(Json(ApiResponse::new(FileUploadResponse {
            id: id.to_string(),
        }))),
        SaveOutput::InvalidFile => Err(ApiError::bad_request("File is invalid.")),
    }
}

/// DELETE /api/files/:id - Delete a file.
#[utoipa::path(
    delete,
    path = "/api/files/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "File id")
    ),
    responses(
        (status = 204, description = "File deleted"),
        (status = 404, description = "File does not exist")
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let files = state.files.clone();
    let output = run_blocking(move || files.delete(&id)).await?;

    match output {
        DeleteOutput::Success => Ok(StatusCode::NO_CONTENT),
        DeleteOutput::FileNotFound => Err(ApiError::not_found("File does not exist.")),
    }
}

/// GET /api/files - List files, one page at a time.
#[utoipa::path(
    get,
    path = "/api/files",
    tag = "files",
    params(ListFilesQuery),
    responses(
        (status = 200, description = "One page of files wrapped in `data`", body = FileListResponse),
        (status = 400, description = "Cursor is invalid")
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<ApiResponse<FileListResponse>>, ApiError> {
    let files = state.files.clone();
    let cursor = query.cursor().map(str::to_string);
    let output = run_blocking(move || files.list(cursor.as_deref())).await?;

    match output {
        ListOutput::Success(page) => Ok(Json(ApiResponse::new(FileListResponse::from(&page)))),
        ListOutput::InvalidCursor => Err(ApiError::bad_request("Cursor is invalid.")),
    }
}
