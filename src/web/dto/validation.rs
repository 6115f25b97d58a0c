//! Validation utilities for Web API DTOs.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use validator::{Validate, ValidationError};

use super::request::{UploadFileRequest, UPLOAD_FIELD};
use crate::web::error::ApiError;

/// A multipart extractor that reads the uploaded file and validates it.
///
/// Fields other than `file` are ignored. If several `file` fields are sent,
/// the last one wins.
pub struct ValidatedUpload(pub UploadFileRequest);

#[async_trait]
impl<S> FromRequest<S> for ValidatedUpload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid multipart data: {e}")))?;

        let mut upload = None;
        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::warn!("Failed to read multipart field: {}", e);
            ApiError::bad_request("Invalid multipart data")
        })? {
            if field.name() != Some(UPLOAD_FIELD) {
                continue;
            }

            let file_name = field.file_name().unwrap_or_default().to_string();
            let content = field.bytes().await.map_err(|e| {
                tracing::warn!("Failed to read file content: {}", e);
                ApiError::bad_request("Failed to read file")
            })?;

            upload = Some(UploadFileRequest {
                file_name,
                content: content.to_vec(),
            });
        }

        let upload = upload.ok_or_else(|| ApiError::bad_request("No file provided"))?;
        upload.validate().map_err(ApiError::from_validation_errors)?;

        Ok(ValidatedUpload(upload))
    }
}

// ============================================================================
// Custom Validators
// ============================================================================

/// Validate a stored file name: non-empty, no path separators, no control characters.
pub fn valid_file_name(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("not_empty").with_message("File name is required.".into()));
    }
    if value.contains(['/', '\\']) {
        return Err(ValidationError::new("no_path_separators")
            .with_message("File name must not contain path separators.".into()));
    }
    if value.chars().any(char::is_control) {
        return Err(ValidationError::new("no_control_chars")
            .with_message("File name must not contain control characters.".into()));
    }
    Ok(())
}
