//! Request DTOs for Web API.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validation::valid_file_name;

/// Multipart form field that carries the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// Query parameters for listing files.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListFilesQuery {
    /// Opaque cursor returned by the previous page. Absent or empty means the first page.
    #[serde(default)]
    pub cursor: Option<String>,
}

impl ListFilesQuery {
    /// The cursor, treating an empty value the same as no cursor.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// File upload extracted from a multipart body.
#[derive(Debug, Validate)]
pub struct UploadFileRequest {
    /// Original file name.
    #[validate(
        length(max = 100, message = "File name must not be longer than 100."),
        custom(function = "valid_file_name")
    )]
    pub file_name: String,
    /// Raw content. Limit is `MAX_CONTENT_SIZE` (5 MiB).
    #[validate(length(max = 5242880, message = "File size must not be larger than 5MB."))]
    pub content: Vec<u8>,
}

/// Multipart upload form, for API documentation.
#[derive(Debug, ToSchema)]
pub struct UploadFileForm {
    /// The file to store.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
