//! Response DTOs for Web API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::datetime::to_rfc3339;
use crate::file::FileMetadata;
use crate::pagination::Page;

/// Generic API response wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response data.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// File upload response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileUploadResponse {
    /// Id of the stored file.
    pub id: String,
}

/// One file in a listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileListItem {
    /// File id.
    pub id: String,
    /// Original file name.
    pub file_name: String,
    /// Creation time (RFC3339).
    pub created_at: String,
    /// Last modification time (RFC3339).
    pub updated_at: String,
}

impl From<&FileMetadata> for FileListItem {
    fn from(meta: &FileMetadata) -> Self {
        Self {
            id: meta.id.to_string(),
            file_name: meta.file_name.clone(),
            created_at: to_rfc3339(&meta.created_at),
            updated_at: to_rfc3339(&meta.updated_at),
        }
    }
}

/// One page of files.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileListResponse {
    /// Files on this page, oldest first.
    pub items: Vec<FileListItem>,
    /// Cursor for the next page; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl From<&Page> for FileListResponse {
    fn from(page: &Page) -> Self {
        Self {
            items: page.items.iter().map(FileListItem::from).collect(),
            next_cursor: page.next_cursor.as_ref().map(|c| c.encode()),
        }
    }
}
