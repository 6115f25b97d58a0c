//! File service for fs-store.
//!
//! This module provides the use cases:
//! - Upload with validation before any write
//! - Deletion mapped to a not-found outcome
//! - Listing, optionally paginated by cursor

use std::sync::Arc;

use crate::pagination::{paginate, Cursor, Page, PAGE_SIZE};
use crate::{FsStoreError, Result};

use super::entity::{FileEntity, FileId, FileMetadata};
use super::storage::FileStorageBackend;

/// Caller-facing classification of a use case result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation completed.
    Success,
    /// File name too long or content too large.
    InvalidFile,
    /// No file with the requested id.
    FileNotFound,
    /// Pagination cursor could not be decoded.
    InvalidCursor,
}

/// Result of [`FileService::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutput {
    /// File was persisted under the given id.
    Success { id: FileId },
    /// File was rejected; nothing was written.
    InvalidFile,
}

impl SaveOutput {
    /// Outcome classification.
    pub fn outcome(&self) -> Outcome {
        match self {
            SaveOutput::Success { .. } => Outcome::Success,
            SaveOutput::InvalidFile => Outcome::InvalidFile,
        }
    }
}

/// Result of [`FileService::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutput {
    /// File was removed.
    Success,
    /// No file with that id.
    FileNotFound,
}

impl DeleteOutput {
    /// Outcome classification.
    pub fn outcome(&self) -> Outcome {
        match self {
            DeleteOutput::Success => Outcome::Success,
            DeleteOutput::FileNotFound => Outcome::FileNotFound,
        }
    }
}

/// Result of [`FileService::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutput {
    /// One page of files.
    Success(Page),
    /// Cursor was malformed; storage was not read.
    InvalidCursor,
}

impl ListOutput {
    /// Outcome classification.
    pub fn outcome(&self) -> Outcome {
        match self {
            ListOutput::Success(_) => Outcome::Success,
            ListOutput::InvalidCursor => Outcome::InvalidCursor,
        }
    }
}

/// File service owning the storage backend handle.
///
/// Holds no other state, so one instance is shared across all requests.
#[derive(Clone)]
pub struct FileService {
    storage: Arc<dyn FileStorageBackend>,
}

impl FileService {
    /// Create a new FileService over the given backend.
    pub fn new(storage: Arc<dyn FileStorageBackend>) -> Self {
        Self { storage }
    }

    /// Save a file.
    ///
    /// # Validation
    /// - File name: max 100 characters
    /// - Content: max 5MB
    ///
    /// Invalid files never reach the backend and get no id. A name the backend
    /// cannot store (see [`FsStoreError::Validation`]) is also reported as invalid.
    pub fn save(&self, file_name: impl Into<String>, content: Vec<u8>) -> Result<SaveOutput> {
        let file = FileEntity::new(file_name, content);

        if !file.is_valid() {
            tracing::debug!(file_name = %file.file_name, size = file.content.len(), "Rejected invalid file");
            return Ok(SaveOutput::InvalidFile);
        }

        match self.storage.save(&file) {
            Ok(_) => {}
            Err(FsStoreError::Validation(reason)) => {
                tracing::debug!(file_name = %file.file_name, %reason, "Backend rejected file");
                return Ok(SaveOutput::InvalidFile);
            }
            Err(e) => return Err(e),
        }
        tracing::info!(file_id = %file.id, file_name = %file.file_name, "File saved");

        Ok(SaveOutput::Success { id: file.id })
    }

    /// Delete a file.
    ///
    /// Deleting the same id twice yields [`DeleteOutput::FileNotFound`] the second time.
    pub fn delete(&self, id: &str) -> Result<DeleteOutput> {
        // Anything that is not an id cannot name a stored file
        let Some(id) = FileId::parse(id) else {
            return Ok(DeleteOutput::FileNotFound);
        };

        match self.storage.delete(&id) {
            Ok(()) => {
                tracing::info!(file_id = %id, "File deleted");
                Ok(DeleteOutput::Success)
            }
            Err(FsStoreError::NotFound(_)) => Ok(DeleteOutput::FileNotFound),
            Err(e) => Err(e),
        }
    }

    /// Get metadata for every stored file, in backend order.
    pub fn get_all(&self) -> Result<Vec<FileMetadata>> {
        self.storage.get_all()
    }

    /// List one page of files starting after `cursor`.
    ///
    /// The cursor is decoded before storage is read.
    pub fn list(&self, cursor: Option<&str>) -> Result<ListOutput> {
        let cursor = match cursor.map(Cursor::decode).transpose() {
            Ok(cursor) => cursor,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected invalid cursor");
                return Ok(ListOutput::InvalidCursor);
            }
        };

        let files = self.get_all()?;
        Ok(ListOutput::Success(paginate(
            files,
            cursor.as_ref(),
            PAGE_SIZE,
        )))
    }
}
