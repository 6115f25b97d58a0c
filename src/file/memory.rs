//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use super::entity::{FileEntity, FileId, FileMetadata};
use super::storage::FileStorageBackend;
use crate::{FsStoreError, Result};

/// Storage backend that keeps files in a map.
///
/// Nothing survives a restart. Used for the `memory` backend setting and in tests,
/// where [`insert`](Self::insert) seeds files with chosen timestamps.
#[derive(Debug, Default)]
pub struct MemoryFileStorage {
    files: RwLock<HashMap<FileId, (FileMetadata, Vec<u8>)>>,
}

impl MemoryFileStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file with explicit metadata, replacing any file with the same id.
    pub fn insert(&self, metadata: FileMetadata, content: Vec<u8>) {
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        files.insert(metadata.id.clone(), (metadata, content));
    }

    /// Get the content of a stored file.
    pub fn content(&self, id: &FileId) -> Option<Vec<u8>> {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files.get(id).map(|(_, content)| content.clone())
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FileStorageBackend for MemoryFileStorage {
    fn save(&self, file: &FileEntity) -> Result<FileMetadata> {
        let now = Utc::now();
        let metadata = FileMetadata {
            id: file.id.clone(),
            file_name: file.file_name.clone(),
            created_at: now,
            updated_at: now,
        };
        self.insert(metadata.clone(), file.content.clone());
        Ok(metadata)
    }

    fn delete(&self, id: &FileId) -> Result<()> {
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        files
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| FsStoreError::NotFound(format!("File: {id}")))
    }

    fn get_all(&self) -> Result<Vec<FileMetadata>> {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        Ok(files.values().map(|(meta, _)| meta.clone()).collect())
    }
}
