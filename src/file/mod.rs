//! File management module for fs-store.
//!
//! This module provides:
//! - The file entity and its acceptance rule
//! - The storage backend abstraction with local-directory and in-memory backends
//! - The use case service that ties validation, storage and listing together

mod entity;
mod memory;
mod service;
mod storage;

pub use entity::{FileEntity, FileId, FileMetadata};
pub use memory::MemoryFileStorage;
pub use service::{DeleteOutput, FileService, ListOutput, Outcome, SaveOutput};
pub use storage::{FileStorageBackend, LocalFileStorage, MAX_STORED_NAME_BYTES};

/// Maximum length for a file name (in characters).
pub const MAX_FILENAME_LENGTH: usize = 100;

/// Maximum content size (5MB).
pub const MAX_CONTENT_SIZE: usize = 5 * 1024 * 1024;

/// Length of a file id (lowercase hex characters).
pub const FILE_ID_LENGTH: usize = 32;
