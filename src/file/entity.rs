//! File entity types.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{FILE_ID_LENGTH, MAX_CONTENT_SIZE, MAX_FILENAME_LENGTH};

/// Unique file identifier: 32 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(String);

impl FileId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parse an id, returning `None` unless it is exactly 32 lowercase hex characters.
    pub fn parse(s: &str) -> Option<Self> {
        if Self::is_valid(s) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    /// Check whether a string is a syntactically valid file id.
    pub fn is_valid(s: &str) -> bool {
        s.len() == FILE_ID_LENGTH && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct FileEntity {
    /// File id, fixed at creation.
    pub id: FileId,
    /// User-supplied file name.
    pub file_name: String,
    /// File content.
    pub content: Vec<u8>,
}

impl FileEntity {
    /// Create a new entity with a freshly generated id.
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            id: FileId::generate(),
            file_name: file_name.into(),
            content,
        }
    }

    /// Check the acceptance rule: name length and content size caps.
    ///
    /// Pure; performs no I/O.
    pub fn is_valid(&self) -> bool {
        self.file_name.chars().count() <= MAX_FILENAME_LENGTH
            && self.content.len() <= MAX_CONTENT_SIZE
    }
}

/// Metadata for a persisted file. Content is never carried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// File id.
    pub id: FileId,
    /// Original file name.
    pub file_name: String,
    /// When the file was written.
    pub created_at: DateTime<Utc>,
    /// When the file was last modified.
    pub updated_at: DateTime<Utc>,
}

impl FileMetadata {
    /// Creation time as Unix milliseconds, the resolution used for ordering.
    pub fn created_at_millis(&self) -> i64 {
        self.created_at.timestamp_millis()
    }
}
