//! Opaque pagination cursor codec.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::file::{FileId, FileMetadata};

/// Separator between the timestamp and id segments.
const SEPARATOR: char = '_';

/// Reasons a cursor string fails to decode. Checked in declaration order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// Not exactly two non-empty segments.
    #[error("cursor must consist of two non-empty segments")]
    Malformed,

    /// First segment is not a 64-bit integer.
    #[error("cursor timestamp is not a 64-bit integer")]
    InvalidTimestamp,

    /// Second segment is not a file id.
    #[error("cursor id is not a valid file id")]
    InvalidId,
}

/// A position in the `(created_at millis, id)` order.
///
/// Encoded as `"{created_at_millis}_{id}"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    /// Creation time in Unix milliseconds.
    pub created_at_millis: i64,
    /// File id.
    pub id: FileId,
}

impl Cursor {
    /// Create a cursor from its parts.
    pub fn new(created_at_millis: i64, id: FileId) -> Self {
        Self {
            created_at_millis,
            id,
        }
    }

    /// Cursor positioned at the given file.
    pub fn from_file(file: &FileMetadata) -> Self {
        Self::new(file.created_at_millis(), file.id.clone())
    }

    /// Encode into the opaque token.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Decode an opaque token.
    pub fn decode(s: &str) -> Result<Self, CursorError> {
        let mut segments = s.split(SEPARATOR);
        let (Some(millis), Some(id), None) = (segments.next(), segments.next(), segments.next())
        else {
            return Err(CursorError::Malformed);
        };
        if millis.is_empty() || id.is_empty() {
            return Err(CursorError::Malformed);
        }

        let created_at_millis = millis
            .parse::<i64>()
            .map_err(|_| CursorError::InvalidTimestamp)?;
        let id = FileId::parse(id).ok_or(CursorError::InvalidId)?;

        Ok(Self::new(created_at_millis, id))
    }

    /// Whether the file sorts strictly after this position.
    pub fn precedes(&self, file: &FileMetadata) -> bool {
        (file.created_at_millis(), file.id.as_str())
            > (self.created_at_millis, self.id.as_str())
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.created_at_millis, self.id)
    }
}

impl FromStr for Cursor {
    type Err = CursorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
