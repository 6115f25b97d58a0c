//! Error types for fs-store.

use thiserror::Error;

/// Common error type for fs-store.
///
/// These are the unexpected failures. Expected outcomes such as an invalid
/// upload or a missing file are reported through the use case output types
/// in [`crate::file`] instead.
#[derive(Error, Debug)]
pub enum FsStoreError {
    /// I/O error from the storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Validation error for user input or stored keys.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client error (CLI side).
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for FsStoreError {
    fn from(e: reqwest::Error) -> Self {
        FsStoreError::Http(e.to_string())
    }
}

/// Result type alias for fs-store operations.
pub type Result<T> = std::result::Result<T, FsStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = FsStoreError::Validation("file name too long".to_string());
        assert_eq!(err.to_string(), "validation error: file name too long");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = FsStoreError::NotFound("file".to_string());
        assert_eq!(err.to_string(), "file not found");
    }

    #[test]
    fn test_config_error_display() {
        let err = FsStoreError::Config("unknown backend".to_string());
        assert_eq!(err.to_string(), "configuration error: unknown backend");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: FsStoreError = io_err.into();
        assert!(matches!(err, FsStoreError::Io(_)));
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(FsStoreError::Http("connection refused".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
