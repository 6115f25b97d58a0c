//! API handlers for the file store.

pub mod file;

pub use file::*;

use crate::file::FileService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// File use cases.
    pub files: FileService,
}

impl AppState {
    /// Create a new application state.
    pub fn new(files: FileService) -> Self {
        Self { files }
    }
}
