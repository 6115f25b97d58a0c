//! fs-store - minimal file storage service
//!
//! Stores uploaded files on an unordered backend and serves them back as a
//! stable, cursor-paginated listing over HTTP. A small CLI client drives the
//! same API.

pub mod cli;
pub mod config;
pub mod datetime;
pub mod error;
pub mod file;
pub mod logging;
pub mod pagination;
pub mod web;

pub use config::Config;
pub use error::{FsStoreError, Result};
pub use file::{FileId, FileMetadata, FileService, FileStorageBackend};
pub use pagination::{Cursor, Page};
pub use web::WebServer;
