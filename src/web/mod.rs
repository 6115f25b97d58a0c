//! Web API module for fs-store.
//!
//! Exposes upload, delete and paginated listing of stored files over HTTP.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
