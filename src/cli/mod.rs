//! Command-line client for the fs-store Web API.

pub mod client;
pub mod commands;

pub use client::{ApiClient, FileApi, DEFAULT_BASE_URL};
pub use commands::{Cli, Command, CommandExecutor, EXIT_FAILURE, EXIT_SUCCESS};
