//! fs-store CLI client
//!
//! Uploads, deletes and lists files on an fs-store server.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use fs_store::cli::{ApiClient, Cli, CommandExecutor, EXIT_FAILURE};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Quiet unless RUST_LOG says otherwise
    fs_store::logging::init_console_only("warn");

    let api = match ApiClient::new(&cli.base_url) {
        Ok(api) => api,
        Err(e) => {
            tracing::debug!("Failed to build HTTP client: {}", e);
            eprintln!("Something is wrong. Please check your settings.");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let mut executor = CommandExecutor::new(api, io::stdout(), io::stderr());
    ExitCode::from(executor.execute(&cli.command).await)
}
