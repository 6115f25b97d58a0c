//! Configuration module for fs-store.

use serde::Deserialize;
use std::path::Path;

use crate::file::MAX_CONTENT_SIZE;
use crate::{FsStoreError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins. Empty means any origin without credentials.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Maximum request body size in megabytes.
    #[serde(default = "default_max_body_size")]
    pub max_body_size_mb: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_body_size() -> usize {
    8
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            max_body_size_mb: default_max_body_size(),
        }
    }
}

impl ServerConfig {
    /// Maximum request body size in bytes.
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

/// Storage backend kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// One file per entity in a local directory.
    Local,
    /// Process memory; nothing persists.
    Memory,
}

/// File storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Which backend to use.
    #[serde(default = "default_backend")]
    pub backend: StorageBackendKind,
    /// Path to the file storage directory (local backend).
    #[serde(default = "default_storage_directory")]
    pub directory: String,
}

fn default_backend() -> StorageBackendKind {
    StorageBackendKind::Local
}

fn default_storage_directory() -> String {
    "data/files".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            directory: default_storage_directory(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/fs-store.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| FsStoreError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `FS_STORE_STORAGE_DIR`: Override the storage directory
    /// - `FS_STORE_PORT`: Override the listening port
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("FS_STORE_STORAGE_DIR") {
            if !dir.is_empty() {
                self.storage.directory = dir;
            }
        }

        if let Ok(port) = std::env::var("FS_STORE_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid FS_STORE_PORT value: {}", port),
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The local backend has an empty directory
    /// - The body limit cannot hold a maximum-size upload
    pub fn validate(&self) -> Result<()> {
        if self.storage.backend == StorageBackendKind::Local && self.storage.directory.is_empty() {
            return Err(FsStoreError::Config(
                "storage.directory must be set for the local backend".to_string(),
            ));
        }

        if self.server.max_body_size() <= MAX_CONTENT_SIZE {
            return Err(FsStoreError::Config(format!(
                "server.max_body_size_mb must exceed the {}MB upload limit",
                MAX_CONTENT_SIZE / 1024 / 1024
            )));
        }

        Ok(())
    }
}
