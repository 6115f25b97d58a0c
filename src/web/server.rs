//! Web server for fs-store.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::{Config, ServerConfig, StorageBackendKind, StorageConfig};
use crate::file::{FileService, FileStorageBackend, LocalFileStorage, MemoryFileStorage};
use crate::{FsStoreError, Result};

use super::handlers::AppState;
use super::router::{create_health_router, create_router, create_swagger_router};

/// Open the storage backend selected by the configuration.
pub fn open_backend(config: &StorageConfig) -> Result<Arc<dyn FileStorageBackend>> {
    match config.backend {
        StorageBackendKind::Local => {
            let storage = LocalFileStorage::new(&config.directory)?;
            tracing::info!("File storage initialized at: {}", config.directory);
            Ok(Arc::new(storage))
        }
        StorageBackendKind::Memory => {
            tracing::info!("Using in-memory file storage; files are lost on exit");
            Ok(Arc::new(MemoryFileStorage::new()))
        }
    }
}

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Server configuration.
    server_config: ServerConfig,
}

impl WebServer {
    /// Create a new web server over an already opened backend.
    pub fn new(config: &ServerConfig, storage: Arc<dyn FileStorageBackend>) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| {
                FsStoreError::Config(format!(
                    "invalid server address {}:{}: {e}",
                    config.host, config.port
                ))
            })?;

        Ok(Self {
            addr,
            app_state: Arc::new(AppState::new(FileService::new(storage))),
            server_config: config.clone(),
        })
    }

    /// Create a web server, opening the backend named in the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let storage = open_backend(&config.storage)?;
        Self::new(&config.server, storage)
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_router(self) -> axum::Router {
        create_router(self.app_state, &self.server_config)
            .merge(create_health_router())
            .merge(create_swagger_router())
    }

    /// Run the web server until it fails.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        tracing::info!("Web server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.build_router()).await?;
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        let router = self.build_router();
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
