//! Router configuration for Web API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::dto::{FileListItem, FileListResponse, FileUploadResponse, UploadFileForm};
use super::handlers::{self, delete_file, list_files, upload_file, AppState};
use super::middleware::{create_cors_layer, security_headers};
use crate::config::ServerConfig;

/// OpenAPI document for the file API.
#[derive(OpenApi)]
#[openapi(
    info(title = "fs-store", description = "Minimal file storage API"),
    paths(handlers::upload_file, handlers::delete_file, handlers::list_files),
    components(schemas(FileUploadResponse, FileListItem, FileListResponse, UploadFileForm)),
    tags((name = "files", description = "Upload, delete and list files"))
)]
pub struct ApiDoc;

/// Create the main API router.
///
/// The body limit sits above the upload size limit so oversized files reach
/// validation and get a 400 instead of a bare 413.
pub fn create_router(app_state: Arc<AppState>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/api/files", get(list_files).post(upload_file))
        .route("/api/files/:id", delete(delete_file))
        .layer(DefaultBodyLimit::max(config.max_body_size()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&config.cors_origins))
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the Swagger UI router serving the OpenAPI document.
pub fn create_swagger_router() -> Router {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
