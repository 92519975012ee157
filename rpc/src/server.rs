//! Router construction and serving.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use artchain_orchestrator::ValidationFacade;

use crate::handlers;

/// Uploads carry raw image bytes; allow up to 25 MiB.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared state for API handlers.
pub struct ApiState {
    pub facade: Arc<ValidationFacade>,
}

impl ApiState {
    pub fn new(facade: Arc<ValidationFacade>) -> Self {
        Self { facade }
    }
}

/// Build the API router with all routes.
pub fn router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/upload", post(handlers::upload))
        .route("/upload-ipfs", post(handlers::upload_ipfs))
        .route("/validate", post(handlers::validate))
        .route("/artworks", get(handlers::artworks_cached))
        .route("/api/artworks", get(handlers::artworks_ledger))
        .route("/ai-vlm", post(handlers::ai_vlm))
        .route("/resync", post(handlers::resync))
        .route("/ready", get(handlers::ready))
        .route("/info", get(handlers::info))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn serve(state: Arc<ApiState>, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "HTTP API listening");
    axum::serve(listener, router(state)).await
}
