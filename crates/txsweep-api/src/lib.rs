//! HTTP API server for transaction deduplication
//!
//! Routes are JSON-only:
//! - GET  /api/health: liveness probe
//! - GET  /api/transactions/duplicates: preview groups without deleting
//! - POST /api/transactions/deduplicate: remove duplicates atomically
//! - POST /api/reload: re-read the backing document file

pub mod error;
pub mod routes;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use txsweep_config::Config;
use txsweep_store::DocumentStore;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dedup::{api_deduplicate, api_duplicates_preview, api_reload};

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/transactions/duplicates", get(api_duplicates_preview))
        .route("/api/transactions/deduplicate", post(api_deduplicate))
        .route("/api/reload", post(api_reload))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the process exits.
pub async fn start_server(config: Config, store: Arc<DocumentStore>) {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { store, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await.unwrap();
    eprintln!("[INFO] Starting txsweep server on http://{}", addr);
    eprintln!("[INFO] Available routes:");
    eprintln!("[INFO]   - GET  /api/health");
    eprintln!("[INFO]   - GET  /api/transactions/duplicates");
    eprintln!("[INFO]   - POST /api/transactions/deduplicate");
    eprintln!("[INFO]   - POST /api/reload");

    match axum::serve(listener, router).await {
        Ok(_) => eprintln!("[INFO] Server stopped gracefully"),
        Err(e) => eprintln!("[ERROR] Server error: {}", e),
    }
}

// ==================== Tests ====================
