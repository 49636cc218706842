//! Status HTTP Server Module
//!
//! This module sets up the HTTP server for the status API using axum.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::common::{Result, SentryError};
use crate::inspect::VerdictCache;
use crate::status::handlers::{self, StatusState};

/// Status server configuration
#[derive(Debug, Clone)]
pub struct StatusServerConfig {
    /// Listen address for the status API
    pub listen_addr: SocketAddr,
}

impl Default for StatusServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:5598".parse().expect("default listen address"),
        }
    }
}

/// Start the status HTTP server
pub async fn start_status_server(config: StatusServerConfig, cache: Arc<VerdictCache>) -> Result<()> {
    let state = StatusState { cache };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    log::info!("Status API listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| SentryError::Other(e.to_string()))?;

    Ok(())
}

/// Build the application router with all routes
pub fn build_router(state: StatusState) -> Router {
    // Verdict API router
    let api_router = Router::new()
        .route("/verdicts", get(handlers::list_verdicts))
        .route("/verdicts/:target_id", get(handlers::get_verdict))
        .route("/evaluate", post(handlers::evaluate))
        .with_state(state);

    Router::new()
        // UI and liveness routes
        .route("/health", get(handlers::health_check))
        .route("/", get(handlers::serve_ui))

        // Verdict API routes
        .nest("/api", api_router)

        // Add tracing to all routes
        .layer(TraceLayer::new_for_http())
}
