//! League Server - HTTP API for schedule generation
//!
//! This crate provides the web backend:
//! - REST API for schedule generation and cancellation
//! - Availability pre-check for the editing grid
//! - Static file serving for the front end

mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use routes::schedule::ScheduleRequest;
pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    /// Searches still running after this long are cancelled
    pub search_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8003,
            static_dir: "web".to_string(),
            search_timeout: Duration::from_secs(60),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Schedule API
        .route("/api/schedule", post(routes::schedule::generate))
        .route("/api/schedule/:id/cancel", post(routes::schedule::cancel))
        // Availability grid
        .route("/api/availability", post(routes::availability::check))
        // Shared state
        .with_state(state)
        // Static file serving
        .fallback_service(static_service)
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new(config.search_timeout));
    let router = create_router(&config, state);

    tracing::info!("League Server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);
    tracing::info!("Search timeout: {:?}", config.search_timeout);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
