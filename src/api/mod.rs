//! HTTP binding - axum router, shared state and server loop.

/// Error-to-response mapping
pub mod error;
/// System resource handlers
pub mod systems;

use crate::config::app::ServerConfig;
use crate::core::SystemService;
use crate::errors::Result;
use axum::extract::State;
use axum::http::Method;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// System operations
    pub service: SystemService,
}

impl AppState {
    /// Wraps the service for use as router state.
    #[must_use]
    pub const fn new(service: SystemService) -> Self {
        Self { service }
    }
}

/// Health check payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"` when the process answers
    pub status: &'static str,
    /// Service name
    pub service: &'static str,
    /// RFC 3339 time of the check
    pub timestamp: String,
    /// Whether the database answered a ping
    pub database: bool,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", systems::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = state.service.is_store_reachable().await;
    tracing::debug!(database, "Health check requested");
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        database,
    })
}

/// Serves `router` until Ctrl-C is received.
///
/// # Errors
/// Returns an error if the address is invalid or the listener cannot be bound.
pub async fn serve(config: &ServerConfig, router: Router) -> Result<()> {
    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}
