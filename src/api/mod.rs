//! Read-only JSON API over a loaded dataset.
//!
//! Provides three GET endpoints:
//! - `/report` - the feeder report for a view given as query parameters
//! - `/substations` - substation dropdown entries with their feeders
//! - `/feeders` - feeder dropdown entries, optionally scoped to a substation

mod handlers;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::report::engine::ReportEngine;

/// Immutable application state shared across all request handlers.
///
/// Built once after the dataset loads and wrapped in `Arc`; no locks are
/// needed because every request only reads it.
pub struct AppState {
    /// Dataset, rules and substation index.
    pub engine: ReportEngine,
    /// Block detail used when a request does not say.
    pub show_blocks: bool,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/report", get(handlers::get_report))
        .route("/substations", get(handlers::get_substations))
        .route("/feeders", get(handlers::get_feeders))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process ends.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
