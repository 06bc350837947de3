//! Axum router construction for the aggregation API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled so a browser-hosted presentation layer can call it directly.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the aggregation API.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /api/health` -- liveness and counters
/// - `POST /api/aggregate` -- aggregated revisions and reviewers
/// - `POST /api/aggregate/summary` -- status counts per revision
///
/// CORS is configured to allow any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // REST API
        .route("/api/health", get(handlers::health))
        .route("/api/aggregate", post(handlers::aggregate))
        .route("/api/aggregate/summary", post(handlers::aggregate_summary))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
