//! Axum router construction for the share API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled so the talent-calculator frontend can call the API cross-origin.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use loadout_store::DocumentBackend;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the share server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `POST /api/data` -- store a build
/// - `GET /api/data/:id` -- load a shared build
/// - `GET /api/stats` -- store statistics
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router<B: DocumentBackend + 'static>(state: Arc<AppState<B>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index::<B>))
        // REST API
        .route("/api/data", post(handlers::save_build::<B>))
        .route("/api/data/{id}", get(handlers::get_build::<B>))
        .route("/api/stats", get(handlers::get_stats::<B>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
