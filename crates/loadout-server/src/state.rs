//! Shared application state for the share API server.
//!
//! [`AppState`] holds the record store behind the generic persistence
//! backend. Production wires in the file backend; tests wire in the memory
//! backend with a manual clock.

use loadout_store::{DocumentBackend, SharedBuildStore};

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
pub struct AppState<B> {
    /// The record store serving every endpoint.
    pub store: SharedBuildStore<B>,
}

impl<B: DocumentBackend> AppState<B> {
    /// Create application state around an initialized store.
    pub const fn new(store: SharedBuildStore<B>) -> Self {
        Self { store }
    }
}
