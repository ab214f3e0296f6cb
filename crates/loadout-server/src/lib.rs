//! Share API server for the Loadout build-sharing service.
//!
//! Exposes the ephemeral record store over HTTP: producers POST a build and
//! receive a share identifier, consumers GET the build back by identifier
//! until its two-hour TTL lapses. A background task owned by the server
//! lifecycle sweeps expired records on a fixed period.
//!
//! # Modules
//!
//! - [`state`] -- Shared application state (the record store)
//! - [`handlers`] -- REST endpoint handlers
//! - [`router`] -- Axum router assembly (CORS + tracing layers)
//! - [`cleanup`] -- Background expiry-sweep task
//! - [`server`] -- TCP bind and serve lifecycle
//! - [`config`] -- Environment-variable configuration
//! - [`error`] -- API error to JSON envelope mapping

pub mod cleanup;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use cleanup::spawn_cleanup_task;
pub use config::ServerConfig;
pub use error::ApiError;
pub use router::build_router;
pub use server::{start_server, ServerError};
pub use state::AppState;
