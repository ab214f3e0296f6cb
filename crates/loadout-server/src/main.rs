//! Share server entry point for the Loadout build-sharing service.
//!
//! Wires the file-backed record store into the Axum API, starts the
//! background expiry sweeper, and serves until terminated.

use std::sync::Arc;
use std::time::Duration;

use loadout_server::{spawn_cleanup_task, start_server, AppState, ServerConfig};
use loadout_store::{FileBackend, SharedBuildStore, StoreConfig};
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// opens the store document, starts the cleanup scheduler, then serves the
/// share API until the process is terminated.
///
/// # Errors
///
/// Returns an error if initialization or serving fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("loadout-server starting");

    // Load configuration from environment
    let config = ServerConfig::from_env()?;
    info!(
        host = config.host,
        port = config.port,
        data_file = %config.data_file.display(),
        expiry_hours = config.expiry_hours,
        max_records = config.max_records,
        cleanup_interval_secs = config.cleanup_interval_secs,
        "configuration loaded"
    );

    // Open the file-backed store
    let store_config = StoreConfig::default()
        .with_ttl(chrono::Duration::hours(config.expiry_hours))
        .with_max_records(config.max_records)
        .with_cleanup_interval(Duration::from_secs(config.cleanup_interval_secs));
    let store = SharedBuildStore::with_config(FileBackend::new(&config.data_file), store_config);

    let state = Arc::new(AppState::new(store));

    // Start the background sweeper; its first tick reconciles any records
    // that expired while the server was down.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let cleanup = spawn_cleanup_task(
        state.clone(),
        state.store.config().cleanup_interval,
        shutdown_rx,
    );
    info!("cleanup scheduler started");

    let result = start_server(&config, state).await;

    // Stop the sweeper before reporting the serve outcome.
    let _ = shutdown_tx.send(true);
    let _ = cleanup.await;

    result?;
    Ok(())
}
