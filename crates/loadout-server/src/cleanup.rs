//! Background expiry sweeps.
//!
//! The store itself never owns a timer: an external scheduler drives its
//! `tick` entry point so tests can advance logical time deterministically.
//! This module is that scheduler for the server deployment -- a tokio task
//! that ticks the store once at startup and then on a fixed period, until
//! told to shut down.

use std::sync::Arc;
use std::time::Duration;

use loadout_store::DocumentBackend;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::state::AppState;

/// Spawn the periodic cleanup task.
///
/// The first sweep runs immediately (startup reconciliation); subsequent
/// sweeps run every `period`. Sweep failures are logged inside the store's
/// tick and never terminate the task. Send `true` through the paired
/// [`watch::Sender`] to stop the task.
pub fn spawn_cleanup_task<B: DocumentBackend + 'static>(
    state: Arc<AppState<B>>,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    state.store.tick().await;
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::debug!("cleanup task stopped");
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use loadout_store::{MemoryBackend, SharedBuildStore, StoreConfig};

    use super::*;

    #[tokio::test]
    async fn shutdown_signal_stops_the_task() {
        let store = SharedBuildStore::new(MemoryBackend::new());
        let state = Arc::new(AppState::new(store));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_cleanup_task(state, Duration::from_secs(3600), shutdown_rx);
        shutdown_tx.send(true).unwrap();

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn dropped_sender_stops_the_task() {
        let store = SharedBuildStore::new(MemoryBackend::new());
        let state = Arc::new(AppState::new(store));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_cleanup_task(state, Duration::from_secs(3600), shutdown_rx);
        drop(shutdown_tx);

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn startup_sweep_runs_immediately() {
        let store = SharedBuildStore::new(MemoryBackend::new());
        let state = Arc::new(AppState::new(store));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_cleanup_task(state.clone(), Duration::from_secs(3600), shutdown_rx);

        // The immediate first tick performs a sweep, which stamps the
        // document's last-cleanup instant.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let stats = state.store.stats().await;
        assert!(stats.last_cleanup.is_some());

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
