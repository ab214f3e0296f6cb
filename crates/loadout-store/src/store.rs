//! The ephemeral record store.
//!
//! [`SharedBuildStore`] owns create/read/expire of build snapshots keyed by
//! a generated share identifier. Every record carries a fixed time-to-live;
//! expired records are reconciled lazily on the read path, inline during
//! saves, and by periodic sweeps driven through [`SharedBuildStore::tick`].
//!
//! # Consistency model
//!
//! Every operation is a whole-document read-modify-write against the
//! backend: it reads the latest persisted state, mutates the in-memory
//! copy, and replaces the document in one write. Writers (`save`,
//! `cleanup_expired`, lazy deletion) are serialized behind a write lock;
//! lookups that do not mutate share a read lock. Cooperating store
//! instances over the same file race last-writer-wins, which is an
//! accepted, bounded inconsistency for ephemeral data.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use loadout_types::{
    BuildSnapshot, SavedBuild, ShareId, StoreDocument, StoreStats, StoredRecord, SCHEMA_VERSION,
};
use tokio::sync::RwLock;
use validator::Validate;

use crate::backend::DocumentBackend;
use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::error::StoreError;

/// Ephemeral mapping from share identifier to build snapshot, with
/// TTL-based visibility and a capacity bound.
///
/// Records are never mutated after creation: every save mints a fresh
/// identifier, and a record leaves the store only through lazy deletion,
/// a sweep, or capacity eviction.
pub struct SharedBuildStore<B> {
    backend: RwLock<B>,
    config: StoreConfig,
    clock: Arc<dyn Clock>,
}

impl<B: DocumentBackend> SharedBuildStore<B> {
    /// Create a store with the default configuration (2-hour TTL, 100
    /// records, 30-minute sweep period) and the system clock.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    /// Create a store with a custom configuration and the system clock.
    pub fn with_config(backend: B, config: StoreConfig) -> Self {
        Self::with_clock(backend, config, Arc::new(SystemClock))
    }

    /// Create a store with an injected clock (deterministic tests, external
    /// schedulers).
    pub fn with_clock(backend: B, config: StoreConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend: RwLock::new(backend),
            config,
            clock,
        }
    }

    /// The configuration this store was initialized with.
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Store a snapshot and return its freshly minted identifier and expiry.
    ///
    /// Runs an inline expiry sweep and, when the capacity bound is
    /// exceeded, evicts lowest-expiry-first until the bound holds again.
    /// The updated document is persisted before the identifier is returned;
    /// on a failed write nothing is kept in memory, so the caller can
    /// retry safely (each retry mints a new identifier).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for an empty or over-long name,
    /// [`StoreError::Persistence`] / [`StoreError::Serialization`] when the
    /// document write fails.
    pub async fn save(&self, snapshot: BuildSnapshot) -> Result<SavedBuild, StoreError> {
        snapshot
            .validate()
            .map_err(|err| StoreError::Validation(err.to_string()))?;

        let now = self.clock.now();
        let expires_at = now.checked_add_signed(self.config.ttl).ok_or_else(|| {
            StoreError::Config("expiry instant exceeds the representable time range".to_owned())
        })?;

        let mut backend = self.backend.write().await;
        let mut document = self.read_or_empty(&*backend);

        let share_id = mint_share_id(&document);
        let name = snapshot.name.clone();
        document.specs.insert(
            share_id,
            StoredRecord {
                snapshot,
                share_id,
                shared_at: now,
                expires_at,
            },
        );

        let swept = sweep_expired(&mut document, now);
        let evicted = evict_over_capacity(&mut document, self.config.max_records);
        self.finalize_sweep(&mut document, now);

        backend.write_document(&document)?;

        tracing::debug!(%share_id, name, swept, evicted, "build saved");
        Ok(SavedBuild {
            share_id,
            expires_at,
        })
    }

    /// Look up a live record and return its snapshot, store metadata
    /// stripped.
    ///
    /// Returns `None` for an absent or expired identifier. An expired
    /// record found on this path is deleted and the deletion persisted
    /// best-effort: a failed persist is logged but still yields `None`.
    /// A document read failure degrades to the empty-state view.
    pub async fn load(&self, share_id: ShareId) -> Option<BuildSnapshot> {
        {
            let backend = self.backend.read().await;
            let document = self.read_or_empty(&*backend);
            match document.specs.get(&share_id) {
                None => return None,
                Some(record) if !record.is_expired(self.clock.now()) => {
                    tracing::debug!(%share_id, name = %record.snapshot.name, "build loaded");
                    return Some(record.snapshot.clone());
                }
                // Expired: fall through to delete under the write lock.
                Some(_) => {}
            }
        }

        self.delete_expired(share_id).await;
        None
    }

    /// Remove every expired record in one sweep and persist once.
    ///
    /// Returns the number of records removed; a second immediate call
    /// removes nothing and returns 0. The sweep re-reads the latest
    /// persisted document and only judges records against the instant the
    /// scan started, so records created after that instant are never
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] / [`StoreError::Serialization`]
    /// when the document write fails.
    pub async fn cleanup_expired(&self) -> Result<usize, StoreError> {
        let now = self.clock.now();
        let mut backend = self.backend.write().await;
        let mut document = self.read_or_empty(&*backend);

        let removed = sweep_expired(&mut document, now);
        self.finalize_sweep(&mut document, now);
        backend.write_document(&document)?;

        if removed > 0 {
            tracing::info!(removed, "expiry sweep removed builds");
        }
        Ok(removed)
    }

    /// Store introspection counters. Pure read: never mutates or persists.
    ///
    /// The `expired` count covers records past expiry that no sweep has
    /// removed yet; those records are already unreachable via [`Self::load`].
    pub async fn stats(&self) -> StoreStats {
        let backend = self.backend.read().await;
        let document = self.read_or_empty(&*backend);
        let now = self.clock.now();

        let expired = document
            .specs
            .values()
            .filter(|record| record.is_expired(now))
            .count();
        let live_expiries = || {
            document
                .specs
                .values()
                .filter(|record| !record.is_expired(now))
                .map(|record| record.expires_at)
        };
        let size_bytes = serde_json::to_vec(&document).map_or(0, |bytes| bytes.len());

        StoreStats {
            total: document.specs.len(),
            expired,
            size_bytes,
            oldest_expiry: live_expiries().min(),
            newest_expiry: live_expiries().max(),
            last_cleanup: document.metadata.last_cleanup,
        }
    }

    /// Scheduler entry point: run one expiry sweep, logging failures.
    ///
    /// Background cleanup is maintenance, not a user-visible operation, so
    /// errors are logged and swallowed here.
    pub async fn tick(&self) {
        match self.cleanup_expired().await {
            Ok(removed) => tracing::debug!(removed, "cleanup tick completed"),
            Err(err) => tracing::warn!(error = %err, "cleanup tick failed"),
        }
    }

    /// Delete `share_id` if it is still expired, persisting best-effort.
    async fn delete_expired(&self, share_id: ShareId) {
        let mut backend = self.backend.write().await;
        let mut document = self.read_or_empty(&*backend);
        let now = self.clock.now();

        // Re-check under the write lock: the record may have been swept or
        // replaced while the read lock was released.
        let still_expired = document
            .specs
            .get(&share_id)
            .is_some_and(|record| record.is_expired(now));
        if !still_expired {
            return;
        }

        document.specs.remove(&share_id);
        document.metadata.total_specs = document.specs.len();
        match backend.write_document(&document) {
            Ok(()) => tracing::debug!(%share_id, "expired build deleted on load"),
            // Deletion is cleanup, not a precondition: the record stays
            // unreachable either way and a later sweep will retry.
            Err(err) => tracing::warn!(
                %share_id, error = %err, "failed to persist expired-build deletion"
            ),
        }
    }

    /// Read the latest persisted document, degrading to the empty state on
    /// failure.
    fn read_or_empty(&self, backend: &B) -> StoreDocument {
        let empty = || StoreDocument::empty(self.config.ttl.num_hours());
        match backend.read_document() {
            Ok(Some(document)) => document,
            Ok(None) => empty(),
            Err(err) => {
                tracing::error!(error = %err, "failed to read store document, degrading to empty state");
                empty()
            }
        }
    }

    /// Refresh bookkeeping after a sweep ran at `now`.
    fn finalize_sweep(&self, document: &mut StoreDocument, now: DateTime<Utc>) {
        document.metadata.total_specs = document.specs.len();
        document.metadata.last_cleanup = Some(now);
        document.metadata.expiry_hours = self.config.ttl.num_hours();
        document.metadata.version = SCHEMA_VERSION.to_owned();
    }
}

/// Mint an identifier not currently present in the document.
///
/// Collisions are negligible at 128 random bits; the loop exists so that a
/// detected one regenerates instead of silently replacing a live record.
fn mint_share_id(document: &StoreDocument) -> ShareId {
    loop {
        let candidate = ShareId::random();
        if !document.specs.contains_key(&candidate) {
            return candidate;
        }
    }
}

/// Drop every record whose expiry has passed; returns how many were removed.
fn sweep_expired(document: &mut StoreDocument, now: DateTime<Utc>) -> usize {
    let before = document.specs.len();
    document.specs.retain(|_, record| !record.is_expired(now));
    before.saturating_sub(document.specs.len())
}

/// Enforce the capacity bound by evicting lowest-expiry-first.
///
/// Under a fixed TTL an earlier expiry implies an earlier save, so this
/// keeps the most recently shared records without consulting a second
/// timestamp.
fn evict_over_capacity(document: &mut StoreDocument, max_records: usize) -> usize {
    let excess = document.specs.len().saturating_sub(max_records);
    if excess == 0 {
        return 0;
    }

    let mut by_expiry: Vec<(DateTime<Utc>, ShareId)> = document
        .specs
        .values()
        .map(|record| (record.expires_at, record.share_id))
        .collect();
    by_expiry.sort_unstable();

    let mut evicted = 0usize;
    for (_, share_id) in by_expiry.into_iter().take(excess) {
        if document.specs.remove(&share_id).is_some() {
            evicted = evicted.saturating_add(1);
        }
    }
    tracing::debug!(evicted, max_records, "capacity bound enforced");
    evicted
}
