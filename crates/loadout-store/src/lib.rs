//! Ephemeral record store for the Loadout build-sharing service.
//!
//! One component, two deployment shapes: the embedded store keeps its
//! document in process memory, the server store keeps it as a JSON file on
//! disk. Both run the same TTL, capacity, and cleanup policy through
//! [`SharedBuildStore`]; the persistence layer is a pluggable
//! [`DocumentBackend`] adapter.
//!
//! # Architecture
//!
//! ```text
//! save/load/cleanup/stats
//!     |
//!     +-- whole-document read-modify-write --> DocumentBackend
//!         |-- FileBackend    (JSON document on disk, atomic replace)
//!         +-- MemoryBackend  (in-process document slot)
//! ```
//!
//! # Modules
//!
//! - [`store`] -- The record store: save, load, expiry sweeps, eviction,
//!   statistics
//! - [`backend`] -- Persistence adapters over the single store document
//! - [`clock`] -- Injectable time source for deterministic expiry
//! - [`config`] -- TTL, capacity, and sweep-period configuration
//! - [`error`] -- Shared error types

pub mod backend;
pub mod clock;
pub mod config;
pub mod error;
pub mod store;

// Re-export primary types for convenience.
pub use backend::{DocumentBackend, FileBackend, MemoryBackend};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::StoreConfig;
pub use error::StoreError;
pub use store::SharedBuildStore;
