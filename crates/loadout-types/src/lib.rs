//! Shared type definitions for the Loadout build-sharing service.
//!
//! This crate is the single source of truth for all types used across the
//! Loadout workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the talent-calculator frontend.
//!
//! # Modules
//!
//! - [`ids`] -- The canonical share identifier and its strict parser
//! - [`build`] -- Build snapshots, stored records, the persisted document,
//!   and store statistics
//! - [`share`] -- Share-link construction and query-parameter extraction

pub mod build;
pub mod ids;
pub mod share;

// Re-export all public types at crate root for convenience.
pub use build::{
    AssignedPoints, BuildSnapshot, DocumentMetadata, SavedBuild, StoreDocument, StoreStats,
    StoredRecord, SCHEMA_VERSION,
};
pub use ids::{ParseShareIdError, ShareId};
pub use share::{extract_share_id, share_url, LOCAL_SHARE_PARAM, REMOTE_SHARE_PARAM};
