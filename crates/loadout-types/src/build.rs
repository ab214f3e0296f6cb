//! Build snapshots and the persisted store document.
//!
//! A [`BuildSnapshot`] is the externally meaningful payload a user shares:
//! a named talent-point assignment for one character class. The store wraps
//! it in a [`StoredRecord`] (snapshot plus share metadata) and keeps all
//! records inside a single [`StoreDocument`] that is read and replaced as a
//! whole on every mutation.
//!
//! Wire and on-disk field names are camelCase to match the JSON document
//! consumed by the dashboard frontend.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::ids::ShareId;

/// Current schema version tag written into every persisted document.
pub const SCHEMA_VERSION: &str = "1.0";

/// Talent point assignment: specialization name, then tier identifier, then
/// talent slot index, each mapping to a non-negative point count.
pub type AssignedPoints = BTreeMap<String, BTreeMap<String, BTreeMap<String, u32>>>;

/// A user-authored talent build, as submitted to and returned from the store.
///
/// The store does not enforce game rules (`available_points` versus
/// `total_points`, per-talent maxima, tier gating); those are the producer's
/// responsibility. The only field the store validates is `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct BuildSnapshot {
    /// Human-readable label for the build.
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    /// Selected character class (matches an external enumeration, not
    /// validated here).
    pub class_name: String,
    /// Points assigned per specialization, tier, and talent slot.
    pub assigned_points: AssignedPoints,
    /// Total points the build spends.
    pub total_points: u32,
    /// Points still unspent.
    pub available_points: u32,
    /// Instant the build was authored. Defaults to the time of submission
    /// when the producer omits it.
    #[serde(default = "Utc::now")]
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// A build snapshot as held by the store: payload plus share metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct StoredRecord {
    /// The user-supplied build payload.
    #[serde(flatten)]
    pub snapshot: BuildSnapshot,
    /// Identifier under which this record is shared.
    pub share_id: ShareId,
    /// Instant the record was created in the store.
    #[ts(type = "string")]
    pub shared_at: DateTime<Utc>,
    /// Instant after which the record is logically gone.
    #[ts(type = "string")]
    pub expires_at: DateTime<Utc>,
}

impl StoredRecord {
    /// Whether this record has passed its expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Bookkeeping metadata persisted alongside the records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct DocumentMetadata {
    /// Instant of the most recent expiry sweep, if one has run.
    #[ts(type = "string | null")]
    pub last_cleanup: Option<DateTime<Utc>>,
    /// Schema version tag for forward migration of the persisted shape.
    /// Documents written before versioning read back as the current version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Number of records at the time of the last write.
    #[serde(default)]
    pub total_specs: usize,
    /// Configured time-to-live, in hours.
    #[serde(default = "default_expiry_hours")]
    pub expiry_hours: i64,
}

fn default_version() -> String {
    SCHEMA_VERSION.to_owned()
}

const fn default_expiry_hours() -> i64 {
    2
}

/// The whole persisted store state: every live record plus metadata.
///
/// Always read and written as one unit ("single-writer, whole-document
/// replace"); no per-record persistence exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StoreDocument {
    /// Live records keyed by share identifier.
    pub specs: BTreeMap<ShareId, StoredRecord>,
    /// Store bookkeeping.
    pub metadata: DocumentMetadata,
}

impl StoreDocument {
    /// Create an empty document for a store configured with the given TTL.
    pub fn empty(expiry_hours: i64) -> Self {
        Self {
            specs: BTreeMap::new(),
            metadata: DocumentMetadata {
                last_cleanup: None,
                version: SCHEMA_VERSION.to_owned(),
                total_specs: 0,
                expiry_hours,
            },
        }
    }
}

/// Receipt returned by a successful save: the minted identifier and when the
/// record will expire. Serializes flat into the save response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SavedBuild {
    /// Identifier under which the build was stored.
    #[serde(rename = "id")]
    pub share_id: ShareId,
    /// Expiry instant of the new record.
    #[ts(type = "string")]
    pub expires_at: DateTime<Utc>,
}

/// Store introspection counters, served by the stats endpoint.
///
/// `expired` counts records past their expiry that no sweep has removed yet.
/// It is diagnostic only: those records are already unreachable via load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct StoreStats {
    /// Total records in the document, expired or not.
    pub total: usize,
    /// Records past expiry but not yet swept.
    pub expired: usize,
    /// Serialized size of the whole document in bytes.
    pub size_bytes: usize,
    /// Earliest expiry instant among live records.
    #[ts(type = "string | null")]
    pub oldest_expiry: Option<DateTime<Utc>>,
    /// Latest expiry instant among live records.
    #[ts(type = "string | null")]
    pub newest_expiry: Option<DateTime<Utc>>,
    /// Instant of the most recent expiry sweep.
    #[ts(type = "string | null")]
    pub last_cleanup: Option<DateTime<Utc>>,
}
