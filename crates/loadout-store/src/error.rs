//! Error types for the record store.
//!
//! All failure modes are propagated via [`StoreError`]. A not-found or
//! expired record is deliberately NOT an error: it is an expected, frequent
//! result and surfaces as `None` from the load path instead.

/// Errors that can occur in the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The submitted snapshot failed validation (empty or over-long name).
    #[error("invalid build snapshot: {0}")]
    Validation(String),

    /// Reading or writing the persisted document failed.
    #[error("persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    /// The persisted document could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration value produced an unrepresentable instant.
    #[error("configuration error: {0}")]
    Config(String),
}
