//! Persistence backends for the record store.
//!
//! The store owns exactly one persisted document and always reads and
//! replaces it as a whole. A [`DocumentBackend`] is the pluggable adapter
//! behind that contract: the file backend serves the server deployment, the
//! memory backend serves the embedded deployment and tests. No other
//! component reads or writes the document directly.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use loadout_types::StoreDocument;

use crate::error::StoreError;

/// Adapter over the single persisted store document.
pub trait DocumentBackend: Send + Sync {
    /// Read the latest persisted document.
    ///
    /// Returns `Ok(None)` when no document has been written yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] on I/O failure and
    /// [`StoreError::Serialization`] when the stored bytes are not a valid
    /// document.
    fn read_document(&self) -> Result<Option<StoreDocument>, StoreError>;

    /// Replace the persisted document in one logical operation.
    ///
    /// A failed write must never leave a partially written document behind.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] or [`StoreError::Serialization`]
    /// when the replacement could not be completed.
    fn write_document(&mut self, document: &StoreDocument) -> Result<(), StoreError>;
}

/// JSON document on the local filesystem.
///
/// Writes go to a sibling temp file first and are moved into place with a
/// rename, so readers never observe a half-written document.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Create a backend persisting to `path`. Parent directories are
    /// created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the persisted document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path used for the staged write.
    fn staging_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl DocumentBackend for FileBackend {
    fn read_document(&self) -> Result<Option<StoreDocument>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Persistence(err)),
        };
        let document = serde_json::from_slice(&bytes)?;
        Ok(Some(document))
    }

    fn write_document(&mut self, document: &StoreDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(document)?;
        let staging = self.staging_path();
        fs::write(&staging, bytes)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

/// In-process document slot.
///
/// Backs the embedded (client-local) deployment shape and unit tests. Reads
/// hand out a copy so a failed mutation never corrupts the held document.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    document: Option<StoreDocument>,
}

impl MemoryBackend {
    /// Create an empty backend with no document written yet.
    pub const fn new() -> Self {
        Self { document: None }
    }
}

impl DocumentBackend for MemoryBackend {
    fn read_document(&self) -> Result<Option<StoreDocument>, StoreError> {
        Ok(self.document.clone())
    }

    fn write_document(&mut self, document: &StoreDocument) -> Result<(), StoreError> {
        self.document = Some(document.clone());
        Ok(())
    }
}
