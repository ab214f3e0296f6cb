//! Typed HTTP client for the Loadout share API.
//!
//! Wraps the three endpoints of the share server in an ergonomic async
//! API for Rust consumers (CLI tooling, integration tests, other
//! services). Mirrors the contract the talent-calculator frontend uses.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use loadout_client::BuildClient;
//! use loadout_types::ShareId;
//!
//! # async fn example(snapshot: loadout_types::BuildSnapshot) -> Result<(), loadout_client::ClientError> {
//! let client = BuildClient::new("http://localhost:3000");
//!
//! // Share a build and hand the link to someone else.
//! let saved = client.save_build(&snapshot).await?;
//! println!("expires {}: {}", saved.expires_at,
//!     client.share_url("http://localhost:5173/talents", saved.share_id));
//!
//! // Load it back while it is still live.
//! if let Some(build) = client.load_build(saved.share_id).await? {
//!     println!("loaded {}", build.name);
//! }
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::ClientError;

use loadout_types::{
    share, BuildSnapshot, SavedBuild, ShareId, StoreStats, REMOTE_SHARE_PARAM,
};
use reqwest::StatusCode;
use serde::Deserialize;

/// Response envelope for `POST /api/data`: the receipt fields sit flat
/// next to the success flag.
#[derive(Debug, Deserialize)]
struct SaveEnvelope {
    success: bool,
    #[serde(flatten)]
    saved: Option<SavedBuild>,
    error: Option<String>,
}

/// Response envelope for the `data`-carrying endpoints.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

/// A client for the share server's HTTP API.
///
/// Cheap to clone; connection pooling lives inside the wrapped
/// [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct BuildClient {
    http: reqwest::Client,
    base_url: String,
}

impl BuildClient {
    /// Create a client for the server at `base_url`
    /// (e.g. `http://localhost:3000`). A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (shared pools, custom timeouts).
    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http, base_url }
    }

    /// Store a build on the server and return its share receipt.
    ///
    /// Each call mints a fresh identifier, also on retries after a failure.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on transport or decode failure and
    /// [`ClientError::Server`] when the server reports a failed save.
    pub async fn save_build(&self, snapshot: &BuildSnapshot) -> Result<SavedBuild, ClientError> {
        let url = format!("{}/api/data", self.base_url);
        tracing::debug!(%url, name = %snapshot.name, "saving build");

        let envelope: SaveEnvelope = self
            .http
            .post(&url)
            .json(snapshot)
            .send()
            .await?
            .json()
            .await?;

        if !envelope.success {
            return Err(ClientError::Server(
                envelope
                    .error
                    .unwrap_or_else(|| "unknown server error".to_owned()),
            ));
        }
        envelope.saved.ok_or_else(|| {
            ClientError::Protocol("save response is missing id and expiresAt".to_owned())
        })
    }

    /// Load a shared build by identifier.
    ///
    /// Returns `Ok(None)` when the identifier is unknown or the record has
    /// expired -- the expected outcome for stale links, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on transport or decode failure and
    /// [`ClientError::Server`] for non-404 server-reported failures.
    pub async fn load_build(&self, share_id: ShareId) -> Result<Option<BuildSnapshot>, ClientError> {
        let url = format!("{}/api/data/{share_id}", self.base_url);
        tracing::debug!(%url, "loading build");

        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let envelope: DataEnvelope<BuildSnapshot> = response.json().await?;
        if !envelope.success {
            return Err(ClientError::Server(
                envelope
                    .error
                    .unwrap_or_else(|| "unknown server error".to_owned()),
            ));
        }
        envelope
            .data
            .map(Some)
            .ok_or_else(|| ClientError::Protocol("load response is missing data".to_owned()))
    }

    /// Fetch store statistics.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on transport or decode failure and
    /// [`ClientError::Server`] when the server reports a failure.
    pub async fn stats(&self) -> Result<StoreStats, ClientError> {
        let url = format!("{}/api/stats", self.base_url);

        let envelope: DataEnvelope<StoreStats> =
            self.http.get(&url).send().await?.json().await?;
        if !envelope.success {
            return Err(ClientError::Server(
                envelope
                    .error
                    .unwrap_or_else(|| "unknown server error".to_owned()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| ClientError::Protocol("stats response is missing data".to_owned()))
    }

    /// Build the shareable page link for a stored build.
    ///
    /// `page_url` is the frontend address the link should open (origin plus
    /// path); the identifier rides in the `build` query parameter.
    pub fn share_url(&self, page_url: &str, share_id: ShareId) -> String {
        share::share_url(page_url, REMOTE_SHARE_PARAM, share_id)
    }

    /// The server base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = BuildClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn share_url_carries_the_build_parameter() {
        let client = BuildClient::new("http://localhost:3000");
        let id = ShareId::random();
        assert_eq!(
            client.share_url("http://localhost:5173/talents", id),
            format!("http://localhost:5173/talents?build={id}")
        );
    }

    #[test]
    fn save_envelope_decodes_success_shape() {
        let id = ShareId::random();
        let envelope: SaveEnvelope = serde_json::from_value(serde_json::json!({
            "success": true,
            "id": id,
            "expiresAt": "2026-08-01T14:00:00Z",
        }))
        .unwrap();

        assert!(envelope.success);
        let saved = envelope.saved.unwrap();
        assert_eq!(saved.share_id, id);
        assert!(envelope.error.is_none());
    }

    #[test]
    fn save_envelope_decodes_error_shape() {
        let envelope: SaveEnvelope = serde_json::from_value(serde_json::json!({
            "success": false,
            "error": "invalid build snapshot: name must not be empty",
        }))
        .unwrap();

        assert!(!envelope.success);
        assert!(envelope.saved.is_none());
        assert!(envelope.error.unwrap().contains("name"));
    }

    #[test]
    fn data_envelope_decodes_build_payload() {
        let envelope: DataEnvelope<BuildSnapshot> = serde_json::from_value(serde_json::json!({
            "success": true,
            "data": {
                "name": "Test Warrior Build",
                "className": "Warrior",
                "assignedPoints": { "Arms": { "1": { "0": 3 } } },
                "totalPoints": 20,
                "availablePoints": 31,
                "createdAt": "2026-08-01T11:59:00Z",
            },
        }))
        .unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.data.unwrap().class_name, "Warrior");
    }
}
