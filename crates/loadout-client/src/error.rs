//! Error types for the share API client.

/// Errors that can occur when talking to the share server.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the response body could not be
    /// read or decoded.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with its error envelope.
    #[error("server error: {0}")]
    Server(String),

    /// The server answered success but the envelope was missing required
    /// fields.
    #[error("protocol error: {0}")]
    Protocol(String),
}
