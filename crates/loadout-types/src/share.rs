//! Share-link encoding and decoding.
//!
//! A share link carries the identifier as a single query parameter:
//! `?share=<id>` for the embedded (client-local) store and `?build=<id>`
//! for the remote store. The consumer extracts the identifier, loads the
//! build exactly once, and strips the parameter from the visible address so
//! a refresh does not re-trigger the load.

use crate::ids::ShareId;

/// Query parameter used by links into the embedded (client-local) store.
pub const LOCAL_SHARE_PARAM: &str = "share";

/// Query parameter used by links into the remote store.
pub const REMOTE_SHARE_PARAM: &str = "build";

/// Build a shareable link for `id` on top of `base_url`.
///
/// `base_url` is expected to carry no query string of its own (origin plus
/// path, as producers construct it).
pub fn share_url(base_url: &str, param: &str, id: ShareId) -> String {
    format!("{base_url}?{param}={id}")
}

/// Extract a share identifier from a raw query string.
///
/// Returns the parsed identifier together with the query string with the
/// share parameter removed, ready to be written back to the address bar.
/// Returns `None` when the parameter is absent or its value is not a
/// canonical identifier; share identifiers never need percent-decoding, so
/// the raw value is parsed as-is.
pub fn extract_share_id(query: &str, param: &str) -> Option<(ShareId, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    if query.is_empty() {
        return None;
    }

    let mut found = None;
    let mut remaining: Vec<&str> = Vec::new();

    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if found.is_none() && key == param {
            match ShareId::parse(value) {
                Ok(id) => {
                    found = Some(id);
                    continue;
                }
                Err(err) => {
                    tracing::debug!(%err, "ignoring malformed share parameter");
                    return None;
                }
            }
        }
        remaining.push(pair);
    }

    found.map(|id| (id, remaining.join("&")))
}
