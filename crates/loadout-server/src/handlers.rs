//! REST API endpoint handlers for the share server.
//!
//! All handlers go through the record store via the shared [`AppState`].
//! Responses use the JSON envelope the frontend expects:
//! `{"success": true, ...}` on success, `{"success": false, "error": ...}`
//! on failure.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `POST` | `/api/data` | Store a build, mint a share identifier |
//! | `GET` | `/api/data/:id` | Load a shared build |
//! | `GET` | `/api/stats` | Store introspection counters |

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use axum::Json;
use loadout_store::DocumentBackend;
use loadout_types::{BuildSnapshot, ShareId};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /api/data -- store a build
// ---------------------------------------------------------------------------

/// Store a submitted build snapshot and return its share identifier and
/// expiry instant.
///
/// Every save mints a fresh identifier; submitting identical content twice
/// yields two distinct identifiers.
pub async fn save_build<B: DocumentBackend>(
    State(state): State<Arc<AppState<B>>>,
    Json(snapshot): Json<BuildSnapshot>,
) -> Result<impl IntoResponse, ApiError> {
    let saved = state.store.save(snapshot).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "id": saved.share_id,
        "expiresAt": saved.expires_at,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/data/:id -- load a shared build
// ---------------------------------------------------------------------------

/// Load the build stored under `id`.
///
/// A candidate that is not a canonical 36-character identifier is rejected
/// without a storage lookup; malformed, unknown, and expired identifiers
/// all answer 404 with the same envelope.
pub async fn get_build<B: DocumentBackend>(
    State(state): State<Arc<AppState<B>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let share_id = ShareId::parse(&id).map_err(|err| {
        tracing::debug!(%err, "rejected malformed share identifier");
        ApiError::NotFound
    })?;

    let snapshot = state.store.load(share_id).await.ok_or(ApiError::NotFound)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": snapshot,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/stats -- store introspection
// ---------------------------------------------------------------------------

/// Return store counters: totals, pending-sweep expired count, document
/// size, expiry range, and the last sweep instant.
pub async fn get_stats<B: DocumentBackend>(
    State(state): State<Arc<AppState<B>>>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.store.stats().await;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": stats,
    })))
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing store health and API links.
pub async fn index<B: DocumentBackend>(State(state): State<Arc<AppState<B>>>) -> impl IntoResponse {
    let stats = state.store.stats().await;
    let total = stats.total;
    let expired = stats.expired;
    let size_kb = stats.size_bytes.div_ceil(1024);
    let last_cleanup = stats
        .last_cleanup
        .map_or_else(|| String::from("never"), |at| at.to_rfc3339());

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Loadout Share Server</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Loadout Share Server</h1>

    <p>Status: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Shared builds</div>
            <div class="value">{total}</div>
        </div>
        <div class="metric">
            <div class="label">Awaiting sweep</div>
            <div class="value">{expired}</div>
        </div>
        <div class="metric">
            <div class="label">Document size</div>
            <div class="value">{size_kb} KB</div>
        </div>
        <div class="metric">
            <div class="label">Last cleanup</div>
            <div class="value">{last_cleanup}</div>
        </div>
    </div>

    <hr>

    <h2>API Endpoints</h2>
    <ul>
        <li>POST <a href="/api/data">/api/data</a> -- Store a build, mint a share link id</li>
        <li>GET /api/data/:id -- Load a shared build</li>
        <li>GET <a href="/api/stats">/api/stats</a> -- Store statistics</li>
    </ul>
</body>
</html>"#
    ))
}
