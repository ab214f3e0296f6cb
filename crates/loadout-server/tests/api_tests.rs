//! Integration tests for the share API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. The store runs on the memory backend with a
//! manual clock so expiry is crossed by advancing logical time, never by
//! sleeping.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use loadout_server::router::build_router;
use loadout_server::state::AppState;
use loadout_store::{ManualClock, MemoryBackend, SharedBuildStore, StoreConfig};
use loadout_types::ShareId;
use serde_json::{json, Value};
use tower::ServiceExt;

fn make_test_state() -> (Arc<AppState<MemoryBackend>>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
    ));
    let store = SharedBuildStore::with_clock(
        MemoryBackend::new(),
        StoreConfig::default(),
        clock.clone(),
    );
    (Arc::new(AppState::new(store)), clock)
}

fn sample_build() -> Value {
    json!({
        "name": "Test Warrior Build",
        "className": "Warrior",
        "assignedPoints": { "Arms": { "1": { "0": 3 } } },
        "totalPoints": 20,
        "availablePoints": 31,
        "createdAt": "2026-08-01T11:59:00Z",
    })
}

fn post_build(body: &Value) -> Request<Body> {
    Request::post("/api/data")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let (state, _clock) = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn test_save_build_returns_id_and_expiry() {
    let (state, _clock) = make_test_state();
    let router = build_router(state);

    let response = router.oneshot(post_build(&sample_build())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    let id = body["id"].as_str().unwrap();
    assert!(ShareId::parse(id).is_ok());
    assert_eq!(body["expiresAt"], "2026-08-01T14:00:00Z");
}

#[tokio::test]
async fn test_save_then_load_roundtrip() {
    let (state, _clock) = make_test_state();
    let router = build_router(state);

    let response = router
        .clone()
        .oneshot(post_build(&sample_build()))
        .await
        .unwrap();
    let saved = body_to_json(response.into_body()).await;
    let id = saved["id"].as_str().unwrap();

    let response = router
        .oneshot(
            Request::get(format!("/api/data/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["className"], "Warrior");
    assert_eq!(body["data"]["assignedPoints"]["Arms"]["1"]["0"], 3);
    assert_eq!(body["data"]["name"], "Test Warrior Build");
}

#[tokio::test]
async fn test_save_without_created_at_defaults() {
    let (state, _clock) = make_test_state();
    let router = build_router(state);

    let mut build = sample_build();
    build.as_object_mut().unwrap().remove("createdAt");

    let response = router.oneshot(post_build(&build)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_identical_saves_mint_distinct_ids() {
    let (state, _clock) = make_test_state();
    let router = build_router(state);

    let first = body_to_json(
        router
            .clone()
            .oneshot(post_build(&sample_build()))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    let second = body_to_json(
        router
            .oneshot(post_build(&sample_build()))
            .await
            .unwrap()
            .into_body(),
    )
    .await;

    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn test_save_empty_name_is_rejected() {
    let (state, _clock) = make_test_state();
    let router = build_router(state);

    let mut build = sample_build();
    build["name"] = json!("");

    let response = router.oneshot(post_build(&build)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_get_malformed_id_returns_not_found() {
    let (state, _clock) = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/data/not-a-valid-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_get_unknown_id_returns_not_found() {
    let (state, _clock) = make_test_state();
    let router = build_router(state);

    let id = ShareId::random();
    let response = router
        .oneshot(
            Request::get(format!("/api/data/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_expired_build_returns_not_found() {
    let (state, clock) = make_test_state();
    let router = build_router(state);

    let saved = body_to_json(
        router
            .clone()
            .oneshot(post_build(&sample_build()))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    let id = saved["id"].as_str().unwrap().to_owned();

    clock.advance(Duration::hours(2) + Duration::seconds(1));

    let get = |router: axum::Router| {
        let path = format!("/api/data/{id}");
        async move {
            router
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap()
        }
    };

    let response = get(router.clone()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Still gone on a second request after the lazy deletion ran.
    let response = get(router).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stats_reports_store_counters() {
    let (state, clock) = make_test_state();
    let router = build_router(state);

    router
        .clone()
        .oneshot(post_build(&sample_build()))
        .await
        .unwrap();
    router
        .clone()
        .oneshot(post_build(&sample_build()))
        .await
        .unwrap();

    clock.advance(Duration::hours(3));

    let response = router
        .oneshot(Request::get("/api/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["expired"], 2);
    assert!(body["data"]["sizeBytes"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let (state, _clock) = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
