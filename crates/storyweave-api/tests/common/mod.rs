//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::TimeZone;
use http_body_util::BodyExt;
use storyweave_core::clock::Clock;
use storyweave_core::services::{StoryGenerator, StoryPublisher};
use storyweave_test_support::{
    ManualClock, StaticThumbnailCatalog, StaticWordSource, thumbnail, word_card,
};
use tower::ServiceExt;

use storyweave_api::registry::SessionRegistry;
use storyweave_api::state::AppState;

/// Fixed starting time used across all integration tests.
fn manual_clock() -> Arc<dyn Clock> {
    Arc::new(ManualClock::new(
        chrono::Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build application state with the given generator and publisher, and a
/// fixed set of opening cards and cover images.
pub fn build_state(
    generator: Arc<dyn StoryGenerator>,
    publisher: Arc<dyn StoryPublisher>,
) -> AppState {
    AppState::new(
        Arc::new(SessionRegistry::new(manual_clock())),
        generator,
        publisher,
        Arc::new(StaticWordSource::new(vec![
            word_card(["cat", "moon", "bread", "river"]),
            word_card(["owl", "snow", "lamp", "boat"]),
        ])),
        Arc::new(StaticThumbnailCatalog::new(vec![
            thumbnail("thumb-1"),
            thumbnail("thumb-2"),
        ])),
    )
}

/// Build the full app router. Uses the same route structure as `main.rs`.
pub fn build_test_app(state: AppState) -> Router {
    storyweave_api::app(state)
}

/// A paragraph of plain text in the editor's JSON format.
pub fn text_document(text: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "doc",
        "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": text }] }]
    })
}

/// Send a request with an optional JSON body and return the response.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "POST", uri, Some(body)).await
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send_json(app, "POST", uri, None).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "PUT", uri, Some(body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send_json(app, "GET", uri, None).await
}
