//! Integration tests for the health endpoint.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use storyweave_test_support::{RecordingPublisher, ScriptedGenerator};

#[tokio::test]
async fn test_health_reports_version_and_session_count() {
    let state = common::build_state(
        Arc::new(ScriptedGenerator::new(Vec::new())),
        Arc::new(RecordingPublisher::new("story-1")),
    );
    let (status, _) =
        common::post_empty(common::build_test_app(state.clone()), "/api/v1/stories/sessions").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = common::get_json(common::build_test_app(state), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["sessions"], 1);
}
