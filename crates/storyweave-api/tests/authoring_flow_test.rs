//! Integration tests for a full authoring session over HTTP.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use storyweave_core::error::ServiceError;
use storyweave_test_support::{
    RecordingPublisher, ScriptedGenerator, UnavailableService, word_card,
};
use uuid::Uuid;

const FIRST_EPISODE: &str = "The cat rowed down the river with bread for the moon.";
const LATER_EPISODE: &str = "An owl in the snow lit a lamp on the boat.";

fn owl_cards() -> Result<Vec<storyweave_core::word_card::WordCard>, ServiceError> {
    Ok(vec![word_card(["owl", "snow", "lamp", "boat"])])
}

async fn start_session(state: &storyweave_api::state::AppState) -> String {
    let (status, json) =
        common::post_empty(common::build_test_app(state.clone()), "/api/v1/stories/sessions").await;
    assert_eq!(status, StatusCode::CREATED);
    let session_id: Uuid = json["session_id"].as_str().unwrap().parse().unwrap();
    format!("/api/v1/stories/sessions/{session_id}")
}

async fn write_episode(state: &storyweave_api::state::AppState, base: &str, text: &str) {
    let (status, _) =
        common::post_empty(common::build_test_app(state.clone()), &format!("{base}/choose")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, json) = common::put_json(
        common::build_test_app(state.clone()),
        &format!("{base}/draft"),
        &json!({ "document": common::text_document(text) }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["word_usage"]["all_used"], true, "draft: {text}");
}

#[tokio::test]
async fn test_five_episode_story_round_trip() {
    // Arrange
    let publisher = Arc::new(RecordingPublisher::new("story-99"));
    let state = common::build_state(
        Arc::new(ScriptedGenerator::new(vec![owl_cards(); 4])),
        publisher.clone(),
    );
    let base = start_session(&state).await;

    // Act: four advances, then finish on the fifth episode.
    write_episode(&state, &base, FIRST_EPISODE).await;
    for episode in 2..=5 {
        let (status, json) =
            common::post_empty(common::build_test_app(state.clone()), &format!("{base}/advance"))
                .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["current_episode"], episode);
        assert_eq!(json["phase"], "select_words");
        write_episode(&state, &base, LATER_EPISODE).await;
    }

    let (status, json) =
        common::post_empty(common::build_test_app(state.clone()), &format!("{base}/advance")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "workflow_conflict");

    let (status, json) =
        common::post_empty(common::build_test_app(state.clone()), &format!("{base}/finish")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phase"], "set_title_and_thumbnail");
    assert_eq!(json["episodes"].as_array().unwrap().len(), 5);

    let (status, _) = common::put_json(
        common::build_test_app(state.clone()),
        &format!("{base}/title"),
        &json!({ "title": "Night Voyages" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = common::put_json(
        common::build_test_app(state.clone()),
        &format!("{base}/thumbnail"),
        &json!({ "thumbnail_id": "thumb-2" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) =
        common::post_empty(common::build_test_app(state.clone()), &format!("{base}/publish")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["story_id"], "story-99");

    let requests = publisher.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].story_title, "Night Voyages");
    assert_eq!(requests[0].thumbnail_id, "thumb-2");
    let numbers: Vec<u32> = requests[0].chapters.iter().map(|c| c.chapter_num).collect();
    assert_eq!(numbers, [1, 2, 3, 4, 5]);

    let (status, _) = common::get_json(common::build_test_app(state.clone()), &base).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_generator_failure_is_reported_and_retryable() {
    // Arrange
    let state = common::build_state(
        Arc::new(ScriptedGenerator::new(vec![
            Err(ServiceError::Status(503)),
            owl_cards(),
        ])),
        Arc::new(RecordingPublisher::new("story-1")),
    );
    let base = start_session(&state).await;
    write_episode(&state, &base, FIRST_EPISODE).await;

    // Act
    let (first_status, first) =
        common::post_empty(common::build_test_app(state.clone()), &format!("{base}/advance")).await;
    let (_, view) = common::get_json(common::build_test_app(state.clone()), &base).await;
    let (second_status, second) =
        common::post_empty(common::build_test_app(state.clone()), &format!("{base}/advance")).await;

    // Assert
    assert_eq!(first_status, StatusCode::BAD_GATEWAY);
    assert_eq!(first["error"], "upstream_error");
    assert_eq!(view["current_episode"], 1);
    assert_eq!(view["phase"], "write_episode");
    assert_eq!(view["busy"], false);
    assert_eq!(
        view["error_message"],
        "could not fetch the next word cards: service responded with status 503"
    );
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(second["current_episode"], 2);
    assert_eq!(second["episodes"].as_array().unwrap().len(), 1);
    assert_eq!(second["error_message"], "");
}

#[tokio::test]
async fn test_publish_failure_keeps_session_for_retry() {
    // Arrange
    let state = common::build_state(
        Arc::new(ScriptedGenerator::new(Vec::new())),
        Arc::new(UnavailableService),
    );
    let base = start_session(&state).await;
    write_episode(&state, &base, FIRST_EPISODE).await;
    common::post_empty(common::build_test_app(state.clone()), &format!("{base}/finish")).await;
    common::put_json(
        common::build_test_app(state.clone()),
        &format!("{base}/title"),
        &json!({ "title": "Moon Bread" }),
    )
    .await;

    // Act
    let (status, json) =
        common::post_empty(common::build_test_app(state.clone()), &format!("{base}/publish")).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "upstream_error");
    let (status, view) = common::get_json(common::build_test_app(state.clone()), &base).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["phase"], "set_title_and_thumbnail");
    assert_eq!(view["title"], "Moon Bread");
    assert!(view["story_id"].is_null());
}

#[tokio::test]
async fn test_publish_without_title_is_rejected() {
    let state = common::build_state(
        Arc::new(ScriptedGenerator::new(Vec::new())),
        Arc::new(RecordingPublisher::new("story-1")),
    );
    let base = start_session(&state).await;
    write_episode(&state, &base, FIRST_EPISODE).await;
    common::post_empty(common::build_test_app(state.clone()), &format!("{base}/finish")).await;

    let (status, json) =
        common::post_empty(common::build_test_app(state.clone()), &format!("{base}/publish")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "enter a title");
}

#[tokio::test]
async fn test_unknown_thumbnail_is_a_conflict() {
    let state = common::build_state(
        Arc::new(ScriptedGenerator::new(Vec::new())),
        Arc::new(RecordingPublisher::new("story-1")),
    );
    let base = start_session(&state).await;
    write_episode(&state, &base, FIRST_EPISODE).await;
    common::post_empty(common::build_test_app(state.clone()), &format!("{base}/finish")).await;

    let (status, json) = common::put_json(
        common::build_test_app(state),
        &format!("{base}/thumbnail"),
        &json!({ "thumbnail_id": "thumb-404" }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "workflow_conflict");
}

#[tokio::test]
async fn test_over_long_episode_cannot_advance() {
    let state = common::build_state(
        Arc::new(ScriptedGenerator::new(vec![owl_cards()])),
        Arc::new(RecordingPublisher::new("story-1")),
    );
    let base = start_session(&state).await;
    let long = format!("{FIRST_EPISODE} {}", "la ".repeat(60));
    write_episode(&state, &base, &long).await;

    let (status, json) =
        common::post_empty(common::build_test_app(state.clone()), &format!("{base}/advance")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "the episode is longer than 200 characters");
}
