//! Routes for authoring sessions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use storyweave_authoring::application::command_handlers::{self, lock_session};
use storyweave_authoring::application::query_handlers::{self, WorkflowView};
use storyweave_authoring::domain::errors::AuthoringError;
use storyweave_authoring::domain::workflow::StoryWorkflow;
use storyweave_core::document::Document;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::registry::SessionHandle;
use crate::state::AppState;

/// Response body for POST /sessions.
#[derive(Debug, Serialize)]
pub struct SessionCreated {
    /// Id to address the session with.
    pub session_id: Uuid,
    /// Initial state of the session.
    pub view: WorkflowView,
}

/// Request body for POST /sessions/{id}/select-option.
#[derive(Debug, Deserialize)]
pub struct SelectOptionRequest {
    /// Position of the card in the offered options.
    pub index: usize,
}

/// Request body for PUT /sessions/{id}/draft.
#[derive(Debug, Deserialize)]
pub struct UpdateDraftRequest {
    /// The editor's current document.
    pub document: Document,
}

/// Request body for PUT /sessions/{id}/title.
#[derive(Debug, Deserialize)]
pub struct SetTitleRequest {
    /// The story title.
    pub title: String,
}

/// Request body for PUT /sessions/{id}/thumbnail.
#[derive(Debug, Deserialize)]
pub struct SetThumbnailRequest {
    /// Id of a cover image from the session's catalog.
    pub thumbnail_id: String,
}

/// Response body for POST /sessions/{id}/publish.
#[derive(Debug, Serialize)]
pub struct PublishResponse {
    /// Id the backend assigned, when it returned one.
    pub story_id: Option<String>,
}

fn find_session(state: &AppState, session_id: Uuid) -> Result<SessionHandle, ApiError> {
    state
        .sessions
        .get(session_id)
        .ok_or(ApiError::SessionNotFound(session_id))
}

/// Runs a synchronous workflow action and returns the resulting view.
fn apply(
    state: &AppState,
    session_id: Uuid,
    action: impl FnOnce(&mut StoryWorkflow) -> Result<(), AuthoringError>,
) -> Result<Json<WorkflowView>, ApiError> {
    let session = find_session(state, session_id)?;
    let mut workflow = lock_session(&session);
    action(&mut *workflow)?;
    Ok(Json(query_handlers::workflow_view(&workflow)))
}

fn view_of(session: &SessionHandle) -> Json<WorkflowView> {
    Json(query_handlers::workflow_view(&lock_session(session)))
}

/// POST /sessions
#[instrument(skip_all)]
async fn start_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionCreated>), ApiError> {
    let workflow =
        command_handlers::start_session(&*state.initial_words, &*state.thumbnails).await?;
    let view = query_handlers::workflow_view(&workflow);
    let session_id = state.sessions.insert(workflow);

    info!(%session_id, "authoring session created");

    Ok((StatusCode::CREATED, Json(SessionCreated { session_id, view })))
}

/// GET /sessions/{id}
#[instrument(skip_all, fields(session_id = %session_id))]
async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WorkflowView>, ApiError> {
    let session = find_session(&state, session_id)?;
    Ok(view_of(&session))
}

/// DELETE /sessions/{id}
#[instrument(skip_all, fields(session_id = %session_id))]
async fn abandon_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let session = state
        .sessions
        .remove(session_id)
        .ok_or(ApiError::SessionNotFound(session_id))?;
    lock_session(&session).abandon();

    info!("authoring session abandoned");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /sessions/{id}/select-option
#[instrument(skip_all, fields(session_id = %session_id, index = request.index))]
async fn select_option(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectOptionRequest>,
) -> Result<Json<WorkflowView>, ApiError> {
    apply(&state, session_id, |workflow| {
        workflow.select_option(request.index)
    })
}

/// POST /sessions/{id}/choose
#[instrument(skip_all, fields(session_id = %session_id))]
async fn choose_words(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WorkflowView>, ApiError> {
    apply(&state, session_id, |workflow| workflow.choose_words(None))
}

/// PUT /sessions/{id}/draft
#[instrument(skip_all, fields(session_id = %session_id))]
async fn update_draft(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<UpdateDraftRequest>,
) -> Result<Json<WorkflowView>, ApiError> {
    apply(&state, session_id, |workflow| {
        workflow.update_draft(request.document)
    })
}

/// POST /sessions/{id}/advance
#[instrument(skip_all, fields(session_id = %session_id))]
async fn advance(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WorkflowView>, ApiError> {
    let session = find_session(&state, session_id)?;
    command_handlers::handle_advance(&session, &*state.generator).await?;
    Ok(view_of(&session))
}

/// POST /sessions/{id}/finish
#[instrument(skip_all, fields(session_id = %session_id))]
async fn finish(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WorkflowView>, ApiError> {
    apply(&state, session_id, StoryWorkflow::finish)
}

/// PUT /sessions/{id}/title
#[instrument(skip_all, fields(session_id = %session_id))]
async fn set_title(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SetTitleRequest>,
) -> Result<Json<WorkflowView>, ApiError> {
    apply(&state, session_id, |workflow| workflow.set_title(request.title))
}

/// PUT /sessions/{id}/thumbnail
#[instrument(skip_all, fields(session_id = %session_id, thumbnail_id = %request.thumbnail_id))]
async fn set_thumbnail(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SetThumbnailRequest>,
) -> Result<Json<WorkflowView>, ApiError> {
    apply(&state, session_id, |workflow| {
        workflow.set_thumbnail(request.thumbnail_id)
    })
}

/// POST /sessions/{id}/publish
#[instrument(skip_all, fields(session_id = %session_id))]
async fn publish(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<PublishResponse>, ApiError> {
    let session = find_session(&state, session_id)?;
    let story = command_handlers::handle_publish(&session, &*state.publisher).await?;
    state.sessions.remove(session_id);

    info!(story_id = ?story.story_id, "story published, session closed");

    Ok(Json(PublishResponse {
        story_id: story.story_id,
    }))
}

/// Returns the router for authoring sessions.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(start_session))
        .route(
            "/sessions/{session_id}",
            get(get_session).delete(abandon_session),
        )
        .route("/sessions/{session_id}/select-option", post(select_option))
        .route("/sessions/{session_id}/choose", post(choose_words))
        .route("/sessions/{session_id}/draft", put(update_draft))
        .route("/sessions/{session_id}/advance", post(advance))
        .route("/sessions/{session_id}/finish", post(finish))
        .route("/sessions/{session_id}/title", put(set_title))
        .route("/sessions/{session_id}/thumbnail", put(set_thumbnail))
        .route("/sessions/{session_id}/publish", post(publish))
}
