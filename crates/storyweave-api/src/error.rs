//! Storyweave: API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use storyweave_authoring::domain::errors::AuthoringError;
use storyweave_core::error::ServiceError;
use thiserror::Error;
use uuid::Uuid;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The upstream story client could not be built.
    #[error("upstream client error: {0}")]
    Upstream(#[from] ServiceError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer error that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No live session has this id.
    #[error("no authoring session with id {0}")]
    SessionNotFound(Uuid),

    /// The workflow refused the action or a service call failed.
    #[error(transparent)]
    Authoring(#[from] AuthoringError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            Self::SessionNotFound(_) => (StatusCode::NOT_FOUND, "session_not_found"),
            Self::Authoring(AuthoringError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, "validation_error")
            }
            Self::Authoring(AuthoringError::Misuse(_)) => {
                (StatusCode::CONFLICT, "workflow_conflict")
            }
            Self::Authoring(AuthoringError::ExternalService(_)) => {
                (StatusCode::BAD_GATEWAY, "upstream_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
