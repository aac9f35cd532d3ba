//! Error types shared across crates.

use thiserror::Error;

/// A call to an external story service failed.
///
/// Every variant is retryable from the workflow's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request never produced a response (connect, timeout, TLS...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service responded with status {0}")]
    Status(u16),

    /// The response body could not be understood.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// A JSON value was not a valid document root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The root node was something other than `doc`.
    #[error("document root must be `doc`, found `{0}`")]
    UnexpectedRoot(&'static str),
}

/// A word card did not have the required number of words.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("word card must hold exactly {expected} words, got {actual}")]
pub struct WordCardError {
    /// Required cardinality.
    pub expected: usize,
    /// Cardinality that was supplied.
    pub actual: usize,
}
