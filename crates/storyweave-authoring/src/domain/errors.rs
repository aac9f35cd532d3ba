//! Error taxonomy for the authoring workflow.

use serde::Serialize;
use storyweave_core::error::ServiceError;
use thiserror::Error;

use super::workflow::Phase;

/// Why a draft or a publish attempt was rejected.
///
/// The display text is the message shown to the author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// The draft has no characters.
    #[error("write at least one character")]
    EmptyContent,

    /// The draft is longer than the episode limit.
    #[error("the episode is longer than 200 characters")]
    TooLong,

    /// Some card word is missing from the draft.
    #[error("use every word on the card")]
    IncompleteWordUsage,

    /// No word card has been chosen.
    #[error("choose a word card first")]
    NoWordsSelected,

    /// The title is empty or whitespace.
    #[error("enter a title")]
    MissingTitle,

    /// No cover image has been chosen.
    #[error("choose a cover image")]
    MissingThumbnail,
}

/// A transition was invoked when its preconditions could not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MisuseError {
    /// The action belongs to another phase.
    #[error("`{action}` is not allowed during {phase}")]
    WrongPhase {
        /// The rejected action.
        action: &'static str,
        /// The phase the workflow was in.
        phase: Phase,
    },

    /// The last episode cannot advance to another one.
    #[error("episode {0} is the last episode")]
    LastEpisodeReached(u32),

    /// A network-bound transition is still in flight.
    #[error("another request is still in progress")]
    Busy,

    /// The story has already been published.
    #[error("the story has already been published")]
    AlreadyPublished,

    /// A response arrived for a request that is no longer outstanding.
    #[error("response belongs to a request that is no longer outstanding")]
    StaleResponse,

    /// The requested word option does not exist.
    #[error("there is no word option {0}")]
    UnknownWordOption(usize),

    /// The requested cover image is not in the catalog.
    #[error("unknown cover image `{0}`")]
    UnknownThumbnail(String),
}

/// Any error the authoring workflow reports.
///
/// None of these is fatal; the workflow stays in a valid, resumable state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthoringError {
    /// The author must fix the draft, title or selection.
    #[error(transparent)]
    Validation(#[from] ValidationErrorKind),

    /// An external service failed; the action may be retried.
    #[error(transparent)]
    ExternalService(#[from] ServiceError),

    /// The action was invoked out of sequence.
    #[error(transparent)]
    Misuse(#[from] MisuseError),
}
