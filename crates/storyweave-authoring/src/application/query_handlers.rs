//! Query handlers for the authoring workflow.
//!
//! Builds read-only views of a session for presentation.

use serde::Serialize;
use storyweave_core::document::Document;
use storyweave_core::story::ThumbnailTemplate;
use storyweave_core::word_card::WordCard;

use crate::domain::episodes::EpisodeCollection;
use crate::domain::usage::WordUsage;
use crate::domain::workflow::{Phase, StoryWorkflow};

/// Read-only view of an authoring session.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowView {
    /// Episode being prepared.
    pub current_episode: u32,
    /// Current phase.
    pub phase: Phase,
    /// Draft document.
    pub draft: Document,
    /// Counted length of the draft.
    pub draft_char_count: usize,
    /// Which selected words the draft uses.
    pub word_usage: WordUsage,
    /// Card the current episode must use.
    pub selected_words: Option<WordCard>,
    /// Cards offered for the current episode.
    pub word_options: Option<Vec<WordCard>>,
    /// Committed episodes.
    pub episodes: EpisodeCollection,
    /// Story title.
    pub title: String,
    /// Chosen cover image.
    pub thumbnail_id: Option<String>,
    /// Cover images to choose from.
    pub thumbnails: Vec<ThumbnailTemplate>,
    /// Message about the last rejected action, or empty.
    pub error_message: String,
    /// Whether a request is in flight.
    pub busy: bool,
    /// Identifier of the published story, once published.
    pub story_id: Option<String>,
}

/// Returns the current view of a session.
#[must_use]
pub fn workflow_view(workflow: &StoryWorkflow) -> WorkflowView {
    WorkflowView {
        current_episode: workflow.current_episode(),
        phase: workflow.phase(),
        draft: workflow.draft().clone(),
        draft_char_count: workflow.draft_char_count(),
        word_usage: workflow.word_usage(),
        selected_words: workflow.selected_words().cloned(),
        word_options: workflow.word_options().map(<[WordCard]>::to_vec),
        episodes: workflow.episodes().clone(),
        title: workflow.title().to_owned(),
        thumbnail_id: workflow.thumbnail_id().map(str::to_owned),
        thumbnails: workflow.thumbnails().to_vec(),
        error_message: workflow.error_message().to_owned(),
        busy: workflow.is_busy(),
        story_id: workflow.published().and_then(|story| story.story_id.clone()),
    }
}
