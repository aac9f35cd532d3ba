//! Wire types exchanged with the story backend.

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// A cover image the author may pick for a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailTemplate {
    /// Identifier sent back when publishing.
    pub thumbnail_id: String,
    /// Where the image can be fetched from.
    pub thumbnail_path: String,
}

/// One committed episode in a save request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterPayload {
    /// Episode number, starting at 1.
    pub chapter_num: u32,
    /// Snapshot of the episode's document.
    pub chapter_json: Document,
}

/// Body of the publish call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStoryRequest {
    /// Story title as entered.
    pub story_title: String,
    /// Chosen cover image.
    pub thumbnail_id: String,
    /// Committed episodes, ascending by number.
    pub chapters: Vec<ChapterPayload>,
}

/// Outcome of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedStory {
    /// Identifier of the created story, when the backend returns one.
    pub story_id: Option<String>,
}
