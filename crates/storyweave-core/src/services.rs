//! External story services the authoring workflow depends on.
//!
//! Implementations are injected; the workflow never decides how they are
//! reached.

use async_trait::async_trait;

use crate::document::Document;
use crate::error::ServiceError;
use crate::story::{PublishedStory, SaveStoryRequest, ThumbnailTemplate};
use crate::word_card::WordCard;

/// Suggests vocabulary for the next episode from the one just written.
#[async_trait]
pub trait StoryGenerator: Send + Sync {
    /// Returns candidate word cards for the episode after `chapter`.
    async fn next_word_cards(&self, chapter: &Document) -> Result<Vec<WordCard>, ServiceError>;
}

/// Stores a finished story.
#[async_trait]
pub trait StoryPublisher: Send + Sync {
    /// Saves the story and returns what the backend created.
    async fn save_story(&self, request: &SaveStoryRequest) -> Result<PublishedStory, ServiceError>;
}

/// Provides the word cards offered for the first episode.
#[async_trait]
pub trait InitialWordSource: Send + Sync {
    /// Returns the opening word cards.
    async fn initial_word_cards(&self) -> Result<Vec<WordCard>, ServiceError>;
}

/// Lists the cover images an author can choose from.
#[async_trait]
pub trait ThumbnailCatalog: Send + Sync {
    /// Returns the available templates in display order.
    async fn thumbnail_templates(&self) -> Result<Vec<ThumbnailTemplate>, ServiceError>;
}
