//! Shared application state.

use std::sync::Arc;

use storyweave_core::clock::Clock;
use storyweave_core::services::{
    InitialWordSource, StoryGenerator, StoryPublisher, ThumbnailCatalog,
};

use crate::registry::SessionRegistry;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Live authoring sessions.
    pub sessions: Arc<SessionRegistry>,
    /// Suggests word cards for the next episode.
    pub generator: Arc<dyn StoryGenerator>,
    /// Saves finished stories.
    pub publisher: Arc<dyn StoryPublisher>,
    /// Offers the opening word cards.
    pub initial_words: Arc<dyn InitialWordSource>,
    /// Lists cover images.
    pub thumbnails: Arc<dyn ThumbnailCatalog>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        sessions: Arc<SessionRegistry>,
        generator: Arc<dyn StoryGenerator>,
        publisher: Arc<dyn StoryPublisher>,
        initial_words: Arc<dyn InitialWordSource>,
        thumbnails: Arc<dyn ThumbnailCatalog>,
    ) -> Self {
        Self {
            sessions,
            generator,
            publisher,
            initial_words,
            thumbnails,
        }
    }

    /// Create state where one backend provides every story service.
    #[must_use]
    pub fn with_backend<B>(backend: Arc<B>, clock: Arc<dyn Clock>) -> Self
    where
        B: StoryGenerator + StoryPublisher + InitialWordSource + ThumbnailCatalog + 'static,
    {
        Self::new(
            Arc::new(SessionRegistry::new(clock)),
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend,
        )
    }
}
