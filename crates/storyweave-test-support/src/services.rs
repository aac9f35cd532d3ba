//! Test services: mock implementations of the story service traits.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use storyweave_core::document::Document;
use storyweave_core::error::ServiceError;
use storyweave_core::services::{
    InitialWordSource, StoryGenerator, StoryPublisher, ThumbnailCatalog,
};
use storyweave_core::story::{PublishedStory, SaveStoryRequest, ThumbnailTemplate};
use storyweave_core::word_card::WordCard;

/// A generator that replays scripted answers in order and records every
/// chapter it was sent. Once the script runs out every call fails.
#[derive(Debug)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<Vec<WordCard>, ServiceError>>>,
    requests: Mutex<Vec<Document>>,
}

impl ScriptedGenerator {
    /// Creates a generator that answers with `script`, one entry per call.
    #[must_use]
    pub fn new(script: Vec<Result<Vec<WordCard>, ServiceError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the chapters sent so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<Document> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryGenerator for ScriptedGenerator {
    async fn next_word_cards(&self, chapter: &Document) -> Result<Vec<WordCard>, ServiceError> {
        self.requests.lock().unwrap().push(chapter.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::Transport("script exhausted".into())))
    }
}

/// A publisher that accepts every story, answering with a fixed id, and
/// records each request.
#[derive(Debug)]
pub struct RecordingPublisher {
    story_id: String,
    requests: Mutex<Vec<SaveStoryRequest>>,
}

impl RecordingPublisher {
    /// Creates a publisher that reports `story_id` for every save.
    #[must_use]
    pub fn new(story_id: impl Into<String>) -> Self {
        Self {
            story_id: story_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the requests saved so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<SaveStoryRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryPublisher for RecordingPublisher {
    async fn save_story(&self, request: &SaveStoryRequest) -> Result<PublishedStory, ServiceError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(PublishedStory {
            story_id: Some(self.story_id.clone()),
        })
    }
}

/// A word source that always offers the same cards.
#[derive(Debug)]
pub struct StaticWordSource(Vec<WordCard>);

impl StaticWordSource {
    /// Creates a source offering `cards`.
    #[must_use]
    pub fn new(cards: Vec<WordCard>) -> Self {
        Self(cards)
    }
}

#[async_trait]
impl InitialWordSource for StaticWordSource {
    async fn initial_word_cards(&self) -> Result<Vec<WordCard>, ServiceError> {
        Ok(self.0.clone())
    }
}

/// A thumbnail catalog with a fixed list of templates.
#[derive(Debug)]
pub struct StaticThumbnailCatalog(Vec<ThumbnailTemplate>);

impl StaticThumbnailCatalog {
    /// Creates a catalog listing `templates`.
    #[must_use]
    pub fn new(templates: Vec<ThumbnailTemplate>) -> Self {
        Self(templates)
    }
}

#[async_trait]
impl ThumbnailCatalog for StaticThumbnailCatalog {
    async fn thumbnail_templates(&self) -> Result<Vec<ThumbnailTemplate>, ServiceError> {
        Ok(self.0.clone())
    }
}

/// A backend that is down: every service call fails with a 503.
#[derive(Debug)]
pub struct UnavailableService;

#[async_trait]
impl StoryGenerator for UnavailableService {
    async fn next_word_cards(&self, _chapter: &Document) -> Result<Vec<WordCard>, ServiceError> {
        Err(ServiceError::Status(503))
    }
}

#[async_trait]
impl StoryPublisher for UnavailableService {
    async fn save_story(
        &self,
        _request: &SaveStoryRequest,
    ) -> Result<PublishedStory, ServiceError> {
        Err(ServiceError::Status(503))
    }
}

#[async_trait]
impl InitialWordSource for UnavailableService {
    async fn initial_word_cards(&self) -> Result<Vec<WordCard>, ServiceError> {
        Err(ServiceError::Status(503))
    }
}

#[async_trait]
impl ThumbnailCatalog for UnavailableService {
    async fn thumbnail_templates(&self) -> Result<Vec<ThumbnailTemplate>, ServiceError> {
        Err(ServiceError::Status(503))
    }
}
