//! Committed episodes.

use serde::Serialize;
use storyweave_core::document::Document;
use storyweave_core::story::ChapterPayload;
use storyweave_core::word_card::WordCard;

/// One committed episode: a document snapshot and the card it had to use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Episode {
    /// Episode number, `1..=MAX_EPISODES`.
    pub id: u32,
    /// Snapshot of the draft at commit time.
    pub document: Document,
    /// The words this episode was written against.
    pub words: WordCard,
}

/// Ordered episodes, unique by id.
///
/// First-time ids keep their insertion order; re-committing an id replaces
/// the stored episode in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EpisodeCollection {
    episodes: Vec<Episode>,
}

impl EpisodeCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `episode`, or replaces the stored episode with the same id.
    pub fn upsert(&mut self, episode: Episode) {
        match self.episodes.iter_mut().find(|e| e.id == episode.id) {
            Some(existing) => {
                existing.document = episode.document;
                existing.words = episode.words;
            }
            None => self.episodes.push(episode),
        }
    }

    /// Returns the episode with the given id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.id == id)
    }

    /// Iterates in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &Episode> {
        self.episodes.iter()
    }

    /// Number of committed episodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    /// Whether nothing has been committed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Builds the chapter list for a save request, ascending by episode id.
    #[must_use]
    pub fn to_save_request(&self) -> Vec<ChapterPayload> {
        let mut chapters: Vec<ChapterPayload> = self
            .episodes
            .iter()
            .map(|episode| ChapterPayload {
                chapter_num: episode.id,
                chapter_json: episode.document.clone(),
            })
            .collect();
        chapters.sort_by_key(|chapter| chapter.chapter_num);
        chapters
    }
}
