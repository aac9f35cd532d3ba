//! The authoring workflow state machine.
//!
//! A session moves through three phases per episode:
//!
//! ```text
//! SelectWords --choose--> WriteEpisode --advance--> SelectWords (next episode)
//!                                      --finish---> SetTitleAndThumbnail --publish--> done
//! ```
//!
//! Transitions that reach an external service are split in two. `begin_*`
//! validates, commits and marks the workflow busy, handing back a
//! [`RequestToken`]; `complete_*` consumes the service outcome for that
//! token. While a token is outstanding every other action is rejected, and
//! an outcome for a token that is no longer outstanding is discarded.

use std::fmt;

use serde::Serialize;
use storyweave_core::document::Document;
use storyweave_core::error::ServiceError;
use storyweave_core::story::{PublishedStory, SaveStoryRequest, ThumbnailTemplate};
use storyweave_core::word_card::WordCard;
use tracing::{error, info, warn};

use super::counter;
use super::episodes::{Episode, EpisodeCollection};
use super::errors::{AuthoringError, MisuseError, ValidationErrorKind};
use super::usage::{self, WordUsage};
use super::validation::{self, ValidationContext};

/// Number of episodes a story can have.
pub const MAX_EPISODES: u32 = 5;

/// Workflow phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Picking the word card for the current episode.
    SelectWords,
    /// Writing the current episode's draft.
    WriteEpisode,
    /// Naming the story and picking its cover.
    SetTitleAndThumbnail,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SelectWords => "select_words",
            Self::WriteEpisode => "write_episode",
            Self::SetTitleAndThumbnail => "set_title_and_thumbnail",
        };
        f.write_str(name)
    }
}

/// Identifies one outstanding network-bound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// A committed episode waiting for its follow-up word cards.
#[derive(Debug, Clone)]
pub struct PendingFetch {
    /// Token to hand back to [`StoryWorkflow::complete_advance`].
    pub token: RequestToken,
    /// The episode just committed, sent to the generator.
    pub chapter: Document,
}

/// A publish request waiting to be sent.
#[derive(Debug, Clone)]
pub struct PendingPublish {
    /// Token to hand back to [`StoryWorkflow::complete_publish`].
    pub token: RequestToken,
    /// Body for the persistence service.
    pub request: SaveStoryRequest,
}

/// State of one authoring session.
#[derive(Debug, Clone)]
pub struct StoryWorkflow {
    current_episode: u32,
    phase: Phase,
    draft: Document,
    selected_words: Option<WordCard>,
    word_options: Option<Vec<WordCard>>,
    episodes: EpisodeCollection,
    title: String,
    thumbnail_id: Option<String>,
    thumbnails: Vec<ThumbnailTemplate>,
    error_message: String,
    in_flight: Option<RequestToken>,
    issued_tokens: u64,
    published: Option<PublishedStory>,
}

impl Default for StoryWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryWorkflow {
    /// Creates a workflow at episode 1 with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_episode: 1,
            phase: Phase::SelectWords,
            draft: Document::empty(),
            selected_words: None,
            word_options: None,
            episodes: EpisodeCollection::new(),
            title: String::new(),
            thumbnail_id: None,
            thumbnails: Vec::new(),
            error_message: String::new(),
            in_flight: None,
            issued_tokens: 0,
            published: None,
        }
    }

    /// Creates a workflow offering `word_options` for episode 1.
    ///
    /// The first option and the first thumbnail are preselected.
    #[must_use]
    pub fn seeded(word_options: Vec<WordCard>, thumbnails: Vec<ThumbnailTemplate>) -> Self {
        let mut workflow = Self::new();
        workflow.selected_words = word_options.first().cloned();
        workflow.word_options = Some(word_options);
        workflow.thumbnail_id = thumbnails.first().map(|t| t.thumbnail_id.clone());
        workflow.thumbnails = thumbnails;
        workflow
    }

    // --- accessors ---

    /// Episode currently being prepared, `1..=MAX_EPISODES`.
    #[must_use]
    pub fn current_episode(&self) -> u32 {
        self.current_episode
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The draft being written.
    #[must_use]
    pub fn draft(&self) -> &Document {
        &self.draft
    }

    /// The card the current episode must use.
    #[must_use]
    pub fn selected_words(&self) -> Option<&WordCard> {
        self.selected_words.as_ref()
    }

    /// Cards offered for the current episode.
    #[must_use]
    pub fn word_options(&self) -> Option<&[WordCard]> {
        self.word_options.as_deref()
    }

    /// Episodes committed so far.
    #[must_use]
    pub fn episodes(&self) -> &EpisodeCollection {
        &self.episodes
    }

    /// Story title as entered.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Chosen cover image.
    #[must_use]
    pub fn thumbnail_id(&self) -> Option<&str> {
        self.thumbnail_id.as_deref()
    }

    /// Cover images known to this session.
    #[must_use]
    pub fn thumbnails(&self) -> &[ThumbnailTemplate] {
        &self.thumbnails
    }

    /// Message for the author about the last rejected action, or empty.
    #[must_use]
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Whether a network-bound transition is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The published story, once publishing succeeded.
    #[must_use]
    pub fn published(&self) -> Option<&PublishedStory> {
        self.published.as_ref()
    }

    /// Counted length of the draft.
    #[must_use]
    pub fn draft_char_count(&self) -> usize {
        counter::count(&self.draft)
    }

    /// Which selected words the draft uses. Nothing is used without a card.
    #[must_use]
    pub fn word_usage(&self) -> WordUsage {
        match &self.selected_words {
            Some(card) => usage::usage(&self.draft, card.words()),
            None => WordUsage::default(),
        }
    }

    // --- selection and editing ---

    /// Selects one of the offered cards without leaving `SelectWords`.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Misuse` outside `SelectWords`, while busy, or
    /// if `index` is not an offered option.
    pub fn select_option(&mut self, index: usize) -> Result<(), AuthoringError> {
        self.ensure_ready("select_option", Phase::SelectWords)?;
        let Some(card) = self
            .word_options
            .as_ref()
            .and_then(|options| options.get(index))
            .cloned()
        else {
            return Err(self.misuse(MisuseError::UnknownWordOption(index)));
        };
        self.selected_words = Some(card);
        self.error_message.clear();
        Ok(())
    }

    /// Confirms the word card and starts writing.
    ///
    /// `card`, when given, replaces the current selection first.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrorKind::NoWordsSelected` if no card is selected,
    /// or `AuthoringError::Misuse` outside `SelectWords` or while busy.
    pub fn choose_words(&mut self, card: Option<WordCard>) -> Result<(), AuthoringError> {
        self.ensure_ready("choose_words", Phase::SelectWords)?;
        if let Some(card) = card {
            self.selected_words = Some(card);
        }
        if let Err(kind) = self.check(Phase::SelectWords) {
            return Err(self.reject(kind));
        }
        self.phase = Phase::WriteEpisode;
        self.error_message.clear();
        info!(episode = self.current_episode, "word card chosen");
        Ok(())
    }

    /// Replaces the draft.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Misuse` outside `WriteEpisode` or while busy.
    pub fn update_draft(&mut self, document: Document) -> Result<(), AuthoringError> {
        self.ensure_ready("update_draft", Phase::WriteEpisode)?;
        self.draft = document;
        self.error_message.clear();
        Ok(())
    }

    /// Sets the story title.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Misuse` outside `SetTitleAndThumbnail` or while
    /// busy.
    pub fn set_title(&mut self, title: String) -> Result<(), AuthoringError> {
        self.ensure_ready("set_title", Phase::SetTitleAndThumbnail)?;
        self.title = title;
        self.error_message.clear();
        Ok(())
    }

    /// Picks the cover image.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Misuse` outside `SetTitleAndThumbnail`, while
    /// busy, or if the id is not in a non-empty thumbnail catalog.
    pub fn set_thumbnail(&mut self, thumbnail_id: String) -> Result<(), AuthoringError> {
        self.ensure_ready("set_thumbnail", Phase::SetTitleAndThumbnail)?;
        if !self.thumbnails.is_empty()
            && !self.thumbnails.iter().any(|t| t.thumbnail_id == thumbnail_id)
        {
            return Err(self.misuse(MisuseError::UnknownThumbnail(thumbnail_id)));
        }
        self.thumbnail_id = Some(thumbnail_id);
        self.error_message.clear();
        Ok(())
    }

    // --- transitions ---

    /// Commits the draft and requests word cards for the next episode.
    ///
    /// The commit is kept even if the request later fails, so a retry
    /// re-commits the same episode in place.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Validation` if the draft is rejected, or
    /// `AuthoringError::Misuse` outside `WriteEpisode`, while busy, or on
    /// the last episode.
    pub fn begin_advance(&mut self) -> Result<PendingFetch, AuthoringError> {
        self.ensure_ready("advance", Phase::WriteEpisode)?;
        if self.current_episode >= MAX_EPISODES {
            return Err(self.misuse(MisuseError::LastEpisodeReached(self.current_episode)));
        }
        self.commit_draft()?;
        let token = self.issue_token();
        Ok(PendingFetch {
            token,
            chapter: self.draft.clone(),
        })
    }

    /// Applies the generator's answer to an advance started with `token`.
    ///
    /// On success the first card is preselected, the episode number
    /// increments, and the draft resets. On failure only the busy flag
    /// clears.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::ExternalService` if the generator failed or
    /// returned no cards, or `MisuseError::StaleResponse` if `token` is not
    /// outstanding.
    pub fn complete_advance(
        &mut self,
        token: RequestToken,
        outcome: Result<Vec<WordCard>, ServiceError>,
    ) -> Result<(), AuthoringError> {
        self.settle(token)?;
        let cards = match outcome {
            Ok(cards) if !cards.is_empty() => cards,
            Ok(_) => {
                let err = ServiceError::MalformedResponse("no word cards returned".to_owned());
                return Err(self.upstream_failure("fetch the next word cards", err));
            }
            Err(err) => return Err(self.upstream_failure("fetch the next word cards", err)),
        };

        self.selected_words = cards.first().cloned();
        self.word_options = Some(cards);
        self.current_episode += 1;
        self.draft = Document::empty();
        self.phase = Phase::SelectWords;
        self.error_message.clear();
        info!(episode = self.current_episode, "advanced to next episode");
        Ok(())
    }

    /// Commits the draft and moves on to title and cover selection.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Validation` if the draft is rejected, or
    /// `AuthoringError::Misuse` outside `WriteEpisode` or while busy.
    pub fn finish(&mut self) -> Result<(), AuthoringError> {
        self.ensure_ready("finish", Phase::WriteEpisode)?;
        self.commit_draft()?;
        self.draft = Document::empty();
        self.phase = Phase::SetTitleAndThumbnail;
        info!(episodes = self.episodes.len(), "finished writing");
        Ok(())
    }

    /// Builds the publish request.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::Validation` if the title or cover is missing,
    /// or `AuthoringError::Misuse` outside `SetTitleAndThumbnail`, while busy,
    /// or after publishing.
    pub fn begin_publish(&mut self) -> Result<PendingPublish, AuthoringError> {
        self.ensure_ready("publish", Phase::SetTitleAndThumbnail)?;
        if let Err(kind) = self.check(Phase::SetTitleAndThumbnail) {
            return Err(self.reject(kind));
        }
        let Some(thumbnail_id) = self.thumbnail_id.clone() else {
            return Err(self.reject(ValidationErrorKind::MissingThumbnail));
        };
        let request = SaveStoryRequest {
            story_title: self.title.clone(),
            thumbnail_id,
            chapters: self.episodes.to_save_request(),
        };
        let token = self.issue_token();
        Ok(PendingPublish { token, request })
    }

    /// Applies the persistence service's answer to a publish started with
    /// `token`. Failures leave everything in place for a retry.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::ExternalService` if saving failed, or
    /// `MisuseError::StaleResponse` if `token` is not outstanding.
    pub fn complete_publish(
        &mut self,
        token: RequestToken,
        outcome: Result<PublishedStory, ServiceError>,
    ) -> Result<PublishedStory, AuthoringError> {
        self.settle(token)?;
        match outcome {
            Ok(story) => {
                info!(story_id = ?story.story_id, "story published");
                self.published = Some(story.clone());
                self.error_message.clear();
                Ok(story)
            }
            Err(err) => Err(self.upstream_failure("save the story", err)),
        }
    }

    /// Drops the outstanding request, if any; its outcome will be discarded.
    pub fn abandon(&mut self) {
        if self.in_flight.take().is_some() {
            info!("discarding in-flight request");
        }
    }

    // --- internals ---

    fn ensure_ready(&self, action: &'static str, phase: Phase) -> Result<(), AuthoringError> {
        if self.published.is_some() {
            return Err(self.misuse(MisuseError::AlreadyPublished));
        }
        if self.in_flight.is_some() {
            return Err(self.misuse(MisuseError::Busy));
        }
        if self.phase != phase {
            return Err(self.misuse(MisuseError::WrongPhase {
                action,
                phase: self.phase,
            }));
        }
        Ok(())
    }

    fn check(&self, phase: Phase) -> Result<(), ValidationErrorKind> {
        let context = ValidationContext {
            char_count: self.draft_char_count(),
            all_words_used: self.word_usage().all_used,
            selected_words: self.selected_words.as_ref(),
            title: &self.title,
            thumbnail_id: self.thumbnail_id.as_deref(),
        };
        validation::validate(phase, &context)
    }

    fn commit_draft(&mut self) -> Result<(), AuthoringError> {
        if let Err(kind) = self.check(Phase::WriteEpisode) {
            return Err(self.reject(kind));
        }
        let Some(words) = self.selected_words.clone() else {
            return Err(self.reject(ValidationErrorKind::NoWordsSelected));
        };
        self.episodes.upsert(Episode {
            id: self.current_episode,
            document: self.draft.clone(),
            words,
        });
        self.error_message.clear();
        info!(episode = self.current_episode, "episode committed");
        Ok(())
    }

    fn issue_token(&mut self) -> RequestToken {
        self.issued_tokens += 1;
        let token = RequestToken(self.issued_tokens);
        self.in_flight = Some(token);
        token
    }

    fn settle(&mut self, token: RequestToken) -> Result<(), AuthoringError> {
        if self.in_flight != Some(token) {
            return Err(self.misuse(MisuseError::StaleResponse));
        }
        self.in_flight = None;
        Ok(())
    }

    fn reject(&mut self, kind: ValidationErrorKind) -> AuthoringError {
        warn!(phase = %self.phase, reason = %kind, "transition rejected");
        self.error_message = kind.to_string();
        kind.into()
    }

    fn misuse(&self, err: MisuseError) -> AuthoringError {
        warn!(phase = %self.phase, error = %err, "workflow action misused");
        err.into()
    }

    fn upstream_failure(&mut self, what: &str, err: ServiceError) -> AuthoringError {
        error!(error = %err, "could not {what}");
        self.error_message = format!("could not {what}: {err}");
        err.into()
    }
}
