//! Command handlers for the authoring workflow.
//!
//! These functions drive the transitions that need an external service:
//! lock the session, begin the transition, release the lock while the
//! service call is in flight, then lock again to apply the outcome. The
//! session stays responsive (and reports busy) during the call.

use std::sync::{Mutex, MutexGuard, PoisonError};

use storyweave_core::error::ServiceError;
use storyweave_core::services::{
    InitialWordSource, StoryGenerator, StoryPublisher, ThumbnailCatalog,
};
use storyweave_core::story::PublishedStory;
use tracing::{error, info};

use crate::domain::errors::AuthoringError;
use crate::domain::workflow::StoryWorkflow;

/// Locks a session.
///
/// A poisoned lock is recovered: every workflow mutation completes
/// synchronously, so the state behind it is always consistent.
pub fn lock_session(session: &Mutex<StoryWorkflow>) -> MutexGuard<'_, StoryWorkflow> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Starts a session: loads the opening word cards and the cover catalog.
///
/// # Errors
///
/// Returns `AuthoringError::ExternalService` if either service fails or no
/// word cards are offered.
pub async fn start_session(
    initial_words: &dyn InitialWordSource,
    thumbnails: &dyn ThumbnailCatalog,
) -> Result<StoryWorkflow, AuthoringError> {
    let word_options = initial_words
        .initial_word_cards()
        .await
        .inspect_err(|err| error!(error = %err, "could not load the opening word cards"))?;
    if word_options.is_empty() {
        error!("word service offered no opening cards");
        return Err(ServiceError::MalformedResponse("no word cards returned".to_owned()).into());
    }

    let templates = thumbnails
        .thumbnail_templates()
        .await
        .inspect_err(|err| error!(error = %err, "could not load the thumbnail catalog"))?;

    info!(
        word_options = word_options.len(),
        thumbnails = templates.len(),
        "authoring session started"
    );
    Ok(StoryWorkflow::seeded(word_options, templates))
}

/// Commits the current episode and fetches the next episode's word cards.
///
/// # Errors
///
/// Returns `AuthoringError` if the transition is rejected or the generator
/// fails. Either way the session is left resumable.
pub async fn handle_advance(
    session: &Mutex<StoryWorkflow>,
    generator: &dyn StoryGenerator,
) -> Result<(), AuthoringError> {
    let pending = lock_session(session).begin_advance()?;

    let outcome = generator.next_word_cards(&pending.chapter).await;

    lock_session(session).complete_advance(pending.token, outcome)
}

/// Publishes the story.
///
/// # Errors
///
/// Returns `AuthoringError` if publishing is rejected or the persistence
/// service fails. Failures leave the session ready for a retry.
pub async fn handle_publish(
    session: &Mutex<StoryWorkflow>,
    publisher: &dyn StoryPublisher,
) -> Result<PublishedStory, AuthoringError> {
    let pending = lock_session(session).begin_publish()?;

    let outcome = publisher.save_story(&pending.request).await;

    lock_session(session).complete_publish(pending.token, outcome)
}
