//! Shared test doubles and fixtures for Storyweave.

mod clock;
mod fixtures;
mod services;

pub use clock::ManualClock;
pub use fixtures::{text_document, thumbnail, word_card};
pub use services::{
    RecordingPublisher, ScriptedGenerator, StaticThumbnailCatalog, StaticWordSource,
    UnavailableService,
};
