//! Storyweave Core: shared document model and service abstractions.
//!
//! This crate defines the rich-text document tree, vocabulary word cards,
//! the wire types exchanged with the story backend, and the traits the
//! authoring workflow calls into. It contains no transport code.

pub mod clock;
pub mod document;
pub mod error;
pub mod services;
pub mod story;
pub mod word_card;
