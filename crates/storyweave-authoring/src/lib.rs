//! Storyweave: multi-episode authoring workflow.
//!
//! Responsible for episode progression, draft validation, vocabulary usage
//! checks, and assembling the publish request.

pub mod application;
pub mod domain;
