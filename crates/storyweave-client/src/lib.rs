//! Storyweave Client: reqwest implementation of the story service traits.
//!
//! One [`HttpStoryBackend`] serves all four traits from
//! `storyweave_core::services`, talking to the story backend's REST API.

mod backend;

pub use backend::HttpStoryBackend;
