//! Domain model for the authoring workflow.

pub mod counter;
pub mod episodes;
pub mod errors;
pub mod usage;
pub mod validation;
pub mod workflow;
