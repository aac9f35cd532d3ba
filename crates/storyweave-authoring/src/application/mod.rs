//! Application services for the authoring workflow.

pub mod command_handlers;
pub mod query_handlers;
