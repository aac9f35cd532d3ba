//! Storyweave API: HTTP surface for in-memory authoring sessions.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod registry;
pub mod routes;
pub mod state;

use crate::state::AppState;

/// Builds the full application router.
// TODO: Replace CorsLayer::permissive() with the editor's origin once it is configurable.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/stories", routes::sessions::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
