//! Storyweave API server entry point.

use std::sync::Arc;
use std::time::Duration;

use storyweave_api::config::AppConfig;
use storyweave_api::error::AppError;
use storyweave_api::registry::SessionRegistry;
use storyweave_api::state::AppState;
use storyweave_client::HttpStoryBackend;
use storyweave_core::clock::SystemClock;
use tracing::info;
use tracing_subscriber::EnvFilter;

const EVICTION_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting Storyweave API server");

    let config = AppConfig::from_env()?;

    let mut backend =
        HttpStoryBackend::new(config.story_api_endpoint.clone(), config.upstream_timeout)?;
    if let Some(token) = &config.story_api_token {
        backend = backend.with_bearer_token(token.clone());
    }

    let app_state = AppState::with_backend(Arc::new(backend), Arc::new(SystemClock));
    spawn_idle_eviction(Arc::clone(&app_state.sessions), config.session_idle_timeout);

    let addr = config.bind_addr()?;
    info!(%addr, upstream = %config.story_api_endpoint, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, storyweave_api::app(app_state)).await?;

    Ok(())
}

/// Periodically drops sessions nobody has touched within `ttl`.
fn spawn_idle_eviction(sessions: Arc<SessionRegistry>, ttl: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(EVICTION_INTERVAL);
        loop {
            ticker.tick().await;
            let evicted = sessions.evict_idle(ttl);
            if evicted > 0 {
                info!(evicted, remaining = sessions.len(), "idle sessions evicted");
            }
        }
    });
}
