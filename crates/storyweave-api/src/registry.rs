//! In-memory registry of live authoring sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use storyweave_authoring::application::command_handlers::lock_session;
use storyweave_authoring::domain::workflow::StoryWorkflow;
use storyweave_core::clock::Clock;
use tracing::info;
use uuid::Uuid;

/// A shared handle to one session's workflow.
pub type SessionHandle = Arc<Mutex<StoryWorkflow>>;

struct SessionEntry {
    workflow: SessionHandle,
    last_active: DateTime<Utc>,
}

/// Live sessions keyed by id, each stamped with its last use.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
    clock: Arc<dyn Clock>,
}

impl SessionRegistry {
    /// Creates an empty registry that timestamps sessions with `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Stores a new session and returns its id.
    pub fn insert(&self, workflow: StoryWorkflow) -> Uuid {
        let session_id = Uuid::new_v4();
        let entry = SessionEntry {
            workflow: Arc::new(Mutex::new(workflow)),
            last_active: self.clock.now(),
        };
        self.lock().insert(session_id, entry);
        session_id
    }

    /// Returns the session and marks it as used.
    pub fn get(&self, session_id: Uuid) -> Option<SessionHandle> {
        let now = self.clock.now();
        let mut sessions = self.lock();
        let entry = sessions.get_mut(&session_id)?;
        entry.last_active = now;
        Some(Arc::clone(&entry.workflow))
    }

    /// Removes the session, returning it if it existed.
    pub fn remove(&self, session_id: Uuid) -> Option<SessionHandle> {
        self.lock().remove(&session_id).map(|entry| entry.workflow)
    }

    /// Abandons and removes every session untouched for longer than `ttl`.
    /// Returns how many were removed.
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let Some(cutoff) = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|ttl| self.clock.now().checked_sub_signed(ttl))
        else {
            return 0;
        };

        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|session_id, entry| {
            if entry.last_active >= cutoff {
                return true;
            }
            lock_session(&entry.workflow).abandon();
            info!(%session_id, "evicted idle session");
            false
        });
        before - sessions.len()
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no sessions are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
