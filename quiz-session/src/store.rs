//! Server-side session records keyed by the token the client presents.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::state::SessionState;

/// Storage for [`SessionState`] records.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the record for `token`, or `None` for an unknown token.
    async fn load(&self, token: &str) -> Option<SessionState>;

    /// Inserts or replaces the record for `token`.
    async fn save(&self, token: &str, state: SessionState);

    /// Drops records idle for longer than the session lifetime at `now`, and
    /// records without any activity timestamp (they load as the default
    /// state anyway). Returns how many were removed.
    async fn purge_idle(&self, now: DateTime<Utc>) -> usize;
}

/// Process-local store. Records are lost on restart, as are the cookie keys
/// that would identify them.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionState>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, token: &str) -> Option<SessionState> {
        self.sessions.read().await.get(token).cloned()
    }

    async fn save(&self, token: &str, state: SessionState) {
        self.sessions.write().await.insert(token.to_owned(), state);
    }

    async fn purge_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, state| state.last_activity.is_some() && !state.is_idle_at(now));
        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed, remaining = sessions.len(), "purged idle sessions");
        }
        removed
    }
}
