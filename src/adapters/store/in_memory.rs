//! In-memory session store adapter.
//!
//! The reference deployment for development and tests. Sessions live in a
//! process-local map; durability across restarts is explicitly out of
//! scope.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{Session, SessionId};
use crate::ports::{SessionStore, StoreError};

/// In-memory storage for sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored sessions (useful for tests).
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    /// Number of stored sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, id: &SessionId) -> Result<Session, StoreError> {
        let sessions = self.sessions.read().await;
        if let Some(session) = sessions.get(id) {
            return Ok(session.clone());
        }
        drop(sessions);
        // Lazy creation: the session is only materialized in the map on
        // the first put.
        Ok(Session::new(id.clone()))
    }

    async fn put(&self, session: &Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id().clone(), session.clone());
        Ok(())
    }
}
