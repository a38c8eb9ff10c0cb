//! In-memory conversation session repository.

use async_trait::async_trait;
use neuroscan_core::chat::{ConversationSession, SessionHandle, SessionRepository};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Keeps live session handles in a process-local map.
///
/// Sessions persist for the process lifetime; there is no idle eviction
/// in the base design. `remove`/`count` support layering one on later.
#[derive(Default)]
pub struct MemorySessionRepository {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn find(&self, owner_id: &str) -> Option<SessionHandle> {
        let sessions = self.sessions.read().await;
        sessions.get(owner_id).cloned()
    }

    async fn insert_if_absent(
        &self,
        owner_id: &str,
        session: ConversationSession,
    ) -> SessionHandle {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(owner_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(session)))
            .clone()
    }

    async fn remove(&self, owner_id: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(owner_id);
    }

    async fn count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}
