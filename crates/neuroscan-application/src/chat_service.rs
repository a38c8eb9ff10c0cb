//! Scoped assistant conversations.

use neuroscan_core::auth::Principal;
use neuroscan_core::chat::ConversationSessionStore;
use neuroscan_core::{CoreError, Result};
use std::sync::Arc;

/// Routes an authenticated user's message through their session.
///
/// The store is optional: when the assistant backend could not be
/// configured (no API key), every message fails with a single
/// "not configured" outcome instead of panicking at startup.
pub struct ChatService {
    sessions: Option<Arc<ConversationSessionStore>>,
}

impl ChatService {
    pub fn new(sessions: Option<Arc<ConversationSessionStore>>) -> Self {
        Self { sessions }
    }

    /// Sends a message as the given principal and returns the reply.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Validation`] - empty message
    /// - [`CoreError::Upstream`] - assistant backend is not configured
    ///
    /// Collaborator failures after this point do not error: the session
    /// store degrades to its fallback reply.
    pub async fn send_message(&self, principal: &Principal, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(CoreError::validation("no message provided"));
        }

        let store = self
            .sessions
            .as_ref()
            .ok_or_else(|| CoreError::upstream("the assistant is not configured on the server"))?;

        let handle = store.get_or_create(&principal.id).await;
        store.send_and_append(&handle, text).await
    }
}
