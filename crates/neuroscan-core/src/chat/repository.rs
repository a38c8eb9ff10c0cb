//! Session repository trait.
//!
//! Defines the interface for conversational session storage.

use super::session::ConversationSession;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A live handle to one principal's session.
///
/// The inner mutex serializes turns for that principal: a second message
/// from the same user while the first is still awaiting a reply queues on
/// the lock instead of interleaving.
pub type SessionHandle = Arc<Mutex<ConversationSession>>;

/// An abstract keyed store mapping principal ids to live sessions.
///
/// Decouples [`ConversationSessionStore`](super::ConversationSessionStore)
/// from the storage mechanism so a bounded or evicting backend can be
/// substituted without touching call sites. `remove` and `count` exist so
/// an idle-eviction policy can be layered on later.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds the session handle for a principal, if one exists.
    async fn find(&self, owner_id: &str) -> Option<SessionHandle>;

    /// Inserts a session unless one already exists for the principal.
    ///
    /// # Returns
    ///
    /// The handle that is now live for `owner_id`: the freshly inserted
    /// session, or the pre-existing one if a concurrent caller won the
    /// race.
    async fn insert_if_absent(
        &self,
        owner_id: &str,
        session: ConversationSession,
    ) -> SessionHandle;

    /// Removes the session for a principal, if present.
    async fn remove(&self, owner_id: &str);

    /// Returns the number of live sessions.
    async fn count(&self) -> usize;
}
