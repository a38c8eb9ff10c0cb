//! Conversation session store.

use super::message::{ConversationTurn, TurnRole};
use super::persona::Persona;
use super::repository::{SessionHandle, SessionRepository};
use super::session::ConversationSession;
use crate::assistant::AssistantBackend;
use crate::clock::Clock;
use crate::error::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// User-safe reply returned when the assistant collaborator fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

/// Manages the lifecycle of per-principal conversation sessions.
///
/// Sessions are created lazily on first use, seeded with the configured
/// persona's setup turns, and held for the process lifetime (no idle
/// eviction in the base design). All turn appends for one principal are
/// serialized through the session's own mutex; distinct principals
/// proceed fully in parallel.
pub struct ConversationSessionStore {
    repository: Arc<dyn SessionRepository>,
    assistant: Arc<dyn AssistantBackend>,
    persona: &'static Persona,
    max_output_tokens: u32,
    clock: Arc<dyn Clock>,
}

impl ConversationSessionStore {
    /// Creates a store over a repository backend and assistant collaborator.
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        assistant: Arc<dyn AssistantBackend>,
        persona: &'static Persona,
        max_output_tokens: u32,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            assistant,
            persona,
            max_output_tokens,
            clock,
        }
    }

    /// Returns the principal's session, creating it on first use.
    ///
    /// A new session always carries the persona seed turns before any
    /// user turn; racing callers converge on a single handle.
    pub async fn get_or_create(&self, owner_id: &str) -> SessionHandle {
        if let Some(handle) = self.repository.find(owner_id).await {
            return handle;
        }

        debug!(owner = owner_id, "creating conversation session");
        let session = ConversationSession::new(
            owner_id,
            self.persona,
            self.max_output_tokens,
            self.clock.now(),
        );
        self.repository.insert_if_absent(owner_id, session).await
    }

    /// Sends a user message through the assistant and records the exchange.
    ///
    /// Holds the session lock for the whole exchange so turns for one
    /// principal cannot interleave. The full turn history, user text
    /// included, is forwarded to the collaborator along with the session's
    /// output cap.
    ///
    /// On collaborator failure the user's turn is still appended (so the
    /// conversation resumes cleanly on retry) but no reply turn is
    /// recorded, and the caller receives [`FALLBACK_REPLY`].
    pub async fn send_and_append(&self, handle: &SessionHandle, user_text: &str) -> Result<String> {
        let mut session = handle.lock().await;
        let now = self.clock.now();

        let mut context = session.turns.clone();
        context.push(ConversationTurn::new(TurnRole::User, user_text, now));

        match self
            .assistant
            .generate(&context, session.max_output_tokens)
            .await
        {
            Ok(reply) => {
                session.append_turn(TurnRole::User, user_text, now);
                session.append_turn(TurnRole::Assistant, reply.clone(), self.clock.now());
                Ok(reply)
            }
            Err(cause) => {
                warn!(owner = %session.owner_id, %cause, "assistant backend failed; returning fallback reply");
                session.append_turn(TurnRole::User, user_text, now);
                Ok(FALLBACK_REPLY.to_string())
            }
        }
    }

    /// Returns the number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::AssistantError;
    use crate::chat::persona::MEDIBOT_PERSONA;
    use crate::clock::ManualClock;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    // Mock SessionRepository for testing
    struct MockSessionRepository {
        sessions: StdMutex<HashMap<String, SessionHandle>>,
    }

    impl MockSessionRepository {
        fn new() -> Self {
            Self {
                sessions: StdMutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn find(&self, owner_id: &str) -> Option<SessionHandle> {
            let sessions = self.sessions.lock().unwrap();
            sessions.get(owner_id).cloned()
        }

        async fn insert_if_absent(
            &self,
            owner_id: &str,
            session: ConversationSession,
        ) -> SessionHandle {
            let mut sessions = self.sessions.lock().unwrap();
            sessions
                .entry(owner_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(session)))
                .clone()
        }

        async fn remove(&self, owner_id: &str) {
            let mut sessions = self.sessions.lock().unwrap();
            sessions.remove(owner_id);
        }

        async fn count(&self) -> usize {
            let sessions = self.sessions.lock().unwrap();
            sessions.len()
        }
    }

    // Mock AssistantBackend that replies with a canned answer, or fails.
    struct MockAssistant {
        fail: bool,
        calls: AtomicUsize,
    }

    impl MockAssistant {
        fn replying() -> Self {
            Self {
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl AssistantBackend for MockAssistant {
        async fn generate(
            &self,
            turns: &[ConversationTurn],
            _max_output_tokens: u32,
        ) -> std::result::Result<String, AssistantError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AssistantError::Request {
                    message: "connection refused".to_string(),
                    is_retryable: true,
                });
            }
            let last = turns.last().expect("context is never empty");
            Ok(format!("reply to: {}", last.content))
        }
    }

    fn store_with(assistant: Arc<MockAssistant>) -> ConversationSessionStore {
        ConversationSessionStore::new(
            Arc::new(MockSessionRepository::new()),
            assistant,
            &MEDIBOT_PERSONA,
            500,
            Arc::new(ManualClock::start_now()),
        )
    }

    #[tokio::test]
    async fn test_new_session_seeded_before_first_user_turn() {
        let store = store_with(Arc::new(MockAssistant::replying()));

        let handle = store.get_or_create("user-1").await;

        let session = handle.lock().await;
        assert_eq!(session.turns[0].role, TurnRole::System);
        assert_eq!(session.turns[1].role, TurnRole::Assistant);
        assert_eq!(session.turn_count(), 2);
    }

    #[tokio::test]
    async fn test_get_or_create_reuses_existing_session() {
        let store = store_with(Arc::new(MockAssistant::replying()));

        let first = store.get_or_create("user-1").await;
        {
            let mut session = first.lock().await;
            session.append_turn(TurnRole::User, "hello", chrono::Utc::now());
        }

        let second = store.get_or_create("user-1").await;
        assert_eq!(second.lock().await.turn_count(), 3);
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_send_appends_user_and_reply_turns() {
        let store = store_with(Arc::new(MockAssistant::replying()));
        let handle = store.get_or_create("user-1").await;

        let reply = store.send_and_append(&handle, "what is a glioma?").await.unwrap();

        assert_eq!(reply, "reply to: what is a glioma?");
        let session = handle.lock().await;
        assert_eq!(session.turn_count(), 4);
        assert_eq!(session.turns[2].role, TurnRole::User);
        assert_eq!(session.turns[2].content, "what is a glioma?");
        assert_eq!(session.turns[3].role, TurnRole::Assistant);
        assert_eq!(session.turns[3].content, reply);
    }

    #[tokio::test]
    async fn test_failure_returns_fallback_and_keeps_user_turn_only() {
        let store = store_with(Arc::new(MockAssistant::failing()));
        let handle = store.get_or_create("user-1").await;

        let reply = store.send_and_append(&handle, "hello?").await.unwrap();

        assert_eq!(reply, FALLBACK_REPLY);
        let session = handle.lock().await;
        assert_eq!(session.turn_count(), 3);
        assert_eq!(session.turns[2].role, TurnRole::User);
        assert_eq!(session.turns[2].content, "hello?");
    }

    #[tokio::test]
    async fn test_concurrent_sends_do_not_interleave_turns() {
        let assistant = Arc::new(MockAssistant::replying());
        let store = Arc::new(store_with(assistant.clone()));
        let handle = store.get_or_create("user-1").await;

        let (a, b) = tokio::join!(
            {
                let store = store.clone();
                let handle = handle.clone();
                async move { store.send_and_append(&handle, "first").await }
            },
            {
                let store = store.clone();
                let handle = handle.clone();
                async move { store.send_and_append(&handle, "second").await }
            }
        );
        a.unwrap();
        b.unwrap();

        // Whatever order the tasks ran in, each exchange is a contiguous
        // user/assistant pair after the two seed turns.
        let session = handle.lock().await;
        assert_eq!(session.turn_count(), 6);
        assert_eq!(session.turns[2].role, TurnRole::User);
        assert_eq!(session.turns[3].role, TurnRole::Assistant);
        assert_eq!(session.turns[4].role, TurnRole::User);
        assert_eq!(session.turns[5].role, TurnRole::Assistant);
        assert_eq!(assistant.calls.load(Ordering::SeqCst), 2);
    }
}
