//! Conversation session domain model.

use super::message::{ConversationTurn, TurnRole};
use super::persona::Persona;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A principal's running conversational context.
///
/// Created lazily on the first assistant interaction and mutated only by
/// appending turns in strict chronological order for that principal.
///
/// Invariant: the first two turns are always the persona seed pair (one
/// system-setup turn, one acknowledgment turn), established before any
/// user turn can be appended. [`ConversationSession::new`] is the only
/// constructor, so the invariant holds for every session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSession {
    /// Principal id that owns this session
    pub owner_id: String,
    /// Ordered turn history, persona seed turns first
    pub turns: Vec<ConversationTurn>,
    /// Output cap forwarded to the assistant backend on every request
    pub max_output_tokens: u32,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
}

impl ConversationSession {
    /// Creates a session seeded with the persona's setup turns.
    pub fn new(
        owner_id: impl Into<String>,
        persona: &Persona,
        max_output_tokens: u32,
        now: DateTime<Utc>,
    ) -> Self {
        let turns = vec![
            ConversationTurn::new(TurnRole::System, persona.system_prompt(), now),
            ConversationTurn::new(TurnRole::Assistant, persona.acknowledgment(), now),
        ];

        Self {
            owner_id: owner_id.into(),
            turns,
            max_output_tokens,
            created_at: now.to_rfc3339(),
        }
    }

    /// Appends a turn at the end of the history.
    pub fn append_turn(&mut self, role: TurnRole, content: impl Into<String>, now: DateTime<Utc>) {
        self.turns.push(ConversationTurn::new(role, content, now));
    }

    /// Returns the number of turns, persona seed turns included.
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::persona::MEDIBOT_PERSONA;

    #[test]
    fn test_new_session_starts_with_persona_seed_turns() {
        let session = ConversationSession::new("user-1", &MEDIBOT_PERSONA, 500, Utc::now());

        assert_eq!(session.turn_count(), 2);
        assert_eq!(session.turns[0].role, TurnRole::System);
        assert_eq!(session.turns[0].content, MEDIBOT_PERSONA.system_prompt());
        assert_eq!(session.turns[1].role, TurnRole::Assistant);
        assert_eq!(session.turns[1].content, MEDIBOT_PERSONA.acknowledgment());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut session = ConversationSession::new("user-1", &MEDIBOT_PERSONA, 500, Utc::now());

        session.append_turn(TurnRole::User, "hello", Utc::now());
        session.append_turn(TurnRole::Assistant, "hi", Utc::now());

        assert_eq!(session.turns[2].role, TurnRole::User);
        assert_eq!(session.turns[3].role, TurnRole::Assistant);
    }
}
