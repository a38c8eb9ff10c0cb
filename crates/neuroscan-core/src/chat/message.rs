//! Conversation turn types.

use serde::{Deserialize, Serialize};

/// Represents the role of a turn in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnRole {
    /// Scope-setting instruction injected at session creation.
    System,
    /// Turn from the authenticated user.
    User,
    /// Turn from the AI assistant.
    Assistant,
}

/// A single turn in a conversation history.
///
/// Each turn has a role, content, and a timestamp indicating when it was
/// appended (ISO 8601 format).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// The role of the turn's author.
    pub role: TurnRole,
    /// The content of the turn.
    pub content: String,
    /// Timestamp when the turn was appended (ISO 8601 format).
    pub timestamp: String,
}

impl ConversationTurn {
    pub fn new(
        role: TurnRole,
        content: impl Into<String>,
        timestamp: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: timestamp.to_rfc3339(),
        }
    }
}
