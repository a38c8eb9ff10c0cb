//! Assistant collaborator contract.
//!
//! The conversational assistant is an external service reached over HTTP;
//! this subsystem only owns the turn history handed to it.

use crate::chat::ConversationTurn;
use async_trait::async_trait;
use thiserror::Error;

/// Why an assistant generation attempt failed.
#[derive(Error, Debug, Clone)]
pub enum AssistantError {
    /// The request never completed (connect failure, timeout).
    #[error("assistant request failed: {message}")]
    Request { message: String, is_retryable: bool },

    /// The service answered with a non-success status.
    #[error("assistant API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The service answered but carried no usable text.
    #[error("assistant returned an empty response")]
    EmptyResponse,
}

impl AssistantError {
    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request { is_retryable, .. } => *is_retryable,
            Self::Api { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::EmptyResponse => false,
        }
    }
}

/// Generates a reply from a turn history.
///
/// Implementations must bound the call with a timeout; callers degrade to
/// a fallback reply on any error rather than propagating it to the user.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Generates a reply to the final (user) turn of `turns`.
    ///
    /// # Arguments
    ///
    /// * `turns` - Full history including the persona seed turns and the
    ///   new user turn as the last element
    /// * `max_output_tokens` - Output cap forwarded to the service
    async fn generate(
        &self,
        turns: &[ConversationTurn],
        max_output_tokens: u32,
    ) -> Result<String, AssistantError>;
}
