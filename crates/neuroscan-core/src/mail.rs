//! Mail collaborator contract.

use async_trait::async_trait;
use thiserror::Error;

/// An outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// A failed mail dispatch.
///
/// Reported to the caller, never retried internally; retrying (e.g.
/// resending an OTP) is the caller's decision.
#[derive(Error, Debug, Clone)]
#[error("mail dispatch failed: {0}")]
pub struct MailError(pub String);

/// Delivers messages to recipients.
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    /// Sends one message. Failure leaves no partial state behind.
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}
