//! Error types for the NeuroScan backend.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the NeuroScan backend.
///
/// Every failure in the credential and session subsystem maps onto one of
/// these variants. Nothing here is fatal to the process; each error is
/// scoped to a single request.
///
/// Token verification sub-kinds (malformed, bad signature, expired) are
/// intentionally collapsed into [`CoreError::Unauthenticated`] at the
/// [`AuthGate`](crate::auth::AuthGate) boundary so clients cannot probe
/// which check failed.
#[derive(Error, Debug, Clone, Serialize)]
pub enum CoreError {
    /// Missing, invalid, or expired credentials. Deliberately carries no
    /// detail about which check failed.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A conflicting entity already exists (e.g. duplicate account)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A time-bounded record has passed its TTL
    #[error("Expired: {0}")]
    Expired(String),

    /// A submitted secret did not match the stored one
    #[error("Mismatch: {0}")]
    Mismatch(String),

    /// An external collaborator (mail, assistant) failed or timed out
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// Malformed or rejected input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates an Expired error
    pub fn expired(message: impl Into<String>) -> Self {
        Self::Expired(message.into())
    }

    /// Creates a Mismatch error
    pub fn mismatch(message: impl Into<String>) -> Self {
        Self::Mismatch(message.into())
    }

    /// Creates an Upstream error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an Unauthenticated error
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Check if this is an Expired error
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired(_))
    }

    /// Check if this is a Mismatch error
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch(_))
    }

    /// Check if this is an Upstream error
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization: {}", err))
    }
}

/// Conversion from String (for error messages)
impl From<String> for CoreError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, CoreError>`.
pub type Result<T> = std::result::Result<T, CoreError>;
