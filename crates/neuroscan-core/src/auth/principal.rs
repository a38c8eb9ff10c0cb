//! Principal identity type.

use serde::{Deserialize, Serialize};

/// The identity asserted by a verified bearer token.
///
/// A principal is immutable once minted and is never persisted by this
/// subsystem; durable account storage is an external collaborator
/// (see [`UserDirectory`](crate::user::UserDirectory)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable account identifier (UUID format)
    pub id: String,
    /// Display name chosen at signup
    pub username: String,
}

impl Principal {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}
