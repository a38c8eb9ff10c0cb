//! Durable account store contract.
//!
//! Persistence of accounts is an external collaborator; this subsystem
//! needs only the narrow operations below. History records and their
//! pagination live entirely outside this crate.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A stored user account.
///
/// `password_hash` is the salted hash produced by the application layer;
/// plaintext passwords never reach the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Stable account identifier (UUID format)
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Lookup and mutation of durable user accounts.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds an account by email.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(account))`: account found
    /// - `Ok(None)`: no account with this email
    /// - `Err(_)`: storage failure
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>>;

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// [`CoreError::Conflict`](crate::CoreError::Conflict) if an account
    /// with the same email already exists.
    async fn create(&self, account: UserAccount) -> Result<UserAccount>;

    /// Replaces the stored password hash for an account.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`](crate::CoreError::NotFound) if no account
    /// with this email exists.
    async fn update_password(&self, email: &str, password_hash: &str) -> Result<()>;
}
