//! Account signup and login.

use crate::password::{hash_password, verify_password};
use crate::validate;
use neuroscan_core::auth::{Principal, TokenIssuer};
use neuroscan_core::user::{UserAccount, UserDirectory};
use neuroscan_core::{CoreError, Result};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Registers accounts and authenticates credentials into bearer tokens.
pub struct AccountService {
    users: Arc<dyn UserDirectory>,
    tokens: Arc<TokenIssuer>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserDirectory>, tokens: Arc<TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    /// Registers a new account and returns a bearer token for it.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Validation`] - missing username, malformed email,
    ///   or a password shorter than the policy allows
    /// - [`CoreError::Conflict`] - an account with this email exists
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> Result<String> {
        validate::username(username)?;
        validate::email(email)?;
        validate::password(password)?;

        if self.users.find_by_email(email).await?.is_some() {
            return Err(CoreError::conflict(
                "an account with this email already exists",
            ));
        }

        let account = self
            .users
            .create(UserAccount {
                id: Uuid::new_v4().to_string(),
                username: username.to_string(),
                email: email.to_string(),
                password_hash: hash_password(password),
            })
            .await?;
        info!(user = %account.id, "account created");

        let principal = Principal::new(account.id, account.username);
        self.tokens.issue(&principal)
    }

    /// Authenticates credentials and returns a bearer token.
    ///
    /// Unknown email and wrong password produce the same generic outcome
    /// so the response cannot be used to enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        validate::email(email)?;

        let account = self.users.find_by_email(email).await?;
        match account {
            Some(account) if verify_password(password, &account.password_hash) => {
                debug!(user = %account.id, "login succeeded");
                let principal = Principal::new(account.id, account.username);
                self.tokens.issue(&principal)
            }
            _ => Err(CoreError::validation("invalid credentials")),
        }
    }
}
