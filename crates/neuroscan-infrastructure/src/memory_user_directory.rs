//! In-memory user directory.
//!
//! A stand-in for the durable account store, keyed by email. Used by
//! tests and single-process deployments; a database-backed directory
//! implements the same core trait.

use async_trait::async_trait;
use neuroscan_core::user::{UserAccount, UserDirectory};
use neuroscan_core::{CoreError, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryUserDirectory {
    accounts: RwLock<HashMap<String, UserAccount>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(email).cloned())
    }

    async fn create(&self, account: UserAccount) -> Result<UserAccount> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.email) {
            return Err(CoreError::conflict(
                "an account with this email already exists",
            ));
        }
        accounts.insert(account.email.clone(), account.clone());
        Ok(account)
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(email)
            .ok_or_else(|| CoreError::not_found("account", email))?;
        account.password_hash = password_hash.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(email: &str) -> UserAccount {
        UserAccount {
            id: format!("id-{}", email),
            username: "alice".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let directory = MemoryUserDirectory::new();

        directory.create(account("a@x.com")).await.unwrap();

        let found = directory.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.email, "a@x.com");
        assert!(directory.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let directory = MemoryUserDirectory::new();
        directory.create(account("a@x.com")).await.unwrap();

        let err = directory.create(account("a@x.com")).await.unwrap_err();

        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_update_password() {
        let directory = MemoryUserDirectory::new();
        directory.create(account("a@x.com")).await.unwrap();

        directory.update_password("a@x.com", "new-hash").await.unwrap();

        let found = directory.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.password_hash, "new-hash");
    }

    #[tokio::test]
    async fn test_update_password_unknown_email_is_not_found() {
        let directory = MemoryUserDirectory::new();

        let err = directory
            .update_password("ghost@x.com", "hash")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }
}
