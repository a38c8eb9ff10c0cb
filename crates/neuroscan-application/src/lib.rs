//! Application services for the NeuroScan backend.
//!
//! Wires the domain layer to concrete backends and exposes the use cases
//! an HTTP surface needs: account signup/login, the password-reset flow,
//! and the scoped assistant chat, all guarded by the core auth gate.

pub mod account_service;
pub mod chat_service;
pub mod password;
pub mod password_reset_service;
pub mod validate;

pub use account_service::AccountService;
pub use chat_service::ChatService;
pub use password_reset_service::PasswordResetService;

use neuroscan_core::auth::{AuthGate, TokenIssuer};
use neuroscan_core::chat::{ConversationSessionStore, MEDIBOT_PERSONA};
use neuroscan_core::clock::{Clock, SystemClock};
use neuroscan_core::config::{AppConfig, Secrets};
use neuroscan_core::mail::MailDispatcher;
use neuroscan_core::otp::OtpRegistry;
use neuroscan_core::user::UserDirectory;
use neuroscan_core::{CoreError, Result};
use neuroscan_infrastructure::{
    HttpMailDispatcher, MemoryOtpRepository, MemorySessionRepository, MemoryUserDirectory,
};
use neuroscan_interaction::GeminiAssistant;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// The fully wired service graph for one process.
pub struct AppServices {
    pub gate: AuthGate,
    pub accounts: AccountService,
    pub password_reset: PasswordResetService,
    pub chat: ChatService,
}

impl AppServices {
    /// Builds the service graph from configuration and secrets.
    ///
    /// The in-memory backends used here are the single-process defaults;
    /// every dependency crosses a core trait, so an externally-backed
    /// deployment swaps constructors without touching the services.
    pub fn new(config: &AppConfig, secrets: &Secrets) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let tokens = Arc::new(TokenIssuer::new(
            secrets.token_secret.clone().into_bytes(),
            chrono::Duration::seconds(config.auth.token_ttl_secs),
            clock.clone(),
        ));

        let users: Arc<dyn UserDirectory> = Arc::new(MemoryUserDirectory::new());

        let otp = Arc::new(OtpRegistry::new(
            Arc::new(MemoryOtpRepository::new()),
            chrono::Duration::seconds(config.otp.ttl_secs),
            clock.clone(),
        ));

        let mail: Arc<dyn MailDispatcher> = Arc::new(
            HttpMailDispatcher::new(
                config.mail.endpoint.clone(),
                config.mail.sender.clone(),
                secrets.mail_api_key.clone(),
                Duration::from_secs(config.mail.request_timeout_secs),
            )
            .map_err(|e| CoreError::upstream(e.to_string()))?,
        );

        let sessions = match &secrets.gemini_api_key {
            Some(key) => {
                let assistant = GeminiAssistant::new(
                    key.clone(),
                    config.chat.model.clone(),
                    Duration::from_secs(config.chat.request_timeout_secs),
                )
                .map_err(|e| CoreError::upstream(e.to_string()))?;

                Some(Arc::new(ConversationSessionStore::new(
                    Arc::new(MemorySessionRepository::new()),
                    Arc::new(assistant),
                    &MEDIBOT_PERSONA,
                    config.chat.max_output_tokens,
                    clock.clone(),
                )))
            }
            None => {
                warn!("GEMINI_API_KEY not set; the chat assistant is disabled");
                None
            }
        };

        Ok(Self {
            gate: AuthGate::new(tokens.clone()),
            accounts: AccountService::new(users.clone(), tokens),
            password_reset: PasswordResetService::new(users, otp, mail),
            chat: ChatService::new(sessions),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secrets(gemini: Option<&str>) -> Secrets {
        Secrets {
            token_secret: "wiring-test-secret".to_string(),
            gemini_api_key: gemini.map(str::to_string),
            mail_api_key: None,
        }
    }

    #[tokio::test]
    async fn test_wired_gate_accepts_signup_token() {
        let services = AppServices::new(&AppConfig::default(), &secrets(None)).unwrap();

        let token = services
            .accounts
            .signup("alice", "alice@x.com", "secret-password")
            .await
            .unwrap();

        let principal = services
            .gate
            .authorize(Some(&format!("Bearer {}", token)))
            .unwrap();
        assert_eq!(principal.username, "alice");
    }

    #[tokio::test]
    async fn test_chat_disabled_without_api_key() {
        let services = AppServices::new(&AppConfig::default(), &secrets(None)).unwrap();
        let principal = neuroscan_core::auth::Principal::new("user-1", "alice");

        let err = services.chat.send_message(&principal, "hi").await.unwrap_err();

        assert!(err.is_upstream());
    }

    #[test]
    fn test_chat_enabled_with_api_key() {
        let services = AppServices::new(&AppConfig::default(), &secrets(Some("key"))).unwrap();

        // Construction alone proves the assistant wired up; no request is
        // sent until a message arrives.
        let _ = services;
    }
}
