//! Application configuration.
//!
//! Non-secret settings load from a TOML file with serde defaults; secrets
//! (signing key, API keys) come from the environment and are kept in a
//! separate struct so they never end up in a config file or log line.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub auth: AuthConfig,
    pub otp: OtpConfig,
    pub chat: ChatConfig,
    pub mail: MailConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// Bearer token lifetime in seconds
    pub token_ttl_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_secs: 3600,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct OtpConfig {
    /// One-time code lifetime in seconds
    pub ttl_secs: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self { ttl_secs: 600 }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct ChatConfig {
    /// Assistant model identifier
    pub model: String,
    /// Output cap forwarded with every generation request
    pub max_output_tokens: u32,
    /// Hard bound on each assistant HTTP call
    pub request_timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash-latest".to_string(),
            max_output_tokens: 500,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct MailConfig {
    /// Transactional mail API endpoint
    pub endpoint: String,
    /// From-address on outbound messages
    pub sender: String,
    /// Hard bound on each mail HTTP call
    pub request_timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://mail.invalid/v1/send".to_string(),
            sender: "NeuroScan <no-reply@neuroscan.app>".to_string(),
            request_timeout_secs: 15,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// Missing sections and fields fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CoreError::validation(format!("cannot read config {}: {}", path.display(), e))
        })?;
        toml::from_str(&text).map_err(|e| CoreError::validation(format!("invalid config: {}", e)))
    }
}

/// Secrets read from the environment.
#[derive(Debug, Clone)]
pub struct Secrets {
    /// Process-wide token signing key. Required.
    pub token_secret: String,
    /// Assistant API key; the chat surface is disabled without it.
    pub gemini_api_key: Option<String>,
    /// Mail API key; the dispatcher sends unauthenticated without it.
    pub mail_api_key: Option<String>,
}

impl Secrets {
    /// Reads secrets from `NEUROSCAN_TOKEN_SECRET`, `GEMINI_API_KEY`, and
    /// `MAIL_API_KEY`.
    ///
    /// # Errors
    ///
    /// [`CoreError::Validation`] when the token secret is missing or
    /// empty; tokens cannot be signed without it.
    pub fn from_env() -> Result<Self> {
        let token_secret = std::env::var("NEUROSCAN_TOKEN_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CoreError::validation("NEUROSCAN_TOKEN_SECRET is not set"))?;

        Ok(Self {
            token_secret,
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty()),
            mail_api_key: std::env::var("MAIL_API_KEY").ok().filter(|s| !s.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_original_lifetimes() {
        let config = AppConfig::default();

        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert_eq!(config.otp.ttl_secs, 600);
        assert_eq!(config.chat.max_output_tokens, 500);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[otp]\nttl_secs = 120").unwrap();

        let config = AppConfig::load(file.path()).unwrap();

        assert_eq!(config.otp.ttl_secs, 120);
        assert_eq!(config.auth.token_ttl_secs, 3600);
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [").unwrap();

        let err = AppConfig::load(file.path()).unwrap_err();

        assert!(err.is_validation());
    }
}
