//! Signed, time-bounded bearer tokens.
//!
//! Tokens are self-contained: a base64url-encoded claims document plus an
//! HMAC-SHA256 signature over those exact bytes, joined by a dot. There is
//! no server-side revocation list; a token stays valid for its whole TTL
//! even if the account's password changes afterwards. That tradeoff is
//! deliberate and documented in DESIGN.md.

use crate::auth::principal::Principal;
use crate::clock::Clock;
use crate::error::{CoreError, Result};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Default token lifetime: one hour.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Why a token failed verification.
///
/// These variants exist for logging and tests only. Callers facing a
/// client must collapse all of them into a single generic outcome; the
/// [`AuthGate`](crate::auth::AuthGate) does exactly that.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token could not be parsed into payload and signature parts.
    #[error("token is malformed")]
    Malformed,
    /// The signature does not match the payload.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// The token's expiry instant has passed.
    #[error("token has expired")]
    Expired,
}

/// Claims carried inside a bearer token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    principal: Principal,
    /// Issue instant (unix seconds)
    iat: i64,
    /// Expiry instant (unix seconds)
    exp: i64,
}

/// Creates and verifies signed bearer tokens carrying a [`Principal`].
///
/// Stateless: issuing has no side effects beyond computation, and
/// verification consults only the token itself plus the clock.
pub struct TokenIssuer {
    key: Vec<u8>,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Creates an issuer with a process-wide secret key.
    ///
    /// # Arguments
    ///
    /// * `secret` - The signing key bytes; every issuer sharing this key
    ///   accepts each other's tokens
    /// * `default_ttl` - Lifetime used by [`TokenIssuer::issue`]
    /// * `clock` - Time source for issue and expiry instants
    pub fn new(secret: impl Into<Vec<u8>>, default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            key: secret.into(),
            default_ttl,
            clock,
        }
    }

    /// Issues a token with the default TTL.
    pub fn issue(&self, principal: &Principal) -> Result<String> {
        self.issue_with_ttl(principal, self.default_ttl)
    }

    /// Issues a token that expires `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns an error only if the claims cannot be serialized or the
    /// signing key is unusable; both are internal faults.
    pub fn issue_with_ttl(&self, principal: &Principal, ttl: Duration) -> Result<String> {
        let now = self.clock.now();
        let claims = Claims {
            principal: principal.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        let payload = serde_json::to_vec(&claims)?;
        let signature = self.sign(&payload)?;

        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(&signature)
        ))
    }

    /// Verifies a token string and returns the principal it carries.
    ///
    /// The signature is recomputed over the received payload bytes and
    /// compared in constant time before the expiry check runs, so a
    /// tampered token never reaches the claims parser's error paths.
    ///
    /// # Errors
    ///
    /// - [`TokenError::Malformed`] - cannot be split or base64-decoded,
    ///   or the payload is not a valid claims document
    /// - [`TokenError::InvalidSignature`] - signature mismatch
    /// - [`TokenError::Expired`] - `exp` has passed
    pub fn verify(&self, token: &str) -> std::result::Result<Principal, TokenError> {
        let (payload_b64, signature_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::Malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;

        let expected = self
            .sign(&payload)
            .map_err(|_| TokenError::InvalidSignature)?;
        if !bool::from(expected.as_slice().ct_eq(signature.as_slice())) {
            return Err(TokenError::InvalidSignature);
        }

        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;
        if claims.exp <= self.clock.now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims.principal)
    }

    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|_| CoreError::internal("signing key is unusable"))?;
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}
