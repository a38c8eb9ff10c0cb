//! Request-level authentication guard.

use crate::auth::principal::Principal;
use crate::auth::token::TokenIssuer;
use crate::error::{CoreError, Result};
use std::sync::Arc;
use tracing::debug;

/// Header scheme prefix required on protected operations.
const BEARER_PREFIX: &str = "Bearer ";

/// Extracts and verifies the bearer token on protected operations.
///
/// This is the only consumer-facing entry point into
/// [`TokenIssuer::verify`]. Every failure - missing header, wrong scheme,
/// malformed token, bad signature, expiry - is reported as the same
/// [`CoreError::Unauthenticated`] so the response does not reveal which
/// check rejected the request.
///
/// The gate is a pure guard: it holds no state and mutates nothing.
pub struct AuthGate {
    issuer: Arc<TokenIssuer>,
}

impl AuthGate {
    pub fn new(issuer: Arc<TokenIssuer>) -> Self {
        Self { issuer }
    }

    /// Resolves the principal from an `Authorization` header value.
    ///
    /// # Arguments
    ///
    /// * `authorization` - The raw header value, if the request carried one
    ///
    /// # Errors
    ///
    /// [`CoreError::Unauthenticated`] for every rejection; the underlying
    /// cause is logged at debug level only.
    pub fn authorize(&self, authorization: Option<&str>) -> Result<Principal> {
        let header = authorization.ok_or(CoreError::Unauthenticated)?;
        let token = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or(CoreError::Unauthenticated)?;

        match self.issuer.verify(token.trim()) {
            Ok(principal) => Ok(principal),
            Err(cause) => {
                debug!(%cause, "rejected bearer token");
                Err(CoreError::Unauthenticated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::DEFAULT_TOKEN_TTL_SECS;
    use crate::clock::ManualClock;
    use chrono::Duration;

    fn gate_and_issuer() -> (AuthGate, Arc<TokenIssuer>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::start_now());
        let issuer = Arc::new(TokenIssuer::new(
            b"gate-test-key".to_vec(),
            Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
            clock.clone(),
        ));
        (AuthGate::new(issuer.clone()), issuer, clock)
    }

    #[test]
    fn test_authorize_injects_matching_principal() {
        let (gate, issuer, _clock) = gate_and_issuer();
        let principal = Principal::new("user-9", "carol");
        let token = issuer.issue(&principal).unwrap();

        let resolved = gate.authorize(Some(&format!("Bearer {}", token))).unwrap();

        assert_eq!(resolved, principal);
    }

    #[test]
    fn test_missing_header_is_unauthenticated() {
        let (gate, _issuer, _clock) = gate_and_issuer();

        let err = gate.authorize(None).unwrap_err();

        assert!(err.is_unauthenticated());
    }

    #[test]
    fn test_wrong_scheme_is_unauthenticated() {
        let (gate, issuer, _clock) = gate_and_issuer();
        let token = issuer.issue(&Principal::new("user-9", "carol")).unwrap();

        let err = gate.authorize(Some(&format!("Basic {}", token))).unwrap_err();

        assert!(err.is_unauthenticated());
    }

    #[test]
    fn test_garbage_token_is_generic_unauthorized() {
        let (gate, _issuer, _clock) = gate_and_issuer();

        let err = gate.authorize(Some("Bearer garbage")).unwrap_err();

        assert!(err.is_unauthenticated());
    }

    #[test]
    fn test_expired_token_collapses_to_unauthenticated() {
        let (gate, issuer, clock) = gate_and_issuer();
        let token = issuer.issue(&Principal::new("user-9", "carol")).unwrap();

        clock.advance(Duration::seconds(DEFAULT_TOKEN_TTL_SECS + 1));
        let err = gate.authorize(Some(&format!("Bearer {}", token))).unwrap_err();

        assert!(err.is_unauthenticated());
    }
}
