//! One-time password registry.

use super::model::OtpRecord;
use super::repository::OtpRepository;
use crate::clock::Clock;
use crate::error::{CoreError, Result};
use chrono::Duration;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tokio::sync::Mutex;
use tracing::debug;

/// Default code lifetime: ten minutes.
pub const DEFAULT_OTP_TTL_SECS: i64 = 600;

/// Generates, stores, and single-use-validates numeric one-time codes.
///
/// Operations for the same recipient key are serialized through a per-key
/// lock table, so a verify never observes a half-written record and a
/// verify-then-delete cannot race a concurrent superseding issue. Distinct
/// keys proceed fully in parallel.
///
/// There is no attempt throttling: a mismatched code leaves the record in
/// place, and retries are limited only by the TTL window. Known hardening
/// gap, documented in DESIGN.md.
pub struct OtpRegistry {
    repository: Arc<dyn OtpRepository>,
    /// Per-recipient-key guards; entries are created on first use and
    /// evicted once the last holder releases them.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl OtpRegistry {
    /// Creates a registry over a storage backend.
    ///
    /// # Arguments
    ///
    /// * `repository` - The keyed store holding live records
    /// * `ttl` - Lifetime of an issued code
    /// * `clock` - Time source for expiry checks
    pub fn new(repository: Arc<dyn OtpRepository>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            locks: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Issues a fresh code for a recipient, superseding any live record.
    ///
    /// The code is uniformly random over `000000`..=`999999` with leading
    /// zeros preserved. Delivery is the caller's concern: a failed mail
    /// dispatch must not revoke the record that was just written.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage backend fails.
    pub async fn issue(&self, recipient_key: &str) -> Result<String> {
        let guard = self.key_lock(recipient_key).await;
        let held = guard.lock().await;
        let outcome = self.issue_locked(recipient_key).await;
        drop(held);
        self.evict_key_lock(recipient_key, &guard).await;
        outcome
    }

    async fn issue_locked(&self, recipient_key: &str) -> Result<String> {
        let code = generate_code();
        let record = OtpRecord {
            recipient_key: recipient_key.to_string(),
            code: code.clone(),
            expires_at: self.clock.now() + self.ttl,
        };
        self.repository.put(record).await?;
        debug!(recipient = recipient_key, "issued one-time code");

        Ok(code)
    }

    /// Validates a submitted code and consumes the record on success.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] - no live record for this key
    /// - [`CoreError::Expired`] - the record's TTL has passed; the record
    ///   is deleted as part of this check, so an expired code can never be
    ///   accepted on a later call either
    /// - [`CoreError::Mismatch`] - wrong code; the record is retained so
    ///   the recipient may retry within the TTL window
    pub async fn verify(&self, recipient_key: &str, submitted: &str) -> Result<()> {
        let guard = self.key_lock(recipient_key).await;
        let held = guard.lock().await;
        let outcome = self.verify_locked(recipient_key, submitted).await;
        drop(held);
        self.evict_key_lock(recipient_key, &guard).await;
        outcome
    }

    async fn verify_locked(&self, recipient_key: &str, submitted: &str) -> Result<()> {
        let record = self
            .repository
            .find(recipient_key)
            .await?
            .ok_or_else(|| CoreError::not_found("otp", recipient_key))?;

        if self.clock.now() > record.expires_at {
            self.repository.remove(recipient_key).await?;
            debug!(recipient = recipient_key, "discarded expired one-time code");
            return Err(CoreError::expired("one-time code has expired"));
        }

        if !bool::from(record.code.as_bytes().ct_eq(submitted.as_bytes())) {
            return Err(CoreError::mismatch("one-time code does not match"));
        }

        self.repository.remove(recipient_key).await?;
        debug!(recipient = recipient_key, "one-time code verified and consumed");
        Ok(())
    }

    async fn key_lock(&self, recipient_key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(recipient_key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drops a recipient's lock entry once the caller is its last holder.
    ///
    /// Verify accepts arbitrary recipient keys, so the table must not keep
    /// an entry per key ever seen. Two strong references mean the table's
    /// own clone plus the caller's; anything more is a queued waiter, and
    /// the entry stays until that waiter releases it in turn.
    async fn evict_key_lock(&self, recipient_key: &str, guard: &Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        if Arc::strong_count(guard) == 2 {
            locks.remove(recipient_key);
        }
    }
}

fn generate_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}
