//! OTP repository trait.
//!
//! Defines the interface for one-time code storage.

use super::model::OtpRecord;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract keyed store for one-time code records.
///
/// This trait decouples [`OtpRegistry`](super::OtpRegistry) from the
/// storage mechanism so a bounded, evicting, or externally-backed
/// implementation can be substituted without touching call sites.
///
/// # Implementation Notes
///
/// Implementations only need atomicity per call; the registry serializes
/// multi-step operations for the same recipient key with its own per-key
/// locks.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Finds the live record for a recipient key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))`: a record exists (possibly past its TTL)
    /// - `Ok(None)`: no record for this key
    /// - `Err(_)`: storage failure
    async fn find(&self, recipient_key: &str) -> Result<Option<OtpRecord>>;

    /// Stores a record, replacing any existing record for the same key.
    async fn put(&self, record: OtpRecord) -> Result<()>;

    /// Removes the record for a recipient key, if present.
    async fn remove(&self, recipient_key: &str) -> Result<()>;

    /// Returns the number of stored records.
    async fn count(&self) -> Result<usize>;
}
