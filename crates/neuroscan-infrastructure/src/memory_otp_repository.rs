//! In-memory OTP repository.

use async_trait::async_trait;
use neuroscan_core::Result;
use neuroscan_core::otp::{OtpRecord, OtpRepository};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Keeps one-time code records in a process-local map.
///
/// Suitable for single-process deployments; records do not survive a
/// restart, which is acceptable for credentials with a ten-minute TTL.
/// The map is unbounded - eviction beyond the registry's lazy
/// expired-record deletion is a concern for an external backend.
#[derive(Default)]
pub struct MemoryOtpRepository {
    records: RwLock<HashMap<String, OtpRecord>>,
}

impl MemoryOtpRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OtpRepository for MemoryOtpRepository {
    async fn find(&self, recipient_key: &str) -> Result<Option<OtpRecord>> {
        let records = self.records.read().await;
        Ok(records.get(recipient_key).cloned())
    }

    async fn put(&self, record: OtpRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.recipient_key.clone(), record);
        Ok(())
    }

    async fn remove(&self, recipient_key: &str) -> Result<()> {
        let mut records = self.records.write().await;
        records.remove(recipient_key);
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let records = self.records.read().await;
        Ok(records.len())
    }
}
