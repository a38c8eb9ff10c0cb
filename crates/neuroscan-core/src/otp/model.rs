//! One-time password record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A live one-time code for a single recipient.
///
/// At most one record exists per recipient key at any instant; issuing a
/// new code for the same key replaces the prior record (last-write-wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Recipient identity, e.g. an email address
    pub recipient_key: String,
    /// 6-digit numeric code; leading zeros preserved
    pub code: String,
    /// Instant after which the code is no longer valid
    pub expires_at: DateTime<Utc>,
}
