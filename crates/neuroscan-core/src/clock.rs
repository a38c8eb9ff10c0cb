//! Time source abstraction.
//!
//! All expiry comparisons in the credential subsystem go through the
//! [`Clock`] trait so TTL behavior can be exercised in tests without
//! sleeping.

use chrono::{DateTime, Duration, Utc};
use std::sync::RwLock;

/// A source of the current time.
///
/// Production code uses [`SystemClock`]; tests substitute [`ManualClock`]
/// to advance time deterministically.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Intended for tests that need to cross TTL boundaries (e.g. "wait 11
/// simulated minutes") without real waiting.
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    /// Creates a clock frozen at the current wall-clock time.
    pub fn start_now() -> Self {
        Self::new(Utc::now())
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.write().expect("clock lock poisoned");
        *now += delta;
    }

    /// Sets the clock to an absolute time.
    pub fn set(&self, instant: DateTime<Utc>) {
        let mut now = self.now.write().expect("clock lock poisoned");
        *now = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().expect("clock lock poisoned")
    }
}
