//! Timestamp type used throughout the ledger.
//!
//! Timestamps are Unix epoch seconds (UTC). The ledger never reads the
//! clock itself — time is an input to every operation, so tests and
//! deployments control it explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_secs();
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed from this timestamp up to `now`.
    ///
    /// Returns `None` when `now` precedes `self` — a decreasing clock.
    /// Callers treat that as a fatal precondition violation, never as a
    /// negative duration.
    pub fn checked_elapsed_since(&self, now: Timestamp) -> Option<u64> {
        now.0.checked_sub(self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
