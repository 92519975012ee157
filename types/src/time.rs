//! Timestamp type shared between ledger records and cache rows.
//!
//! Timestamps are Unix epoch seconds (UTC). Ledger timestamps come from block
//! headers; cache timestamps from the local clock.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
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

    /// Seconds elapsed from this timestamp to `now` (zero if in the future).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_saturates() {
        let later = Timestamp::new(100);
        let earlier = Timestamp::new(40);
        assert_eq!(earlier.elapsed_since(later), 60);
        assert_eq!(later.elapsed_since(earlier), 0);
    }

    #[test]
    fn now_is_after_epoch() {
        assert!(Timestamp::now() > Timestamp::EPOCH);
    }
}
