//! Per-outcome vote tally.
//!
//! The deployed contracts take the originality flag from the first accepted
//! vote and only count after that. A sound consensus rule tallies each
//! outcome and finalizes on the majority once the threshold is reached; this
//! tally implements that rule so the orchestrator can detect when the
//! ledger's first-vote-wins value disagrees with the actual majority.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    original: u32,
    not_original: u32,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, is_original: bool) {
        if is_original {
            self.original += 1;
        } else {
            self.not_original += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.original + self.not_original
    }

    /// Majority outcome; `None` on a tie or an empty tally.
    pub fn majority(&self) -> Option<bool> {
        match self.original.cmp(&self.not_original) {
            std::cmp::Ordering::Greater => Some(true),
            std::cmp::Ordering::Less => Some(false),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Whether enough votes are in to finalize.
    pub fn at_threshold(&self, required: u32) -> bool {
        self.total() >= required
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tally_has_no_majority() {
        assert_eq!(VoteTally::new().majority(), None);
    }

    #[test]
    fn majority_tracks_the_larger_side() {
        let mut tally = VoteTally::new();
        tally.record(true);
        assert_eq!(tally.majority(), Some(true));
        tally.record(false);
        assert_eq!(tally.majority(), None);
        tally.record(false);
        assert_eq!(tally.majority(), Some(false));
    }

    #[test]
    fn threshold_counts_both_outcomes() {
        let mut tally = VoteTally::new();
        tally.record(true);
        tally.record(false);
        assert!(tally.at_threshold(2));
        assert!(!tally.at_threshold(3));
    }
}
