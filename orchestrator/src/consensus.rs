//! Per-artwork consensus state tracking.
//!
//! State machine per content id: `Unsubmitted → Submitted → (Voting)* →
//! Finalized`. Unsubmitted ids are simply absent. The ledger's transaction
//! ordering serializes concurrent votes for the same id; this tracker is
//! bookkeeping on top of ledger reads, never a substitute for them — counts
//! and flags are re-read from the ledger after every confirmed write.

use std::collections::HashMap;
use std::sync::Mutex;

use artchain_types::ContentId;

use crate::tally::VoteTally;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionPhase {
    Submitted,
    Voting,
    Finalized,
}

#[derive(Clone, Debug)]
struct ConsensusState {
    phase: SubmissionPhase,
    tally: VoteTally,
}

#[derive(Default)]
pub struct ConsensusTracker {
    states: Mutex<HashMap<ContentId, ConsensusState>>,
}

impl ConsensusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a confirmed ledger submission.
    pub fn mark_submitted(&self, content_id: ContentId) {
        let mut states = self.states.lock().expect("consensus tracker poisoned");
        states.entry(content_id).or_insert(ConsensusState {
            phase: SubmissionPhase::Submitted,
            tally: VoteTally::new(),
        });
    }

    /// Record an accepted vote. Votes can arrive for ids submitted by an
    /// earlier process lifetime, so an absent entry is created on the fly.
    pub fn record_vote(&self, content_id: ContentId, is_original: bool) {
        let mut states = self.states.lock().expect("consensus tracker poisoned");
        let state = states.entry(content_id).or_insert(ConsensusState {
            phase: SubmissionPhase::Submitted,
            tally: VoteTally::new(),
        });
        state.tally.record(is_original);
        if state.phase == SubmissionPhase::Submitted {
            state.phase = SubmissionPhase::Voting;
        }
    }

    /// Mark an id finalized with the ledger's authoritative originality flag.
    ///
    /// Returns the local majority for callers that want it. When the majority
    /// of votes seen by this process disagrees with the ledger's
    /// first-vote-wins value, that divergence is logged — the ledger stays
    /// authoritative for stored state.
    pub fn finalize(&self, content_id: ContentId, ledger_is_original: bool) -> Option<bool> {
        let mut states = self.states.lock().expect("consensus tracker poisoned");
        let state = states.entry(content_id).or_insert(ConsensusState {
            phase: SubmissionPhase::Voting,
            tally: VoteTally::new(),
        });
        state.phase = SubmissionPhase::Finalized;

        let majority = state.tally.majority();
        if let Some(majority_value) = majority {
            if majority_value != ledger_is_original {
                tracing::warn!(
                    content_id = %content_id,
                    ledger_is_original,
                    majority_is_original = majority_value,
                    votes = state.tally.total(),
                    "ledger originality flag disagrees with vote majority"
                );
            }
        }
        majority
    }

    pub fn phase(&self, content_id: &ContentId) -> Option<SubmissionPhase> {
        let states = self.states.lock().expect("consensus tracker poisoned");
        states.get(content_id).map(|s| s.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> ContentId {
        ContentId::new([byte; 32])
    }

    #[test]
    fn unsubmitted_ids_have_no_phase() {
        let tracker = ConsensusTracker::new();
        assert_eq!(tracker.phase(&id(1)), None);
    }

    #[test]
    fn submission_then_votes_walk_the_phases() {
        let tracker = ConsensusTracker::new();
        tracker.mark_submitted(id(1));
        assert_eq!(tracker.phase(&id(1)), Some(SubmissionPhase::Submitted));

        tracker.record_vote(id(1), true);
        assert_eq!(tracker.phase(&id(1)), Some(SubmissionPhase::Voting));

        tracker.finalize(id(1), true);
        assert_eq!(tracker.phase(&id(1)), Some(SubmissionPhase::Finalized));
    }

    #[test]
    fn vote_for_unknown_id_starts_tracking() {
        let tracker = ConsensusTracker::new();
        tracker.record_vote(id(2), false);
        assert_eq!(tracker.phase(&id(2)), Some(SubmissionPhase::Voting));
    }

    #[test]
    fn finalize_reports_local_majority() {
        let tracker = ConsensusTracker::new();
        tracker.record_vote(id(3), false);
        tracker.record_vote(id(3), false);
        assert_eq!(tracker.finalize(id(3), true), Some(false));
    }
}
