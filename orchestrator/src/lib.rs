//! Validation orchestration for the ArtChain backend.
//!
//! Sits between the HTTP surface, the ledger adapter, and the cache:
//! fingerprints submissions, drives them onto the ledger, records validator
//! votes to the consensus threshold, and mirrors confirmed state into the
//! cache. The [`ValidationFacade`] is the single external API; callers never
//! see which contract variant answers.

pub mod consensus;
pub mod error;
pub mod facade;
pub mod reconcile;
pub mod similarity;
pub mod tally;

pub use consensus::{ConsensusTracker, SubmissionPhase};
pub use error::OrchestratorError;
pub use facade::{ContractInfo, SubmissionOutcome, ValidationFacade, VoteOutcome, VoteRequest};
pub use reconcile::{ReconcileHints, Reconciler};
pub use similarity::{ContentSource, SimilarityScore, SimilarityScorer, StubScorer};
pub use tally::VoteTally;
