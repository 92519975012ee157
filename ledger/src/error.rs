use thiserror::Error;

/// The ledger's rejection message for a duplicate vote. The contract reverts
/// with exactly this reason; matching it is one of the two duplicate-vote
/// detection paths (the other is the `art_hasVoted` pre-flight read).
pub const ALREADY_VOTED_REASON: &str = "Already voted";

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Ledger node unreachable or not responding. Retryable by the caller.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// The ledger refused the transaction. Carries the ledger-provided
    /// reason verbatim. Not retried automatically.
    #[error("ledger rejected transaction: {reason}")]
    Rejected { reason: String },

    /// The validator has already voted on this artwork. Recoverable,
    /// per-caller; the record state is unchanged.
    #[error("validator has already voted on this artwork")]
    AlreadyVoted,

    /// The transaction was broadcast but did not reach the configured
    /// confirmation depth in time. MUST NOT be treated as committed.
    #[error("transaction {tx_hash} unconfirmed after {waited_secs}s")]
    ConfirmationTimeout { tx_hash: String, waited_secs: u64 },

    /// The node answered with something the wire types cannot make sense of.
    #[error("invalid ledger response: {0}")]
    InvalidResponse(String),

    /// The requested operation does not exist on this contract variant.
    #[error("operation not supported by the {0} contract")]
    Unsupported(&'static str),
}

impl LedgerError {
    /// Classify a rejection reason, folding the duplicate-vote revert into
    /// its structured variant.
    pub fn from_rejection(reason: String) -> Self {
        if reason.contains(ALREADY_VOTED_REASON) {
            LedgerError::AlreadyVoted
        } else {
            LedgerError::Rejected { reason }
        }
    }
}
