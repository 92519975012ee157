//! Orchestrator error taxonomy.
//!
//! Write-path errors are never downgraded to a default result; each variant
//! carries a stable machine-readable code for API callers alongside the
//! human-readable display.

use thiserror::Error;

use artchain_ledger::LedgerError;
use artchain_types::ContentId;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Ledger unreachable or answering garbage. Fatal for the request, not
    /// the process; the caller should retry later.
    #[error("ledger unavailable: {0}")]
    LedgerUnavailable(String),

    /// The ledger refused the transaction; reason is verbatim from the
    /// ledger. Not retried automatically.
    #[error("ledger rejected: {reason}")]
    LedgerRejected { reason: String },

    /// Duplicate vote from the same validator identity. Recoverable; other
    /// validators are unaffected and the record is unchanged.
    #[error("validator has already voted on this artwork")]
    AlreadyVoted,

    /// Broadcast but unconfirmed within the policy window.
    #[error("transaction {tx_hash} unconfirmed after {waited_secs}s")]
    ConfirmationTimeout { tx_hash: String, waited_secs: u64 },

    /// The ledger write succeeded but the cache upsert did not — the cache
    /// now lags the ledger and will not self-heal without a re-sync pass, so
    /// this is reported distinctly rather than swallowed as success.
    #[error("cache reconciliation failed for {content_id}: {source_msg}")]
    Reconciliation {
        content_id: ContentId,
        source_msg: String,
    },

    /// Rejected before any ledger interaction.
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl OrchestratorError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            OrchestratorError::LedgerUnavailable(_) => "LEDGER_UNAVAILABLE",
            OrchestratorError::LedgerRejected { .. } => "LEDGER_REJECTED",
            OrchestratorError::AlreadyVoted => "ALREADY_VOTED",
            OrchestratorError::ConfirmationTimeout { .. } => "CONFIRMATION_TIMEOUT",
            OrchestratorError::Reconciliation { .. } => "RECONCILIATION_FAILURE",
            OrchestratorError::MalformedInput(_) => "MALFORMED_INPUT",
        }
    }
}

impl From<LedgerError> for OrchestratorError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::Unavailable(msg) => OrchestratorError::LedgerUnavailable(msg),
            LedgerError::InvalidResponse(msg) => OrchestratorError::LedgerUnavailable(msg),
            LedgerError::Rejected { reason } => OrchestratorError::LedgerRejected { reason },
            LedgerError::AlreadyVoted => OrchestratorError::AlreadyVoted,
            LedgerError::ConfirmationTimeout {
                tx_hash,
                waited_secs,
            } => OrchestratorError::ConfirmationTimeout {
                tx_hash,
                waited_secs,
            },
            LedgerError::Unsupported(variant) => OrchestratorError::LedgerRejected {
                reason: format!("operation not supported by the {variant} contract"),
            },
        }
    }
}
