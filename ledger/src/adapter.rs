//! The polymorphic ledger adapter trait.
//!
//! Business logic never branches on contract variant; it holds an
//! `Arc<dyn LedgerAdapter>` selected once at startup by the readiness probe
//! and calls the same method set regardless of which contract answers.

use async_trait::async_trait;

use artchain_types::{AccountAddress, ArtworkRecord, ContentId, ContractVariant};

use crate::LedgerError;

/// Everything a submission carries. Legacy contracts consume only the
/// fingerprint; Extended contracts also record the content-addressed payload.
#[derive(Clone, Debug, Default)]
pub struct ArtworkSubmission {
    pub content_refs: Vec<String>,
    pub metadata_ref: String,
    pub title: String,
    pub description: String,
    pub medium: String,
    pub additional_info: String,
}

/// Content-addressed data attached to a ledger record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentRefs {
    pub image_uris: Vec<String>,
    pub metadata_uri: String,
}

/// Capability set shared by both contract variants.
///
/// Every write method waits for transaction finality (per the client's
/// confirmation policy) before returning — a broadcast-but-unconfirmed
/// transaction is never reported as committed.
#[async_trait]
pub trait LedgerAdapter: Send + Sync {
    /// Which contract variant this adapter drives.
    fn variant(&self) -> ContractVariant;

    /// The contract's ledger address.
    fn contract_address(&self) -> &AccountAddress;

    /// Submit an artwork fingerprint (and, on Extended, its content-addressed
    /// payload). Fails with `Rejected` when the fingerprint already exists.
    async fn submit(
        &self,
        content_id: &ContentId,
        submission: &ArtworkSubmission,
    ) -> Result<(), LedgerError>;

    /// Cast an originality vote. Duplicate votes fail with `AlreadyVoted`,
    /// detected by the pre-flight `has_voted` read or by the ledger's own
    /// rejection — whichever fires first.
    async fn vote(
        &self,
        content_id: &ContentId,
        is_original: bool,
        claimed_author: &str,
        validator: &AccountAddress,
    ) -> Result<(), LedgerError>;

    /// Read the confirmed record; `None` when the fingerprint is unknown.
    async fn read(&self, content_id: &ContentId) -> Result<Option<ArtworkRecord>, LedgerError>;

    /// Enumerate all fingerprints in ledger submission order (stable,
    /// replayable).
    async fn list(&self) -> Result<Vec<ContentId>, LedgerError>;

    /// Whether `validator` has already voted on `content_id`.
    async fn has_voted(
        &self,
        content_id: &ContentId,
        validator: &AccountAddress,
    ) -> Result<bool, LedgerError>;

    /// Whether the record carries content-addressed data. Always false on
    /// Legacy.
    async fn has_content_refs(&self, content_id: &ContentId) -> Result<bool, LedgerError>;

    /// The record's content-addressed references. Empty on Legacy.
    async fn content_refs(&self, content_id: &ContentId) -> Result<ContentRefs, LedgerError>;
}
