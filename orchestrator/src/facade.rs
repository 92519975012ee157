//! Compatibility facade — the single external API surface.
//!
//! One stable function set regardless of which contract variant the startup
//! probe selected: submit (bytes or content refs), vote, read, enumerate,
//! content refs, readiness, info. Callers never branch on variant; the
//! adapter behind the `Arc<dyn LedgerAdapter>` already did.
//!
//! Responses are assembled from the ledger's confirmed record, not from
//! client-supplied values, so a cache row can never drift ahead of the
//! ledger because of what a caller claimed.

use std::sync::Arc;

use artchain_crypto::{fingerprint_bytes, fingerprint_content_refs};
use artchain_ledger::{ArtworkSubmission, ContentRefs, LedgerAdapter};
use artchain_store::{ArtworkCacheStore, CacheRecord, SideChannel, DEFAULT_TITLE};
use artchain_types::{AccountAddress, ArtworkMetadata, ArtworkRecord, ContentId, ContractVariant};

use crate::consensus::ConsensusTracker;
use crate::reconcile::{ReconcileHints, Reconciler};
use crate::similarity::{ContentSource, SimilarityScore, SimilarityScorer};
use crate::OrchestratorError;

/// Author recorded when a vote deems the artwork non-original.
const UNKNOWN_AUTHOR: &str = "Unknown";

/// Result of a submit flow: submit + first vote + reconciliation.
#[derive(Clone, Debug)]
pub struct SubmissionOutcome {
    pub content_id: ContentId,
    pub record: CacheRecord,
    pub variant: ContractVariant,
    pub score: SimilarityScore,
}

/// An external validator's vote.
#[derive(Clone, Debug)]
pub struct VoteRequest {
    pub content_id: ContentId,
    pub is_original: bool,
    pub original_author: Option<String>,
    pub validator: AccountAddress,
}

#[derive(Clone, Debug)]
pub struct VoteOutcome {
    pub record: CacheRecord,
}

/// Contract info for the `/info` surface.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ContractInfo {
    pub address: AccountAddress,
    pub variant: &'static str,
    pub ready: bool,
    pub features: Vec<&'static str>,
}

pub struct ValidationFacade {
    ledger: Arc<dyn LedgerAdapter>,
    cache: Arc<dyn ArtworkCacheStore>,
    scorer: Arc<dyn SimilarityScorer>,
    reconciler: Reconciler,
    consensus: ConsensusTracker,
    /// The account this service submits and auto-votes from.
    identity: AccountAddress,
}

impl ValidationFacade {
    pub fn new(
        ledger: Arc<dyn LedgerAdapter>,
        cache: Arc<dyn ArtworkCacheStore>,
        scorer: Arc<dyn SimilarityScorer>,
        identity: AccountAddress,
    ) -> Self {
        let reconciler = Reconciler::new(Arc::clone(&ledger), Arc::clone(&cache));
        Self {
            ledger,
            cache,
            scorer,
            reconciler,
            consensus: ConsensusTracker::new(),
            identity,
        }
    }

    // ── Submit flows ────────────────────────────────────────────────────

    /// Raw-bytes submission: fingerprint the bytes, submit, cast the
    /// similarity-verdict vote, reconcile.
    pub async fn submit_artwork_bytes(
        &self,
        bytes: &[u8],
        artist: &str,
        title: &str,
    ) -> Result<SubmissionOutcome, OrchestratorError> {
        if bytes.is_empty() {
            return Err(OrchestratorError::MalformedInput(
                "artwork bytes are empty".into(),
            ));
        }
        if artist.trim().is_empty() {
            return Err(OrchestratorError::MalformedInput("artist is required".into()));
        }
        let title = if title.trim().is_empty() {
            DEFAULT_TITLE
        } else {
            title
        };

        let content_id = fingerprint_bytes(bytes);
        let submission = ArtworkSubmission {
            title: title.to_string(),
            ..ArtworkSubmission::default()
        };

        self.ledger.submit(&content_id, &submission).await?;
        self.consensus.mark_submitted(content_id);
        tracing::info!(content_id = %content_id, title, "artwork submitted to ledger");

        let score = self.scorer.score(ContentSource::Bytes(bytes)).await;
        let is_original = score.deems_original();
        let author = if is_original { artist } else { UNKNOWN_AUTHOR };

        let hints = ReconcileHints {
            title: Some(title.to_string()),
            artist: Some(artist.to_string()),
            original_author: Some(author.to_string()),
            fallback_is_original: is_original,
            side_channel: None,
        };
        let record = self
            .vote_and_reconcile(&content_id, is_original, author, &self.identity, &hints)
            .await?;

        Ok(SubmissionOutcome {
            content_id,
            record,
            variant: self.ledger.variant(),
            score,
        })
    }

    /// Content-addressed submission: fingerprint the primary ref plus
    /// immutable metadata, submit (full payload on Extended, fingerprint
    /// only on Legacy), cast the similarity-verdict vote, reconcile with the
    /// side-channel payload.
    pub async fn submit_artwork_refs(
        &self,
        image_uris: &[String],
        metadata_ref: &str,
        metadata: &ArtworkMetadata,
    ) -> Result<SubmissionOutcome, OrchestratorError> {
        if image_uris.is_empty() {
            return Err(OrchestratorError::MalformedInput(
                "missing required fields: imageUris and metadata".into(),
            ));
        }
        let title = if metadata.name.trim().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            metadata.name.clone()
        };

        let content_id = fingerprint_content_refs(image_uris, &title, &self.identity)
            .map_err(|e| OrchestratorError::MalformedInput(e.to_string()))?;

        let submission = ArtworkSubmission {
            content_refs: image_uris.to_vec(),
            metadata_ref: metadata_ref.to_string(),
            title: title.clone(),
            description: metadata.description.clone(),
            medium: metadata.medium.clone(),
            additional_info: metadata.additional_info.clone(),
        };

        self.ledger.submit(&content_id, &submission).await?;
        self.consensus.mark_submitted(content_id);
        tracing::info!(
            content_id = %content_id,
            title = %title,
            refs = image_uris.len(),
            variant = self.ledger.variant().as_str(),
            "content-addressed artwork submitted to ledger"
        );

        let score = self.scorer.score(ContentSource::Ref(&image_uris[0])).await;
        let is_original = score.deems_original();
        let artist = non_blank(&metadata.artist);
        let author = if is_original {
            artist.clone().unwrap_or_else(|| UNKNOWN_AUTHOR.into())
        } else {
            UNKNOWN_AUTHOR.into()
        };

        let hints = ReconcileHints {
            title: Some(title),
            artist,
            original_author: Some(author.clone()),
            fallback_is_original: is_original,
            side_channel: Some(SideChannel {
                image_uris: image_uris.to_vec(),
                metadata_uri: non_blank(metadata_ref),
                description: non_blank(&metadata.description),
                medium: non_blank(&metadata.medium),
                year: metadata.year.clone(),
                dimensions: metadata.dimensions.clone(),
                additional_info: non_blank(&metadata.additional_info),
            }),
        };
        let record = self
            .vote_and_reconcile(&content_id, is_original, &author, &self.identity, &hints)
            .await?;

        Ok(SubmissionOutcome {
            content_id,
            record,
            variant: self.ledger.variant(),
            score,
        })
    }

    // ── Voting ──────────────────────────────────────────────────────────

    /// Record an external validator's vote, then reconcile from the
    /// post-confirmation ledger read.
    pub async fn vote(&self, request: VoteRequest) -> Result<VoteOutcome, OrchestratorError> {
        let author = request
            .original_author
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
            .to_string();

        let hints = ReconcileHints {
            original_author: Some(author.clone()),
            fallback_is_original: request.is_original,
            ..ReconcileHints::default()
        };
        let record = self
            .vote_and_reconcile(
                &request.content_id,
                request.is_original,
                &author,
                &request.validator,
                &hints,
            )
            .await?;

        Ok(VoteOutcome { record })
    }

    /// Shared vote tail: ledger vote (both duplicate-detection paths armed
    /// inside the adapter), tally bookkeeping, reconciliation from a fresh
    /// read, finalization check.
    ///
    /// The count in the returned record comes from the re-read, never from a
    /// locally incremented counter — a concurrent vote for the same id may
    /// have landed between our write and the read.
    async fn vote_and_reconcile(
        &self,
        content_id: &ContentId,
        is_original: bool,
        author: &str,
        validator: &AccountAddress,
        hints: &ReconcileHints,
    ) -> Result<CacheRecord, OrchestratorError> {
        self.ledger
            .vote(content_id, is_original, author, validator)
            .await?;
        self.consensus.record_vote(*content_id, is_original);

        let record = self.reconciler.reconcile(*content_id, hints).await?;
        if record.validated {
            self.consensus.finalize(*content_id, record.is_original);
        }
        Ok(record)
    }

    // ── Reads ───────────────────────────────────────────────────────────

    /// Confirmed ledger record for one artwork.
    pub async fn get_details(
        &self,
        content_id: &ContentId,
    ) -> Result<Option<ArtworkRecord>, OrchestratorError> {
        Ok(self.ledger.read(content_id).await?)
    }

    /// Every artwork on the ledger, in submission order. Individual record
    /// reads may degrade (logged and skipped); enumeration errors propagate.
    pub async fn get_all_ledger(&self) -> Result<Vec<ArtworkRecord>, OrchestratorError> {
        let ids = self.ledger.list().await?;
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            match self.ledger.read(&id).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {
                    tracing::warn!(content_id = %id, "enumerated id has no record, skipping");
                }
                Err(e) => {
                    tracing::warn!(content_id = %id, error = %e, "record read failed, skipping");
                }
            }
        }
        Ok(records)
    }

    /// Cached rows, newest first. Degrades to empty on a cache read failure
    /// — reads are idempotent and safe for the caller to retry.
    pub fn get_all_cached(&self) -> Vec<CacheRecord> {
        match self.cache.list_newest_first() {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "cache listing failed, returning empty result");
                Vec::new()
            }
        }
    }

    /// Content-addressed references for one artwork (empty on Legacy).
    pub async fn get_content_refs(
        &self,
        content_id: &ContentId,
    ) -> Result<ContentRefs, OrchestratorError> {
        Ok(self.ledger.content_refs(content_id).await?)
    }

    /// Rebuild the cache from the ledger: one reconciliation per enumerated
    /// id. This is the explicit re-sync pass that heals cache/ledger
    /// divergence left behind by a reported reconciliation failure. Returns
    /// the number of rows reconciled.
    pub async fn resync(&self) -> Result<u64, OrchestratorError> {
        let ids = self.ledger.list().await?;
        let hints = ReconcileHints::default();
        let mut synced = 0u64;
        for id in ids {
            self.reconciler.reconcile(id, &hints).await?;
            synced += 1;
        }
        tracing::info!(synced, "cache re-synced from ledger");
        Ok(synced)
    }

    // ── Status ──────────────────────────────────────────────────────────

    /// Whether the Extended contract was selected at startup. Side-effect
    /// free; reflects the cached selection, not a fresh probe.
    pub fn is_ready(&self) -> bool {
        self.ledger.variant() == ContractVariant::Extended
    }

    pub fn info(&self) -> ContractInfo {
        let variant = self.ledger.variant();
        ContractInfo {
            address: self.ledger.contract_address().clone(),
            variant: variant.as_str(),
            ready: self.is_ready(),
            features: match variant {
                ContractVariant::Extended => vec![
                    "content-addressed storage",
                    "legacy compatibility",
                    "enhanced metadata",
                ],
                ContractVariant::Legacy => vec!["fixed schema"],
            },
        }
    }

    /// Similarity capability passthrough for the scoring endpoint.
    pub async fn score(&self, source: ContentSource<'_>) -> SimilarityScore {
        self.scorer.score(source).await
    }

    // ── Compatibility aliases ───────────────────────────────────────────
    //
    // Older callers used the IPFS-suffixed names. Aliases resolve to the
    // same implementation; there is no behavioral divergence to maintain.

    /// Alias for [`ValidationFacade::submit_artwork_refs`].
    pub async fn submit_artwork_ipfs(
        &self,
        image_uris: &[String],
        metadata_ref: &str,
        metadata: &ArtworkMetadata,
    ) -> Result<SubmissionOutcome, OrchestratorError> {
        self.submit_artwork_refs(image_uris, metadata_ref, metadata).await
    }

    /// Alias for [`ValidationFacade::vote`].
    pub async fn validate_artwork(
        &self,
        request: VoteRequest,
    ) -> Result<VoteOutcome, OrchestratorError> {
        self.vote(request).await
    }

    /// Alias for [`ValidationFacade::get_details`].
    pub async fn get_artwork_details(
        &self,
        content_id: &ContentId,
    ) -> Result<Option<ArtworkRecord>, OrchestratorError> {
        self.get_details(content_id).await
    }

    /// Alias for [`ValidationFacade::get_all_ledger`].
    pub async fn get_all_artworks(&self) -> Result<Vec<ArtworkRecord>, OrchestratorError> {
        self.get_all_ledger().await
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
