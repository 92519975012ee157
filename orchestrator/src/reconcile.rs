//! Reconciliation layer — mirrors ledger-confirmed state into the cache.
//!
//! Owns every cache write in the system. Called after each successful
//! submit/vote; also safe to call at any time for an explicit re-sync.

use std::sync::Arc;

use artchain_ledger::LedgerAdapter;
use artchain_store::{ArtworkCacheStore, ArtworkUpsert, CacheRecord, SideChannel};
use artchain_types::{u256_to_u32, ArtworkRecord, ContentId, Timestamp};

use crate::OrchestratorError;

/// Seed values when the post-submit ledger read is unavailable at creation
/// time: the orchestrator's own vote has been cast, and contracts are
/// deployed with a two-validator threshold. Explicit policy, not zero-fill.
pub const FALLBACK_CONSENSUS_COUNT: u32 = 1;
pub const FALLBACK_REQUIRED_VALIDATORS: u32 = 2;

/// Presentation fields the caller learned outside the ledger. `None` means
/// "preserve whatever the cache already holds".
#[derive(Clone, Debug, Default)]
pub struct ReconcileHints {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub original_author: Option<String>,
    /// Originality to seed a creation-time fallback row with (the local
    /// similarity verdict); ignored whenever the ledger read succeeds.
    pub fallback_is_original: bool,
    pub side_channel: Option<SideChannel>,
}

pub struct Reconciler {
    ledger: Arc<dyn LedgerAdapter>,
    cache: Arc<dyn ArtworkCacheStore>,
}

impl Reconciler {
    pub fn new(ledger: Arc<dyn LedgerAdapter>, cache: Arc<dyn ArtworkCacheStore>) -> Self {
        Self { ledger, cache }
    }

    /// Upsert the cache row for `content_id` from a fresh ledger read.
    ///
    /// Idempotent: unchanged ledger state yields a byte-identical row. The
    /// ledger read may degrade (logged) because the row can still be seeded
    /// from fallback policy; the cache write may not — a failed upsert after
    /// a confirmed ledger write is cache/ledger divergence and surfaces as
    /// `RECONCILIATION_FAILURE`.
    pub async fn reconcile(
        &self,
        content_id: ContentId,
        hints: &ReconcileHints,
    ) -> Result<CacheRecord, OrchestratorError> {
        let ledger_record = match self.ledger.read(&content_id).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    content_id = %content_id,
                    error = %e,
                    "ledger read failed during reconciliation, seeding from fallback policy"
                );
                None
            }
        };

        let upsert = build_upsert(content_id, ledger_record, hints, Timestamp::now())?;

        self.cache
            .upsert(&upsert)
            .map_err(|e| OrchestratorError::Reconciliation {
                content_id,
                source_msg: e.to_string(),
            })
    }
}

/// Compute the upsert for a reconciliation pass. Ledger-confirmed fields win
/// over cached values; hint fields win over ledger presentation fields (they
/// are fresher caller input); absent fields preserve the cached row.
fn build_upsert(
    content_id: ContentId,
    ledger_record: Option<ArtworkRecord>,
    hints: &ReconcileHints,
    now: Timestamp,
) -> Result<ArtworkUpsert, OrchestratorError> {
    let narrow = |value, what: &str| {
        u256_to_u32(value).map_err(|e| OrchestratorError::Reconciliation {
            content_id,
            source_msg: format!("{what}: {e}"),
        })
    };

    match ledger_record {
        Some(record) => {
            let consensus_count = narrow(record.consensus_count, "consensus count")?;
            let required_validators = narrow(record.required_validators, "required validators")?;

            let side_channel = hints.side_channel.clone().or_else(|| {
                record.has_content_refs().then(|| SideChannel {
                    image_uris: record.content_refs.clone(),
                    metadata_uri: non_empty(&record.metadata_ref),
                    description: non_empty(&record.description),
                    medium: non_empty(&record.medium),
                    year: None,
                    dimensions: None,
                    additional_info: non_empty(&record.additional_info),
                })
            });

            Ok(ArtworkUpsert {
                content_id,
                title: hints.title.clone().or_else(|| non_empty(&record.title)),
                artist: hints.artist.clone(),
                original_author: non_empty(&record.original_author)
                    .or_else(|| hints.original_author.clone()),
                is_original: record.is_original,
                validated: record.validated,
                consensus_count,
                required_validators,
                side_channel,
                now,
            })
        }
        None => Ok(ArtworkUpsert {
            content_id,
            title: hints.title.clone(),
            artist: hints.artist.clone(),
            original_author: hints.original_author.clone(),
            is_original: hints.fallback_is_original,
            // The invariant `validated ⇒ consensus_count ≥ required_validators`
            // holds for the fallback row too.
            validated: FALLBACK_CONSENSUS_COUNT >= FALLBACK_REQUIRED_VALIDATORS,
            consensus_count: FALLBACK_CONSENSUS_COUNT,
            required_validators: FALLBACK_REQUIRED_VALIDATORS,
            side_channel: hints.side_channel.clone(),
            now,
        }),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artchain_types::{AccountAddress, U256};

    fn ledger_record(consensus: U256, required: U256) -> ArtworkRecord {
        ArtworkRecord {
            content_id: ContentId::new([5; 32]),
            submitter: AccountAddress::new("0x5bf9f5f8d02a6efc12e5ae79d6f99e7cb0b577af"),
            submitted_at: Timestamp::new(1_700_000_000),
            original_author: "Ada".into(),
            validated: true,
            is_original: true,
            consensus_count: consensus,
            required_validators: required,
            content_refs: vec![],
            metadata_ref: String::new(),
            title: "Dusk".into(),
            description: String::new(),
            medium: String::new(),
            additional_info: String::new(),
        }
    }

    #[test]
    fn ledger_fields_win() {
        let upsert = build_upsert(
            ContentId::new([5; 32]),
            Some(ledger_record(U256::from(2u64), U256::from(2u64))),
            &ReconcileHints::default(),
            Timestamp::new(10),
        )
        .unwrap();
        assert!(upsert.validated);
        assert_eq!(upsert.consensus_count, 2);
        assert_eq!(upsert.original_author.as_deref(), Some("Ada"));
        assert_eq!(upsert.title.as_deref(), Some("Dusk"));
    }

    #[test]
    fn oversized_required_validators_is_reconciliation_failure() {
        let huge = U256::from(u32::MAX) + U256::one();
        let err = build_upsert(
            ContentId::new([5; 32]),
            Some(ledger_record(U256::one(), huge)),
            &ReconcileHints::default(),
            Timestamp::new(10),
        )
        .unwrap_err();
        assert_eq!(err.code(), "RECONCILIATION_FAILURE");
    }

    #[test]
    fn missing_ledger_record_uses_fallback_policy() {
        let hints = ReconcileHints {
            fallback_is_original: true,
            ..ReconcileHints::default()
        };
        let upsert = build_upsert(
            ContentId::new([5; 32]),
            None,
            &hints,
            Timestamp::new(10),
        )
        .unwrap();
        assert_eq!(upsert.consensus_count, FALLBACK_CONSENSUS_COUNT);
        assert_eq!(upsert.required_validators, FALLBACK_REQUIRED_VALIDATORS);
        assert!(upsert.is_original);
        assert!(!upsert.validated);
    }

    #[test]
    fn extended_record_flows_into_side_channel() {
        let mut record = ledger_record(U256::one(), U256::from(2u64));
        record.content_refs = vec!["ipfs://primary".into()];
        record.metadata_ref = "ipfs://meta".into();
        let upsert = build_upsert(
            record.content_id,
            Some(record),
            &ReconcileHints::default(),
            Timestamp::new(10),
        )
        .unwrap();
        let side = upsert.side_channel.expect("side channel");
        assert_eq!(side.image_uris, vec!["ipfs://primary".to_string()]);
        assert_eq!(side.metadata_uri.as_deref(), Some("ipfs://meta"));
    }

    #[test]
    fn hint_side_channel_wins_over_ledger() {
        let mut record = ledger_record(U256::one(), U256::from(2u64));
        record.content_refs = vec!["ipfs://stale".into()];
        let hints = ReconcileHints {
            side_channel: Some(SideChannel {
                image_uris: vec!["ipfs://fresh".into()],
                ..SideChannel::default()
            }),
            ..ReconcileHints::default()
        };
        let upsert = build_upsert(
            record.content_id,
            Some(record),
            &hints,
            Timestamp::new(10),
        )
        .unwrap();
        assert_eq!(
            upsert.side_channel.unwrap().image_uris,
            vec!["ipfs://fresh".to_string()]
        );
    }
}
