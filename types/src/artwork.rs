//! Artwork record and submission metadata types.

use serde::{Deserialize, Serialize};

use crate::{AccountAddress, ContentId, Timestamp, U256};

/// Which ledger contract variant a record (or the active adapter) belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractVariant {
    /// Fixed-schema contract: fingerprint + validation fields only.
    Legacy,
    /// Schema carrying content-addressed image/metadata references.
    Extended,
}

impl ContractVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractVariant::Legacy => "legacy",
            ContractVariant::Extended => "extended",
        }
    }
}

/// An artwork record as confirmed on the ledger.
///
/// The ledger is the sole writer of confirmed state; this struct is only ever
/// built from a ledger read. Legacy-contract records carry empty
/// `content_refs` and blank Extended-only fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    /// Content fingerprint — primary key on the ledger and in the cache.
    pub content_id: ContentId,
    /// Account that first submitted the record.
    pub submitter: AccountAddress,
    /// Ledger-block timestamp of the submission.
    pub submitted_at: Timestamp,
    /// Free-text identity asserted by a validator.
    pub original_author: String,
    /// True once the consensus threshold is reached.
    pub validated: bool,
    /// Final originality determination.
    pub is_original: bool,
    /// Votes cast so far. Monotonically non-decreasing, never exceeds
    /// `required_validators`.
    pub consensus_count: U256,
    /// Threshold needed to finalize; fixed at creation.
    pub required_validators: U256,
    /// Content-addressed image URIs (Extended variant; empty on legacy
    /// records).
    pub content_refs: Vec<String>,
    /// Content-addressed metadata URI (Extended variant).
    pub metadata_ref: String,
    pub title: String,
    pub description: String,
    pub medium: String,
    pub additional_info: String,
}

impl ArtworkRecord {
    /// Whether this record carries content-addressed data.
    pub fn has_content_refs(&self) -> bool {
        !self.content_refs.is_empty()
    }

    /// An empty ref list signals a legacy record with no content-addressed
    /// data.
    pub fn is_legacy(&self) -> bool {
        self.content_refs.is_empty()
    }
}

/// Submission metadata accompanying a content-addressed upload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtworkMetadata {
    /// Display title (`name` in the upload payload).
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub additional_info: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_refs(refs: Vec<String>) -> ArtworkRecord {
        ArtworkRecord {
            content_id: ContentId::new([9u8; 32]),
            submitter: AccountAddress::new("0x5bf9f5f8d02a6efc12e5ae79d6f99e7cb0b577af"),
            submitted_at: Timestamp::new(1_700_000_000),
            original_author: "Unknown".into(),
            validated: false,
            is_original: false,
            consensus_count: U256::zero(),
            required_validators: U256::from(2u64),
            content_refs: refs,
            metadata_ref: String::new(),
            title: String::new(),
            description: String::new(),
            medium: String::new(),
            additional_info: String::new(),
        }
    }

    #[test]
    fn empty_refs_means_legacy() {
        let record = record_with_refs(vec![]);
        assert!(record.is_legacy());
        assert!(!record.has_content_refs());
    }

    #[test]
    fn populated_refs_means_extended_data() {
        let record = record_with_refs(vec!["ipfs://bafy…".into()]);
        assert!(!record.is_legacy());
        assert!(record.has_content_refs());
    }

    #[test]
    fn metadata_deserializes_with_defaults() {
        let meta: ArtworkMetadata = serde_json::from_str(r#"{"name":"Dusk"}"#).unwrap();
        assert_eq!(meta.name, "Dusk");
        assert!(meta.artist.is_empty());
        assert!(meta.year.is_none());
    }
}
