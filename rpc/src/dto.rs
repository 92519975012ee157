//! Response shapes.
//!
//! Counts and timestamps cross the API as decimal strings. Cached rows
//! flatten their side channel into top-level fields so callers see one shape
//! whether the row came from a legacy or a content-addressed upload.

use serde::Serialize;

use artchain_store::{CacheRecord, SideChannel};
use artchain_types::ArtworkRecord;

/// A cache row as the API presents it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedArtworkDto {
    pub image_hash: String,
    pub title: String,
    pub artist: String,
    pub original_author: String,
    pub is_original: bool,
    pub validated: bool,
    pub consensus_count: String,
    pub required_validators: String,
    pub image_uris: Vec<String>,
    pub metadata_uri: Option<String>,
    pub description: Option<String>,
    pub medium: Option<String>,
    pub year: Option<String>,
    pub dimensions: Option<String>,
    pub additional_info: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CacheRecord> for CachedArtworkDto {
    fn from(row: CacheRecord) -> Self {
        let side = row
            .side_channel
            .as_deref()
            .and_then(SideChannel::decode)
            .unwrap_or_default();
        Self {
            image_hash: row.content_id.to_string(),
            title: row.title,
            artist: row.artist,
            original_author: row.original_author,
            is_original: row.is_original,
            validated: row.validated,
            consensus_count: row.consensus_count.to_string(),
            required_validators: row.required_validators.to_string(),
            image_uris: side.image_uris,
            metadata_uri: side.metadata_uri,
            description: side.description,
            medium: side.medium,
            year: side.year,
            dimensions: side.dimensions,
            additional_info: side.additional_info,
            created_at: row.created_at.as_secs().to_string(),
            updated_at: row.updated_at.as_secs().to_string(),
        }
    }
}

/// A ledger record as the API presents it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerArtworkDto {
    pub image_hash: String,
    pub artist: String,
    pub timestamp: String,
    pub original_author: String,
    pub validated: bool,
    pub is_original: bool,
    pub consensus_count: String,
    pub required_validators: String,
    pub ipfs_image_uris: Vec<String>,
    pub ipfs_metadata_uri: String,
    pub title: String,
    pub description: String,
    pub medium: String,
    pub additional_info: String,
    pub has_content_refs: bool,
    pub is_legacy: bool,
}

impl From<ArtworkRecord> for LedgerArtworkDto {
    fn from(record: ArtworkRecord) -> Self {
        let has_content_refs = record.has_content_refs();
        Self {
            image_hash: record.content_id.to_string(),
            artist: record.submitter.to_string(),
            timestamp: record.submitted_at.as_secs().to_string(),
            original_author: record.original_author,
            validated: record.validated,
            is_original: record.is_original,
            consensus_count: record.consensus_count.to_string(),
            required_validators: record.required_validators.to_string(),
            ipfs_image_uris: record.content_refs,
            ipfs_metadata_uri: record.metadata_ref,
            title: record.title,
            description: record.description,
            medium: record.medium,
            additional_info: record.additional_info,
            has_content_refs,
            is_legacy: !has_content_refs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artchain_types::{AccountAddress, ContentId, Timestamp, U256};

    #[test]
    fn cached_dto_flattens_side_channel() {
        let side = SideChannel {
            image_uris: vec!["ipfs://a".into()],
            metadata_uri: Some("ipfs://meta".into()),
            description: Some("desc".into()),
            ..SideChannel::default()
        };
        let row = CacheRecord {
            content_id: ContentId::new([3; 32]),
            title: "Dusk".into(),
            artist: "Ada".into(),
            original_author: "Ada".into(),
            is_original: true,
            validated: true,
            consensus_count: 2,
            required_validators: 2,
            side_channel: Some(side.encode()),
            created_at: Timestamp::new(100),
            updated_at: Timestamp::new(200),
        };
        let dto = CachedArtworkDto::from(row);
        assert_eq!(dto.image_uris, vec!["ipfs://a".to_string()]);
        assert_eq!(dto.metadata_uri.as_deref(), Some("ipfs://meta"));
        assert_eq!(dto.consensus_count, "2");
        assert_eq!(dto.created_at, "100");
    }

    #[test]
    fn ledger_dto_serializes_wide_integers_as_decimal_strings() {
        let record = ArtworkRecord {
            content_id: ContentId::new([4; 32]),
            submitter: AccountAddress::new("0x5bf9f5f8d02a6efc12e5ae79d6f99e7cb0b577af"),
            submitted_at: Timestamp::new(1_700_000_000),
            original_author: "Ada".into(),
            validated: false,
            is_original: false,
            consensus_count: U256::from(u64::MAX) + U256::one(),
            required_validators: U256::from(2u64),
            content_refs: vec![],
            metadata_ref: String::new(),
            title: String::new(),
            description: String::new(),
            medium: String::new(),
            additional_info: String::new(),
        };
        let dto = LedgerArtworkDto::from(record);
        assert_eq!(dto.consensus_count, "18446744073709551616");
        assert!(dto.is_legacy);
        assert!(!dto.has_content_refs);

        let json = serde_json::to_value(&dto).unwrap();
        assert!(json["consensusCount"].is_string());
        assert!(json["requiredValidators"].is_string());
    }
}
