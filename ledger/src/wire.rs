//! Wire types for the ledger node's JSON-RPC surface.
//!
//! Wide unsigned integers travel as `0x`-prefixed hex strings, as the node
//! emits them. Legacy contracts return the fixed 8-field record shape; the
//! Extended fields default to empty so one wire type covers both.

use serde::Deserialize;

use artchain_types::{u256_to_u64, ArtworkRecord, ContentId, Timestamp, U256};

use crate::LedgerError;

/// Artwork details as returned by `art_getArtworkDetails`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArtworkDetails {
    pub hash: String,
    pub artist: String,
    pub timestamp: U256,
    pub original_author: String,
    pub validated: bool,
    pub is_original: bool,
    pub consensus_count: U256,
    pub required_validators: U256,
    #[serde(default)]
    pub ipfs_image_uris: Vec<String>,
    #[serde(default)]
    pub ipfs_metadata_uri: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub additional_info: String,
}

impl RawArtworkDetails {
    /// Convert the wire shape into the domain record, validating identifiers.
    pub fn into_record(self) -> Result<ArtworkRecord, LedgerError> {
        let content_id = ContentId::from_hex(&self.hash)
            .map_err(|e| LedgerError::InvalidResponse(format!("bad artwork hash: {e}")))?;
        let submitter = self
            .artist
            .parse()
            .map_err(|e| LedgerError::InvalidResponse(format!("bad submitter address: {e}")))?;
        let submitted_secs = u256_to_u64(self.timestamp)
            .map_err(|e| LedgerError::InvalidResponse(format!("bad block timestamp: {e}")))?;

        Ok(ArtworkRecord {
            content_id,
            submitter,
            submitted_at: Timestamp::new(submitted_secs),
            original_author: self.original_author,
            validated: self.validated,
            is_original: self.is_original,
            consensus_count: self.consensus_count,
            required_validators: self.required_validators,
            content_refs: self.ipfs_image_uris,
            metadata_ref: self.ipfs_metadata_uri,
            title: self.title,
            description: self.description,
            medium: self.medium,
            additional_info: self.additional_info,
        })
    }
}

/// Transaction receipt from `art_getTransactionReceipt`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub block_number: U256,
    pub status: U256,
    #[serde(default)]
    pub revert_reason: Option<String>,
}

impl TxReceipt {
    pub fn succeeded(&self) -> bool {
        self.status == U256::one()
    }
}

/// Payload of `art_getArtworkIPFS`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContentRefs {
    #[serde(default)]
    pub ipfs_image_uris: Vec<String>,
    #[serde(default)]
    pub ipfs_metadata_uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTENDED_JSON: &str = r#"{
        "hash": "0x0101010101010101010101010101010101010101010101010101010101010101",
        "artist": "0x5bf9f5f8d02a6efc12e5ae79d6f99e7cb0b577af",
        "timestamp": "0x665f0d00",
        "originalAuthor": "Ada",
        "validated": true,
        "isOriginal": true,
        "consensusCount": "0x2",
        "requiredValidators": "0x2",
        "ipfsImageUris": ["ipfs://bafyprimary"],
        "ipfsMetadataUri": "ipfs://bafymeta",
        "title": "Dusk",
        "description": "oil on canvas",
        "medium": "painting",
        "additionalInfo": ""
    }"#;

    const LEGACY_JSON: &str = r#"{
        "hash": "0x0202020202020202020202020202020202020202020202020202020202020202",
        "artist": "0x5bf9f5f8d02a6efc12e5ae79d6f99e7cb0b577af",
        "timestamp": "0x665f0d00",
        "originalAuthor": "Unknown",
        "validated": false,
        "isOriginal": false,
        "consensusCount": "0x1",
        "requiredValidators": "0x2"
    }"#;

    #[test]
    fn extended_shape_parses_into_record() {
        let raw: RawArtworkDetails = serde_json::from_str(EXTENDED_JSON).unwrap();
        let record = raw.into_record().unwrap();
        assert_eq!(record.consensus_count, U256::from(2u64));
        assert_eq!(record.content_refs, vec!["ipfs://bafyprimary".to_string()]);
        assert!(record.has_content_refs());
        assert_eq!(record.submitted_at.as_secs(), 0x665f0d00);
    }

    #[test]
    fn legacy_shape_defaults_extended_fields() {
        let raw: RawArtworkDetails = serde_json::from_str(LEGACY_JSON).unwrap();
        let record = raw.into_record().unwrap();
        assert!(record.is_legacy());
        assert!(record.metadata_ref.is_empty());
        assert!(record.title.is_empty());
    }

    #[test]
    fn bad_hash_is_invalid_response() {
        let json = EXTENDED_JSON.replace(
            "0x0101010101010101010101010101010101010101010101010101010101010101",
            "0xnothex",
        );
        let raw: RawArtworkDetails = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            raw.into_record(),
            Err(LedgerError::InvalidResponse(_))
        ));
    }

    #[test]
    fn receipt_status_zero_is_failure() {
        let receipt: TxReceipt = serde_json::from_str(
            r#"{"blockNumber": "0x10", "status": "0x0", "revertReason": "Already voted"}"#,
        )
        .unwrap();
        assert!(!receipt.succeeded());
        assert_eq!(receipt.revert_reason.as_deref(), Some("Already voted"));
    }
}
