//! Cache row types.
//!
//! `CacheRecord` mirrors the ledger's confirmed state in cache-native widths
//! plus local bookkeeping. Extended-variant fields travel in a serialized
//! side-channel because the cache schema predates the Extended contract.

use serde::{Deserialize, Serialize};

use artchain_types::{ContentId, Timestamp};

/// A locally cached artwork row. 1:1 eventually-consistent mirror of a ledger
/// record, keyed by content id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub content_id: ContentId,
    pub title: String,
    pub artist: String,
    pub original_author: String,
    pub is_original: bool,
    pub validated: bool,
    pub consensus_count: u32,
    pub required_validators: u32,
    /// JSON-encoded [`SideChannel`] for Extended-variant fields; `None` on
    /// pure-legacy rows.
    pub side_channel: Option<String>,
    /// Local creation instant (first successful ledger submission).
    pub created_at: Timestamp,
    /// Local instant of the last reconciliation.
    pub updated_at: Timestamp,
}

/// Extended-variant fields carried through the cache's back-compat encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideChannel {
    #[serde(default)]
    pub image_uris: Vec<String>,
    #[serde(default)]
    pub metadata_uri: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl SideChannel {
    /// Serialize for storage in the cache row.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).expect("side channel is always JSON-serializable")
    }

    /// Parse a stored side channel. Returns `None` on malformed payloads —
    /// old rows may hold a bare URL string rather than JSON.
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_channel_round_trips() {
        let side = SideChannel {
            image_uris: vec!["ipfs://a".into(), "ipfs://b".into()],
            metadata_uri: Some("ipfs://meta".into()),
            description: Some("oil on canvas".into()),
            medium: Some("painting".into()),
            year: Some("2024".into()),
            dimensions: None,
            additional_info: None,
        };
        let decoded = SideChannel::decode(&side.encode()).unwrap();
        assert_eq!(decoded, side);
    }

    #[test]
    fn bare_url_decodes_to_none() {
        assert!(SideChannel::decode("https://example.com/art.png").is_none());
    }

    #[test]
    fn missing_fields_default() {
        let decoded = SideChannel::decode(r#"{"image_uris":["ipfs://x"]}"#).unwrap();
        assert_eq!(decoded.image_uris.len(), 1);
        assert!(decoded.metadata_uri.is_none());
    }
}
