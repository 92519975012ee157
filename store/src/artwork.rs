//! Cache storage trait and the upsert input type.

use serde::{Deserialize, Serialize};

use artchain_types::{ContentId, Timestamp};

use crate::record::{CacheRecord, SideChannel};
use crate::StoreError;

/// Default title when neither the caller nor an existing row provides one.
pub const DEFAULT_TITLE: &str = "Untitled";
/// Default artist/author placeholder.
pub const DEFAULT_AUTHOR: &str = "Unknown";

/// The full field set an upsert carries.
///
/// Ledger-confirmed fields (`validated`, `is_original`, `consensus_count`,
/// `required_validators`, `original_author`) always overwrite the cached row.
/// Presentation fields are `Option` — `None` preserves whatever the row
/// already holds, so a vote arriving over the legacy path does not erase a
/// title written at submission time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtworkUpsert {
    pub content_id: ContentId,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub original_author: Option<String>,
    pub is_original: bool,
    pub validated: bool,
    pub consensus_count: u32,
    pub required_validators: u32,
    pub side_channel: Option<SideChannel>,
    /// Local clock reading for created_at/updated_at bookkeeping.
    pub now: Timestamp,
}

impl ArtworkUpsert {
    /// Compute the row that should exist after this upsert.
    ///
    /// Pure create-or-update semantics, shared by every backend so that the
    /// same inputs always produce byte-identical rows regardless of storage
    /// engine. Idempotent: applying the same upsert to its own output changes
    /// nothing but `updated_at`, and not even that when `now` is equal.
    pub fn apply_to(&self, existing: Option<CacheRecord>) -> CacheRecord {
        match existing {
            None => CacheRecord {
                content_id: self.content_id,
                title: self.title.clone().unwrap_or_else(|| DEFAULT_TITLE.into()),
                artist: self.artist.clone().unwrap_or_else(|| DEFAULT_AUTHOR.into()),
                original_author: self
                    .original_author
                    .clone()
                    .unwrap_or_else(|| DEFAULT_AUTHOR.into()),
                is_original: self.is_original,
                validated: self.validated,
                consensus_count: self.consensus_count,
                required_validators: self.required_validators,
                side_channel: self.side_channel.as_ref().map(SideChannel::encode),
                created_at: self.now,
                updated_at: self.now,
            },
            Some(row) => CacheRecord {
                content_id: row.content_id,
                title: self.title.clone().unwrap_or(row.title),
                artist: self.artist.clone().unwrap_or(row.artist),
                original_author: self.original_author.clone().unwrap_or(row.original_author),
                is_original: self.is_original,
                validated: self.validated,
                consensus_count: self.consensus_count,
                required_validators: self.required_validators,
                side_channel: self
                    .side_channel
                    .as_ref()
                    .map(SideChannel::encode)
                    .or(row.side_channel),
                created_at: row.created_at,
                updated_at: self.now,
            },
        }
    }
}

/// Storage contract for the artwork cache.
///
/// `upsert` must be atomic — a single conditional write, not a read followed
/// by a separate write — so that two reconciliations racing on the same
/// content id cannot lose updates. Rows are never deleted by this subsystem.
pub trait ArtworkCacheStore: Send + Sync {
    /// Create-or-update the row keyed by `upsert.content_id`. Returns the row
    /// as stored.
    fn upsert(&self, upsert: &ArtworkUpsert) -> Result<CacheRecord, StoreError>;

    /// Fetch a single row.
    fn get(&self, content_id: &ContentId) -> Result<Option<CacheRecord>, StoreError>;

    /// All rows, newest creation first.
    fn list_newest_first(&self) -> Result<Vec<CacheRecord>, StoreError>;

    /// Number of cached rows.
    fn count(&self) -> Result<u64, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upsert_for(id: u8) -> ArtworkUpsert {
        ArtworkUpsert {
            content_id: ContentId::new([id; 32]),
            title: Some("Dusk".into()),
            artist: Some("Ada".into()),
            original_author: Some("Ada".into()),
            is_original: true,
            validated: false,
            consensus_count: 1,
            required_validators: 2,
            side_channel: None,
            now: Timestamp::new(1_000),
        }
    }

    #[test]
    fn create_seeds_all_fields() {
        let row = upsert_for(1).apply_to(None);
        assert_eq!(row.title, "Dusk");
        assert_eq!(row.consensus_count, 1);
        assert_eq!(row.created_at, Timestamp::new(1_000));
        assert_eq!(row.updated_at, Timestamp::new(1_000));
    }

    #[test]
    fn create_uses_placeholders_for_missing_presentation_fields() {
        let mut upsert = upsert_for(1);
        upsert.title = None;
        upsert.artist = None;
        upsert.original_author = None;
        let row = upsert.apply_to(None);
        assert_eq!(row.title, DEFAULT_TITLE);
        assert_eq!(row.artist, DEFAULT_AUTHOR);
        assert_eq!(row.original_author, DEFAULT_AUTHOR);
    }

    #[test]
    fn update_preserves_presentation_fields_when_absent() {
        let first = upsert_for(1).apply_to(None);

        let mut vote = upsert_for(1);
        vote.title = None;
        vote.artist = None;
        vote.original_author = Some("Beatrix".into());
        vote.consensus_count = 2;
        vote.validated = true;
        vote.now = Timestamp::new(2_000);

        let row = vote.apply_to(Some(first));
        assert_eq!(row.title, "Dusk");
        assert_eq!(row.artist, "Ada");
        assert_eq!(row.original_author, "Beatrix");
        assert_eq!(row.consensus_count, 2);
        assert!(row.validated);
        assert_eq!(row.created_at, Timestamp::new(1_000));
        assert_eq!(row.updated_at, Timestamp::new(2_000));
    }

    #[test]
    fn update_preserves_side_channel_when_absent() {
        let mut first = upsert_for(1);
        first.side_channel = Some(SideChannel {
            image_uris: vec!["ipfs://a".into()],
            ..SideChannel::default()
        });
        let seeded = first.apply_to(None);
        assert!(seeded.side_channel.is_some());

        let vote = upsert_for(1);
        let row = vote.apply_to(Some(seeded.clone()));
        assert_eq!(row.side_channel, seeded.side_channel);
    }

    #[test]
    fn reapplying_same_upsert_is_idempotent() {
        let upsert = upsert_for(1);
        let once = upsert.apply_to(None);
        let twice = upsert.apply_to(Some(once.clone()));
        assert_eq!(once, twice);
    }
}
