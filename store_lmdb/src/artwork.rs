//! LMDB implementation of the artwork cache store.
//!
//! The upsert reads and writes inside a single LMDB write transaction. LMDB
//! serializes write transactions, so the read-apply-write is one conditional
//! write as far as concurrent reconciliations are concerned — two racing
//! upserts for the same content id commit in some order and neither loses the
//! other's committed fields.

use artchain_store::{ArtworkCacheStore, ArtworkUpsert, CacheRecord, StoreError};
use artchain_types::ContentId;

use crate::environment::LmdbEnvironment;
use crate::LmdbError;

pub struct LmdbArtworkStore {
    env: LmdbEnvironment,
}

/// Order-index key: big-endian creation seconds ++ content id. Big-endian so
/// lexicographic LMDB ordering equals chronological ordering; the id suffix
/// disambiguates rows created in the same second.
fn order_key(created_secs: u64, content_id: &ContentId) -> Vec<u8> {
    let mut key = Vec::with_capacity(8 + 32);
    key.extend_from_slice(&created_secs.to_be_bytes());
    key.extend_from_slice(content_id.as_bytes());
    key
}

impl LmdbArtworkStore {
    pub fn new(env: LmdbEnvironment) -> Self {
        Self { env }
    }

    fn decode_row(bytes: &[u8]) -> Result<CacheRecord, LmdbError> {
        bincode::deserialize(bytes).map_err(|e| LmdbError::Serialization(e.to_string()))
    }

    fn encode_row(row: &CacheRecord) -> Result<Vec<u8>, LmdbError> {
        bincode::serialize(row).map_err(|e| LmdbError::Serialization(e.to_string()))
    }
}

impl ArtworkCacheStore for LmdbArtworkStore {
    fn upsert(&self, upsert: &ArtworkUpsert) -> Result<CacheRecord, StoreError> {
        let mut wtxn = self.env.env().write_txn().map_err(LmdbError::from)?;
        let key = upsert.content_id.as_bytes();

        let existing = self
            .env
            .artworks_db
            .get(&wtxn, key)
            .map_err(LmdbError::from)?
            .map(Self::decode_row)
            .transpose()?;

        let is_create = existing.is_none();
        let row = upsert.apply_to(existing);

        let encoded = Self::encode_row(&row)?;
        self.env
            .artworks_db
            .put(&mut wtxn, key, &encoded)
            .map_err(LmdbError::from)?;

        if is_create {
            let okey = order_key(row.created_at.as_secs(), &row.content_id);
            self.env
                .order_db
                .put(&mut wtxn, &okey, key)
                .map_err(LmdbError::from)?;
        }

        wtxn.commit().map_err(LmdbError::from)?;
        Ok(row)
    }

    fn get(&self, content_id: &ContentId) -> Result<Option<CacheRecord>, StoreError> {
        let rtxn = self.env.env().read_txn().map_err(LmdbError::from)?;
        let row = self
            .env
            .artworks_db
            .get(&rtxn, content_id.as_bytes())
            .map_err(LmdbError::from)?
            .map(Self::decode_row)
            .transpose()?;
        Ok(row)
    }

    fn list_newest_first(&self) -> Result<Vec<CacheRecord>, StoreError> {
        let rtxn = self.env.env().read_txn().map_err(LmdbError::from)?;
        let mut rows = Vec::new();
        let iter = self.env.order_db.rev_iter(&rtxn).map_err(LmdbError::from)?;
        for entry in iter {
            let (_okey, id_bytes) = entry.map_err(LmdbError::from)?;
            let row = self
                .env
                .artworks_db
                .get(&rtxn, id_bytes)
                .map_err(LmdbError::from)?
                .ok_or_else(|| {
                    StoreError::Corruption(format!(
                        "order index points at missing row {}",
                        hex_preview(id_bytes)
                    ))
                })?;
            rows.push(Self::decode_row(row)?);
        }
        Ok(rows)
    }

    fn count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.env().read_txn().map_err(LmdbError::from)?;
        let n = self.env.artworks_db.len(&rtxn).map_err(LmdbError::from)?;
        Ok(n)
    }
}

fn hex_preview(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take(4)
        .map(|b| format!("{b:02x}"))
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use artchain_types::Timestamp;
    use tempfile::TempDir;

    fn open_store() -> (TempDir, LmdbArtworkStore) {
        let dir = TempDir::new().unwrap();
        let env = LmdbEnvironment::open_with_map_size(dir.path(), 10 * 1024 * 1024).unwrap();
        (dir, LmdbArtworkStore::new(env))
    }

    fn upsert(id: u8, created_secs: u64) -> ArtworkUpsert {
        ArtworkUpsert {
            content_id: ContentId::new([id; 32]),
            title: Some(format!("piece-{id}")),
            artist: Some("Ada".into()),
            original_author: Some("Ada".into()),
            is_original: true,
            validated: false,
            consensus_count: 1,
            required_validators: 2,
            side_channel: None,
            now: Timestamp::new(created_secs),
        }
    }

    #[test]
    fn upsert_then_get_round_trips() {
        let (_dir, store) = open_store();
        let stored = store.upsert(&upsert(1, 100)).unwrap();
        let fetched = store.get(&ContentId::new([1; 32])).unwrap().unwrap();
        assert_eq!(fetched, stored);
    }

    #[test]
    fn get_missing_returns_none() {
        let (_dir, store) = open_store();
        assert!(store.get(&ContentId::new([9; 32])).unwrap().is_none());
    }

    #[test]
    fn upsert_updates_in_place() {
        let (_dir, store) = open_store();
        store.upsert(&upsert(1, 100)).unwrap();

        let mut second = upsert(1, 200);
        second.title = None;
        second.consensus_count = 2;
        second.validated = true;
        let row = store.upsert(&second).unwrap();

        assert_eq!(row.title, "piece-1");
        assert_eq!(row.consensus_count, 2);
        assert!(row.validated);
        assert_eq!(row.created_at, Timestamp::new(100));
        assert_eq!(row.updated_at, Timestamp::new(200));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn repeated_identical_upsert_is_byte_stable() {
        let (_dir, store) = open_store();
        let input = upsert(1, 100);
        let first = store.upsert(&input).unwrap();
        let second = store.upsert(&input).unwrap();
        assert_eq!(
            bincode::serialize(&first).unwrap(),
            bincode::serialize(&second).unwrap()
        );
    }

    #[test]
    fn listing_is_newest_first() {
        let (_dir, store) = open_store();
        store.upsert(&upsert(1, 100)).unwrap();
        store.upsert(&upsert(2, 300)).unwrap();
        store.upsert(&upsert(3, 200)).unwrap();

        let rows = store.list_newest_first().unwrap();
        let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["piece-2", "piece-3", "piece-1"]);
    }

    #[test]
    fn update_does_not_duplicate_order_index() {
        let (_dir, store) = open_store();
        store.upsert(&upsert(1, 100)).unwrap();
        store.upsert(&upsert(1, 500)).unwrap();
        assert_eq!(store.list_newest_first().unwrap().len(), 1);
    }

    #[test]
    fn count_tracks_distinct_rows() {
        let (_dir, store) = open_store();
        for id in 1..=4u8 {
            store.upsert(&upsert(id, 100 + id as u64)).unwrap();
        }
        assert_eq!(store.count().unwrap(), 4);
    }
}
