//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::LmdbError;

/// Default LMDB map size: 1 GiB. The cache holds one small row per artwork.
const DEFAULT_MAP_SIZE: usize = 1 << 30;

/// Named databases in the environment.
const ARTWORKS_DB: &str = "artworks";
const ORDER_DB: &str = "order";

/// Wraps the LMDB environment and the database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    pub(crate) artworks_db: Database<Bytes, Bytes>,
    pub(crate) order_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path) -> Result<Self, LmdbError> {
        Self::open_with_map_size(path, DEFAULT_MAP_SIZE)
    }

    /// Open with an explicit map size (tests use a small map).
    pub fn open_with_map_size(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment directory is exclusively owned by this
        // process; no other process maps the same file with different flags.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(2)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let artworks_db = env.create_database(&mut wtxn, Some(ARTWORKS_DB))?;
        let order_db = env.create_database(&mut wtxn, Some(ORDER_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), "opened LMDB cache environment");

        Ok(Self {
            env: Arc::new(env),
            artworks_db,
            order_db,
        })
    }

    pub(crate) fn env(&self) -> &Env {
        &self.env
    }
}
