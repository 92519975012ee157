//! Abstract cache storage trait for the ArtChain backend.
//!
//! The local cache mirrors ledger-confirmed artwork state for fast reads.
//! Every backend (LMDB in production, in-memory for tests) implements
//! [`ArtworkCacheStore`]; the rest of the codebase depends only on the trait.

pub mod artwork;
pub mod error;
pub mod record;

pub use artwork::{ArtworkCacheStore, ArtworkUpsert, DEFAULT_AUTHOR, DEFAULT_TITLE};
pub use error::StoreError;
pub use record::{CacheRecord, SideChannel};
