//! LMDB cache backend for the ArtChain backend.
//!
//! Implements [`artchain_store::ArtworkCacheStore`] using the `heed` LMDB
//! bindings. One environment holds the `artworks` table (content id → bincode
//! row) and the `order` index (big-endian creation time ++ content id), which
//! gives a stable newest-first listing without scanning rows.

pub mod artwork;
pub mod environment;
pub mod error;

pub use artwork::LmdbArtworkStore;
pub use environment::LmdbEnvironment;
pub use error::LmdbError;
