//! Fundamental types for the ArtChain validation backend.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: content fingerprints, ledger account addresses, timestamps,
//! artwork records, and checked narrowing for ledger-side wide integers.

pub mod address;
pub mod artwork;
pub mod content_id;
pub mod error;
pub mod time;
pub mod uint;

pub use address::AccountAddress;
pub use artwork::{ArtworkMetadata, ArtworkRecord, ContractVariant};
pub use content_id::ContentId;
pub use error::TypeError;
pub use time::Timestamp;
pub use uint::{u256_to_u32, u256_to_u64, U256};
