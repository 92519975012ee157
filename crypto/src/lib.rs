//! Content fingerprint derivation for the ArtChain backend.
//!
//! Blake2b-256 over either raw artwork bytes or a canonical serialization of
//! a content-addressed submission. Pure functions; no I/O.

pub mod fingerprint;
pub mod hash;

pub use fingerprint::{fingerprint_bytes, fingerprint_content_refs, FingerprintError};
pub use hash::{blake2b_256, blake2b_256_multi};
