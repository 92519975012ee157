//! HTTP API surface for the ArtChain backend.
//!
//! Routes terminate in the validation facade: uploads run the
//! submit + vote + reconcile sequence, `/validate` runs vote + reconcile,
//! `/artworks` reads the cache and `/api/artworks` reads the ledger. Wide
//! integers are serialized as decimal strings everywhere — native JSON
//! numbers cannot carry 256-bit values without losing precision.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{router, serve, ApiState};
