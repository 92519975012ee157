//! Ledger client adapter for the ArtChain backend.
//!
//! The ledger node exposes the artwork-validation contracts over JSON-RPC.
//! This crate owns the transport ([`rpc::JsonRpcClient`]), the
//! confirmation-depth policy, the polymorphic [`LedgerAdapter`] trait, its
//! Legacy and Extended implementations, and the startup readiness probe that
//! picks between them.

pub mod adapter;
pub(crate) mod contract;
pub mod error;
pub mod extended;
pub mod legacy;
pub mod probe;
pub mod rpc;
pub mod wire;

pub use adapter::{ArtworkSubmission, ContentRefs, LedgerAdapter};
pub use error::{LedgerError, ALREADY_VOTED_REASON};
pub use extended::ExtendedLedger;
pub use legacy::LegacyLedger;
pub use probe::select_adapter;
pub use rpc::{ConfirmationPolicy, JsonRpcClient};
