//! Shared utilities for the ArtChain backend.

pub mod logging;

pub use logging::init_tracing;
