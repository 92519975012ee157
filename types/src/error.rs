//! Parse and conversion errors for the fundamental types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypeError {
    #[error("invalid content id: {0}")]
    InvalidContentId(String),

    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("numeric overflow: {value} does not fit in {target}")]
    NumericOverflow {
        value: String,
        target: &'static str,
    },
}
