//! Input errors shared across crates.
//!
//! These are the fatal class: anything raised here aborts a run before
//! planning begins.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid amount {0}: must be finite and non-negative")]
    InvalidAmount(f64),

    #[error("{0} total overflows")]
    AmountOverflow(&'static str),

    #[error("unit scale must be non-zero")]
    InvalidScale,

    #[error("duplicate validator address: {0}")]
    DuplicateValidator(String),

    #[error("validator {validator}: {reason}")]
    InvalidValidator { validator: String, reason: String },

    #[error("malformed allocation snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
