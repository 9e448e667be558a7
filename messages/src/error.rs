use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("unknown message type: {0}")]
    UnknownTypeUrl(String),

    #[error("unexpected denom {found}, expected {expected}")]
    DenomMismatch { expected: String, found: String },

    #[error("invalid amount {0:?}: expected a positive integer")]
    InvalidAmount(String),

    #[error("malformed message value: {0}")]
    Json(#[from] serde_json::Error),
}
