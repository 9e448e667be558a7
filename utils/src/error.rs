use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UtilsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unknown log format: {0}")]
    InvalidLogFormat(String),

    #[error("logging init failed: {0}")]
    Logging(String),
}
