//! Pretty JSON file I/O with path-carrying errors.

use crate::error::UtilsError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, UtilsError> {
    let content = std::fs::read_to_string(path).map_err(|source| UtilsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| UtilsError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` as two-space indented JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), UtilsError> {
    let content = serde_json::to_string_pretty(value).map_err(|source| UtilsError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| UtilsError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, content).map_err(|source| UtilsError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}
