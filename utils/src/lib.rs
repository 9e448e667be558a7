//! Shared utilities for the BTSG rebalancing tools.

pub mod error;
pub mod json;
pub mod logging;

pub use error::UtilsError;
pub use json::{read_json, write_json};
pub use logging::{init_logging, LogFormat};
