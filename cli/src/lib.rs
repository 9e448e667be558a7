//! `btsg-rebalance` command implementations and configuration.

pub mod commands;
pub mod config;
pub mod error;

pub use config::RebalanceConfig;
pub use error::CliError;
