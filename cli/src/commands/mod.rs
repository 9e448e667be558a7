//! One module per `btsg-rebalance` subcommand.
//!
//! Each command reads its inputs from the configured data directory, writes
//! its outputs there and returns what it produced, so callers can print or
//! test it without re-reading files.

pub mod analyze;
pub mod authz;
pub mod daodao;
pub mod grant;
pub mod plan;
pub mod rows;
pub mod verify;

use crate::config::RebalanceConfig;
use crate::error::CliError;
use btsg_messages::{decode, CosmosMsg, MessagesFile};
use btsg_types::{AllocationFile, ByDelegator, OperationBook, ValidatorRecord};
use btsg_utils::read_json;

/// Load `allocations.json` and convert it to micro-unit records.
pub fn load_records(config: &RebalanceConfig) -> Result<Vec<ValidatorRecord>, CliError> {
    let path = config.allocations_path();
    let file: AllocationFile = read_json(&path)?;
    let records = file.into_records(config.scale()?)?;
    tracing::info!(validators = records.len(), "loaded {}", path.display());
    Ok(records)
}

pub fn load_messages(config: &RebalanceConfig) -> Result<MessagesFile, CliError> {
    Ok(read_json(&config.messages_path())?)
}

/// Decode wire messages strictly; any undecodable message is an error.
pub fn decode_book(book: &ByDelegator<CosmosMsg>, denom: &str) -> Result<OperationBook, CliError> {
    Ok(book.try_map(|_, msg| decode(msg, denom))?)
}
