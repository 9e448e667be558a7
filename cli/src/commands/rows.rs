use crate::config::RebalanceConfig;
use crate::error::CliError;
use btsg_messages::{operation_rows, OperationRow};
use btsg_utils::write_json;

pub const ROWS_FILE: &str = "operation_rows.json";

/// Flatten withdraw then staking operations into spreadsheet rows.
pub fn run(config: &RebalanceConfig) -> Result<Vec<OperationRow>, CliError> {
    let messages = super::load_messages(config)?;
    let mut rows = operation_rows(&super::decode_book(&messages.withdraw, &config.denom)?);
    rows.extend(operation_rows(&super::decode_book(
        &messages.staking,
        &config.denom,
    )?));

    let path = config.data_path(ROWS_FILE);
    write_json(&path, &rows)?;
    tracing::info!(rows = rows.len(), "rows written to {}", path.display());
    Ok(rows)
}
