use crate::config::RebalanceConfig;
use crate::error::CliError;
use btsg_messages::build_actions;
use btsg_utils::write_json;
use std::path::PathBuf;

/// Write `daodao-tx-1.json` (withdraw) and `daodao-tx-2.json` (staking).
pub fn run(config: &RebalanceConfig) -> Result<Vec<PathBuf>, CliError> {
    let messages = super::load_messages(config)?;
    let books = [
        ("daodao-tx-1.json", super::decode_book(&messages.withdraw, &config.denom)?),
        ("daodao-tx-2.json", super::decode_book(&messages.staking, &config.denom)?),
    ];

    let mut written = Vec::new();
    for (name, book) in &books {
        let tx = build_actions(book, &config.chain_id, config.decimals);
        let path = config.data_path(name);
        write_json(&path, &tx)?;
        tracing::info!(
            actions = tx.actions.len(),
            chain_id = %config.chain_id,
            "DAO DAO transaction written to {}",
            path.display()
        );
        written.push(path);
    }
    Ok(written)
}
