use crate::config::RebalanceConfig;
use crate::error::CliError;
use btsg_messages::build_grants;
use btsg_types::Timestamp;
use btsg_utils::write_json;
use std::path::PathBuf;

/// Write `grant-<delegator>.json` for every delegator with a withdrawal.
pub fn run(
    config: &RebalanceConfig,
    grantee: &str,
    issued_at: Timestamp,
) -> Result<Vec<PathBuf>, CliError> {
    let messages = super::load_messages(config)?;

    let mut written = Vec::new();
    for delegator in messages.withdraw.delegators() {
        let grants = build_grants(delegator, grantee, issued_at)?;
        let path = config.data_path(&format!("grant-{delegator}.json"));
        write_json(&path, &grants)?;
        tracing::info!(%delegator, grantee, "grant written to {}", path.display());
        written.push(path);
    }
    Ok(written)
}
