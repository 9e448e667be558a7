use crate::config::RebalanceConfig;
use crate::error::CliError;
use btsg_messages::{build_exec_array, MsgExec};
use btsg_types::ByDelegator;
use btsg_utils::write_json;
use std::path::PathBuf;

/// Write `tx-1.json` (withdraw) and `tx-2.json` (staking) exec arrays.
///
/// With `separate`, also write one exec per delegator as
/// `withdraw-<delegator>.json` and `staking-<delegator>.json`.
pub fn run(config: &RebalanceConfig, separate: bool) -> Result<Vec<PathBuf>, CliError> {
    let messages = super::load_messages(config)?;
    let grantee = config.grantee.as_deref();
    let withdraw = build_exec_array(&messages.withdraw, grantee);
    let staking = build_exec_array(&messages.staking, grantee);

    let mut written = Vec::new();
    for (name, execs) in [("tx-1.json", &withdraw), ("tx-2.json", &staking)] {
        let path = config.data_path(name);
        write_json(&path, execs)?;
        tracing::info!(execs = execs.len(), "authz exec written to {}", path.display());
        written.push(path);
    }

    if separate {
        written.extend(write_each(config, "withdraw", &withdraw, &messages.withdraw)?);
        written.extend(write_each(config, "staking", &staking, &messages.staking)?);
    }
    Ok(written)
}

fn write_each<T>(
    config: &RebalanceConfig,
    prefix: &str,
    execs: &[MsgExec],
    groups: &ByDelegator<T>,
) -> Result<Vec<PathBuf>, CliError> {
    let mut written = Vec::new();
    for (exec, delegator) in execs.iter().zip(groups.delegators()) {
        let path = config.data_path(&format!("{prefix}-{delegator}.json"));
        write_json(&path, exec)?;
        tracing::debug!("authz exec written to {}", path.display());
        written.push(path);
    }
    Ok(written)
}
