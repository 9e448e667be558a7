use crate::config::RebalanceConfig;
use crate::error::CliError;
use btsg_messages::MessagesFile;
use btsg_planner::{plan_rebalance, RebalancePlan};
use btsg_utils::write_json;

/// Plan a rebalance from `allocations.json` and write `messages.json`.
pub fn run(config: &RebalanceConfig) -> Result<RebalancePlan, CliError> {
    let records = super::load_records(config)?;
    let params = config.params()?;
    let plan = plan_rebalance(&records, &params)?;

    let messages = MessagesFile::encode(&plan.withdraw, &plan.staking, &config.denom)?;
    let path = config.messages_path();
    write_json(&path, &messages)?;
    tracing::info!(
        withdrawals = plan.withdraw.item_count(),
        staking = plan.staking.item_count(),
        delegators = messages.staking.len(),
        complete = plan.is_complete(),
        "messages written to {}",
        path.display()
    );
    Ok(plan)
}
