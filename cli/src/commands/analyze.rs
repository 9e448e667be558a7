use crate::config::RebalanceConfig;
use crate::error::CliError;
use btsg_messages::allocation_rows;
use btsg_types::AllocationSummary;
use btsg_utils::write_json;

pub const SUMMARY_FILE: &str = "allocations_summary.json";

/// Log allocation totals and write one summary row per validator.
pub fn run(config: &RebalanceConfig) -> Result<AllocationSummary, CliError> {
    let records = super::load_records(config)?;
    let scale = config.scale()?;
    let summary = AllocationSummary::from_records(&records)?;

    tracing::info!(
        sum_current = scale.to_display(summary.current),
        sum_rewards = scale.to_display(summary.rewards),
        sum_target = scale.to_display(summary.target),
        "allocation totals"
    );

    let path = config.data_path(SUMMARY_FILE);
    write_json(&path, &allocation_rows(&records, scale))?;
    tracing::info!("summary written to {}", path.display());
    Ok(summary)
}
