use crate::config::RebalanceConfig;
use crate::error::CliError;
use btsg_ledger::{LedgerSimulator, VerificationReport};
use btsg_types::UnitScale;

/// Replay `messages.json` against `allocations.json` and check every target.
pub fn run(config: &RebalanceConfig) -> Result<VerificationReport, CliError> {
    let records = super::load_records(config)?;
    let messages = super::load_messages(config)?;

    let mut sim = LedgerSimulator::new(&records);
    sim.replay_messages(&messages.withdraw, &config.denom);
    sim.replay_messages(&messages.staking, &config.denom);
    let report = sim.verify(config.tolerance_btsg, config.scale()?);

    tracing::info!(
        applied = report.applied,
        skipped = report.skipped,
        matched = report.all_matched(),
        "verification complete"
    );
    Ok(report)
}

/// Render the OK/mismatch table followed by remaining liquid balances.
pub fn render(report: &VerificationReport, scale: UnitScale) -> String {
    let mut out = String::new();
    for check in &report.validators {
        out.push_str(&check.to_string());
        out.push('\n');
    }
    let funded: Vec<_> = report.liquid.iter().filter(|(_, b)| !b.is_zero()).collect();
    if !funded.is_empty() {
        out.push_str("\nliquid balances:\n");
        for (delegator, balance) in funded {
            out.push_str(&format!("  {delegator}: {:.6} BTSG\n", scale.to_display(balance)));
        }
    }
    out.push_str(&format!(
        "\n{} applied, {} skipped, result: {}\n",
        report.applied,
        report.skipped,
        if report.all_matched() { "OK" } else { "MISMATCH" }
    ));
    out
}

/// Turn a failed verification into an error for the process exit code.
pub fn ensure_matched(report: &VerificationReport) -> Result<(), CliError> {
    let mismatched = report.mismatched().count();
    if mismatched > 0 {
        return Err(CliError::Mismatch {
            mismatched,
            total: report.validators.len(),
        });
    }
    Ok(())
}
