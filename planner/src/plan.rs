//! The full rebalance plan: reward withdrawals followed by staking moves.

use crate::delta::{StrandedSurplus, UnmetDeficit};
use crate::planner::plan_staking;
use btsg_rewards::select_rewards;
use btsg_types::{
    AllocationSummary, LiquidWallets, OperationBook, RebalanceParams, TypesError, ValidatorRecord,
};
use serde::{Deserialize, Serialize};

/// Everything a rebalance run hands to downstream serializers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalancePlan {
    /// Reward withdrawals; must execute before `staking`.
    pub withdraw: OperationBook,
    /// Redelegate / undelegate / delegate operations.
    pub staking: OperationBook,
    /// Deficits left open. Empty when the plan reaches every target.
    pub unmet: Vec<UnmetDeficit>,
    /// Surplus the recorded delegators could not release.
    pub stranded: Vec<StrandedSurplus>,
    /// Liquid rewards left over after the delegate stage.
    pub wallets_after: LiquidWallets,
}

impl RebalancePlan {
    /// Whether the plan, once executed, reaches every target.
    pub fn is_complete(&self) -> bool {
        self.unmet.is_empty() && self.stranded.is_empty()
    }

    pub fn operation_count(&self) -> usize {
        self.withdraw.item_count() + self.staking.item_count()
    }
}

/// Select rewards, then plan staking moves against the resulting wallets.
///
/// Only an invalid reward threshold or overflowing input totals can fail; an unreachable target is
/// reported through [`RebalancePlan::unmet`] instead.
pub fn plan_rebalance(
    validators: &[ValidatorRecord],
    params: &RebalanceParams,
) -> Result<RebalancePlan, TypesError> {
    let threshold = params.reward_threshold()?;

    let summary = AllocationSummary::from_records(validators)?;
    tracing::info!(
        validators = validators.len(),
        sum_current = params.scale.to_display(summary.current),
        sum_rewards = params.scale.to_display(summary.rewards),
        sum_target = params.scale.to_display(summary.target),
        "planning rebalance"
    );

    let selection = select_rewards(validators, threshold);
    let staking = plan_staking(validators, &selection.wallets);

    Ok(RebalancePlan {
        withdraw: selection.withdrawals,
        staking: staking.operations,
        unmet: staking.unmet,
        stranded: staking.stranded,
        wallets_after: staking.wallets_after,
    })
}
