//! Reward selection: decide which accrued rewards are worth withdrawing.
//!
//! Every (validator, delegator) pair whose reward meets the threshold gets one
//! `Withdraw` operation, and the reward is credited to the delegator's liquid
//! wallet so the planner can re-stake it. Rewards below the threshold stay
//! unclaimed and are invisible to planning.

use btsg_types::{LiquidWallets, MicroAmount, Operation, OperationBook, ValidatorRecord};
use serde::{Deserialize, Serialize};

/// Output of [`select_rewards`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSelection {
    /// Withdraw operations grouped by delegator, in scan order.
    pub withdrawals: OperationBook,
    /// Liquid balance each delegator will hold once the withdrawals execute.
    pub wallets: LiquidWallets,
}

impl RewardSelection {
    /// Sum of all withdrawn rewards.
    pub fn total_withdrawn(&self) -> MicroAmount {
        self.wallets.total()
    }
}

/// Scan validators in order, delegators in order, and select rewards `>= threshold`.
pub fn select_rewards(validators: &[ValidatorRecord], threshold: MicroAmount) -> RewardSelection {
    let mut selection = RewardSelection::default();

    for validator in validators {
        for stake in &validator.delegators {
            if stake.reward.is_zero() || stake.reward < threshold {
                continue;
            }
            tracing::debug!(
                delegator = %stake.address,
                validator = %validator.address,
                reward = %stake.reward,
                "selecting reward for withdrawal"
            );
            selection.withdrawals.push(
                &stake.address,
                Operation::Withdraw {
                    delegator: stake.address.clone(),
                    validator: validator.address.clone(),
                },
            );
            selection.wallets.credit(&stake.address, stake.reward);
        }
    }

    tracing::info!(
        withdrawals = selection.withdrawals.item_count(),
        delegators = selection.withdrawals.len(),
        total = %selection.total_withdrawn(),
        "reward selection complete"
    );
    selection
}
