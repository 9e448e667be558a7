//! Greedy transportation from surplus validators to deficit validators.
//!
//! Stages, in order:
//! 1. **Redelegate**: each surplus validator (largest first) drains its
//!    delegators (largest stake first) into the deficit list. The deficit list
//!    is shared across all surplus validators: a deficit partly filled by one
//!    surplus validator is resumed by the next, never reset.
//! 2. **Undelegate**: surplus left after every deficit is full is unbonded
//!    from the same delegators, in the same order.
//! 3. **Delegate**: deficits still open are funded from liquid wallets,
//!    largest wallet first.
//!
//! Whatever is still open after stage 3 is reported as [`UnmetDeficit`]s.
//! Surplus that outruns the recorded delegator stake is reported as
//! [`StrandedSurplus`].
//! Planning never fails.
//!
//! All arithmetic is in integer micro-units. Iteration order is fully
//! determined by the input order and the stable sorts in [`partition`].

use crate::delta::{partition, DeficitValidator, StrandedSurplus, SurplusValidator, UnmetDeficit};
use btsg_types::{LiquidWallets, MicroAmount, Operation, OperationBook, ValidatorRecord};
use serde::{Deserialize, Serialize};

/// Output of [`plan_staking`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingPlan {
    /// Redelegate / undelegate / delegate operations grouped by delegator.
    pub operations: OperationBook,
    /// Deficits the available stake and wallets could not cover.
    pub unmet: Vec<UnmetDeficit>,
    /// Surplus no recorded delegator could release.
    pub stranded: Vec<StrandedSurplus>,
    /// Liquid wallets after the delegate stage.
    pub wallets_after: LiquidWallets,
}

/// Plan the staking operations that drive every validator toward its target.
///
/// `wallets` is the liquid balance each delegator will hold once its reward
/// withdrawals have executed; it is not modified.
pub fn plan_staking(validators: &[ValidatorRecord], wallets: &LiquidWallets) -> StakingPlan {
    let (surplus, mut deficits) = partition(validators);
    let mut operations = OperationBook::new();

    tracing::debug!(
        surplus_validators = surplus.len(),
        deficit_validators = deficits.len(),
        "partitioned validators"
    );

    let stranded: Vec<StrandedSurplus> = surplus
        .into_iter()
        .filter_map(|sv| drain_surplus(sv, &mut deficits, &mut operations))
        .collect();

    let mut wallets_after = wallets.clone();
    fill_from_wallets(&mut deficits, &mut wallets_after, &mut operations);

    let unmet: Vec<UnmetDeficit> = deficits
        .iter()
        .filter(|d| d.need > 0)
        .map(|d| UnmetDeficit {
            validator: d.address.clone(),
            shortfall: MicroAmount::new(d.need),
        })
        .collect();

    for u in &unmet {
        tracing::warn!(
            validator = %u.validator,
            shortfall = %u.shortfall,
            "deficit left unmet: not enough surplus or liquid rewards"
        );
    }
    tracing::info!(
        operations = operations.item_count(),
        delegators = operations.len(),
        unmet = unmet.len(),
        stranded = stranded.len(),
        "staking plan complete"
    );

    StakingPlan {
        operations,
        unmet,
        stranded,
        wallets_after,
    }
}

/// Redelegate one surplus validator into the shared deficit list, then
/// undelegate whatever surplus the deficits could not absorb.
///
/// Returns the surplus left once every recorded delegator is empty.
fn drain_surplus(
    mut sv: SurplusValidator<'_>,
    deficits: &mut [DeficitValidator<'_>],
    operations: &mut OperationBook,
) -> Option<StrandedSurplus> {
    let mut remaining = sv.surplus;
    sv.delegators.sort_by(|a, b| b.1.cmp(&a.1));

    for (delegator, balance) in sv.delegators.iter_mut() {
        if remaining == 0 {
            break;
        }
        for deficit in deficits.iter_mut() {
            if *balance == 0 {
                break;
            }
            if deficit.need == 0 {
                continue;
            }
            let amount = (*balance).min(deficit.need).min(remaining);
            if amount > 0 {
                remaining -= amount;
                *balance -= amount;
                deficit.need -= amount;

                let op = Operation::Redelegate {
                    delegator: (*delegator).clone(),
                    src_validator: sv.address.clone(),
                    dst_validator: deficit.address.clone(),
                    amount: MicroAmount::new(amount),
                };
                tracing::debug!("planned {op}");
                operations.push(*delegator, op);
            }
            if remaining == 0 {
                break;
            }
        }
    }

    if remaining == 0 {
        return None;
    }

    for (delegator, balance) in sv.delegators.iter_mut() {
        if remaining == 0 {
            break;
        }
        if *balance == 0 {
            continue;
        }
        let amount = (*balance).min(remaining);
        remaining -= amount;
        *balance -= amount;

        let op = Operation::Undelegate {
            delegator: (*delegator).clone(),
            validator: sv.address.clone(),
            amount: MicroAmount::new(amount),
        };
        tracing::debug!("planned {op}");
        operations.push(*delegator, op);
    }

    if remaining == 0 {
        return None;
    }
    tracing::warn!(
        validator = %sv.address,
        left = remaining,
        "surplus exceeds recorded delegator stake"
    );
    Some(StrandedSurplus {
        validator: sv.address.clone(),
        excess: MicroAmount::new(remaining),
    })
}

/// Fund open deficits (largest first) from liquid wallets (largest first).
fn fill_from_wallets(
    deficits: &mut [DeficitValidator<'_>],
    wallets: &mut LiquidWallets,
    operations: &mut OperationBook,
) {
    let mut open: Vec<&mut DeficitValidator<'_>> =
        deficits.iter_mut().filter(|d| d.need > 0).collect();
    open.sort_by(|a, b| b.need.cmp(&a.need));

    for deficit in open {
        for (delegator, _) in wallets.funded_by_balance_desc() {
            if deficit.need == 0 {
                break;
            }
            let balance = wallets.balance(&delegator).raw();
            if balance == 0 {
                continue;
            }
            let amount = MicroAmount::new(balance.min(deficit.need));
            if wallets.debit(&delegator, amount).is_err() {
                continue;
            }
            deficit.need -= amount.raw();

            let op = Operation::Delegate {
                delegator: delegator.clone(),
                validator: deficit.address.clone(),
                amount,
            };
            tracing::debug!("planned {op}");
            operations.push(&delegator, op);
        }
    }
}
