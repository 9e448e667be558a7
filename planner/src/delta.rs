//! Per-validator deltas and the surplus / deficit split.

use btsg_types::{DelegatorAddress, MicroAmount, ValidatorAddress, ValidatorRecord};

/// A validator holding more than its target.
#[derive(Clone, Debug)]
pub(crate) struct SurplusValidator<'a> {
    pub address: &'a ValidatorAddress,
    /// `current - target`, always positive.
    pub surplus: u128,
    /// Delegator balances at this validator, in input order until sorted.
    pub delegators: Vec<(&'a DelegatorAddress, u128)>,
}

/// A validator holding less than its target. `need` shrinks as it is filled.
#[derive(Clone, Debug)]
pub(crate) struct DeficitValidator<'a> {
    pub address: &'a ValidatorAddress,
    pub need: u128,
}

/// A deficit still open once every surplus and wallet has been spent.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UnmetDeficit {
    pub validator: ValidatorAddress,
    pub shortfall: MicroAmount,
}

/// Surplus still held by a validator after every recorded delegator has been
/// drained. Happens when the snapshot lists only part of a validator's stake.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StrandedSurplus {
    pub validator: ValidatorAddress,
    pub excess: MicroAmount,
}

/// Split validators by delta, dropping those already on target.
///
/// Surplus validators come back largest surplus first and deficit validators
/// largest need first. Both sorts are stable, so equal deltas keep input order.
pub(crate) fn partition(
    validators: &[ValidatorRecord],
) -> (Vec<SurplusValidator<'_>>, Vec<DeficitValidator<'_>>) {
    let mut surplus = Vec::new();
    let mut deficits = Vec::new();

    for v in validators {
        let delta = v.delta();
        if delta < 0 {
            surplus.push(SurplusValidator {
                address: &v.address,
                surplus: delta.unsigned_abs(),
                delegators: v
                    .delegators
                    .iter()
                    .map(|d| (&d.address, d.amount.raw()))
                    .collect(),
            });
        } else if delta > 0 {
            deficits.push(DeficitValidator {
                address: &v.address,
                need: delta.unsigned_abs(),
            });
        }
    }

    surplus.sort_by(|a, b| b.surplus.cmp(&a.surplus));
    deficits.sort_by(|a, b| b.need.cmp(&a.need));
    (surplus, deficits)
}
