use proptest::prelude::*;
use std::collections::HashMap;

use btsg_planner::{plan_rebalance, plan_staking};
use btsg_rewards::select_rewards;
use btsg_types::{
    DelegatorStake, LiquidWallets, MicroAmount, Operation, RebalanceParams, ValidatorRecord,
};

/// Validators whose current amount equals the sum of their delegators' stakes.
fn validators() -> impl Strategy<Value = Vec<ValidatorRecord>> {
    let stakes = prop::collection::vec((0u8..5, 0u128..500, 0u128..5), 0..5);
    prop::collection::vec((stakes, 0u128..1_500), 1..7).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (stakes, target))| {
                let mut v = ValidatorRecord::new(
                    format!("val{i}"),
                    format!("Validator {i}"),
                    MicroAmount::ZERO,
                    MicroAmount::new(target * 1_000),
                );
                for (d, amount, reward) in stakes {
                    let addr = format!("d{d}");
                    if v.delegators.iter().any(|s| s.address.as_str() == addr) {
                        continue;
                    }
                    let amount = MicroAmount::new(amount * 1_000);
                    v.current = v.current + amount;
                    v.delegators.push(
                        DelegatorStake::new(addr, amount)
                            .with_reward(MicroAmount::new(reward * 1_000_000)),
                    );
                }
                v
            })
            .collect()
    })
}

/// Snapshots that list only part of each validator's stake: `current` is at
/// least the sum of the listed delegators.
fn partial_validators() -> impl Strategy<Value = Vec<ValidatorRecord>> {
    (validators(), prop::collection::vec(0u128..600, 8)).prop_map(|(mut vals, extra)| {
        for (v, unlisted) in vals.iter_mut().zip(extra) {
            v.current = v.current + MicroAmount::new(unlisted * 1_000);
        }
        vals
    })
}

proptest! {
    /// Same input, same plan, same serialized bytes.
    #[test]
    fn planning_is_deterministic(vals in validators()) {
        let params = RebalanceParams::default();
        let a = plan_rebalance(&vals, &params).unwrap();
        let b = plan_rebalance(&vals, &params).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(
            serde_json::to_string(&a.staking).unwrap(),
            serde_json::to_string(&b.staking).unwrap()
        );
    }

    /// Every amount is positive, no source validator gives more than its
    /// surplus, no destination receives more than its deficit, and no
    /// delegator moves more than it holds.
    #[test]
    fn moves_are_bounded(vals in validators()) {
        let selection = select_rewards(&vals, MicroAmount::new(1_000_000));
        let plan = plan_staking(&vals, &selection.wallets);

        let by_addr: HashMap<&str, &ValidatorRecord> =
            vals.iter().map(|v| (v.address.as_str(), v)).collect();
        let mut out_of: HashMap<String, u128> = HashMap::new();
        let mut into: HashMap<String, u128> = HashMap::new();
        let mut moved_by: HashMap<(String, String), u128> = HashMap::new();
        let mut delegated_by: HashMap<String, u128> = HashMap::new();

        for op in plan.operations.items() {
            let amount = op.amount().unwrap().raw();
            prop_assert!(amount > 0);
            match op {
                Operation::Redelegate { delegator, src_validator, dst_validator, .. } => {
                    *out_of.entry(src_validator.to_string()).or_default() += amount;
                    *into.entry(dst_validator.to_string()).or_default() += amount;
                    *moved_by
                        .entry((delegator.to_string(), src_validator.to_string()))
                        .or_default() += amount;
                }
                Operation::Undelegate { delegator, validator, .. } => {
                    *out_of.entry(validator.to_string()).or_default() += amount;
                    *moved_by
                        .entry((delegator.to_string(), validator.to_string()))
                        .or_default() += amount;
                }
                Operation::Delegate { delegator, validator, .. } => {
                    *into.entry(validator.to_string()).or_default() += amount;
                    *delegated_by.entry(delegator.to_string()).or_default() += amount;
                }
                Operation::Withdraw { .. } => prop_assert!(false, "withdraw in staking plan"),
            }
        }

        for (src, total) in &out_of {
            let v = by_addr[src.as_str()];
            prop_assert!(v.delta() < 0);
            prop_assert!(*total <= v.delta().unsigned_abs());
        }
        for (dst, total) in &into {
            let v = by_addr[dst.as_str()];
            prop_assert!(v.delta() > 0);
            prop_assert!(*total <= v.delta().unsigned_abs());
        }
        for ((delegator, src), total) in &moved_by {
            let held = by_addr[src.as_str()].stake_of(&delegator.as_str().into()).raw();
            prop_assert!(*total <= held);
        }
        for (delegator, total) in &delegated_by {
            prop_assert!(*total <= selection.wallets.balance(&delegator.as_str().into()).raw());
        }
    }

    /// Unmet shortfalls plus what was moved in add up to each deficit.
    #[test]
    fn unmet_accounts_for_the_gap(vals in validators()) {
        let plan = plan_staking(&vals, &LiquidWallets::new());
        for v in vals.iter().filter(|v| v.delta() > 0) {
            let received: u128 = plan
                .operations
                .items()
                .filter(|op| op.dst_validator() == Some(&v.address))
                .map(|op| op.amount().unwrap().raw())
                .sum();
            let shortfall = plan
                .unmet
                .iter()
                .find(|u| u.validator == v.address)
                .map(|u| u.shortfall.raw())
                .unwrap_or(0);
            prop_assert_eq!(received + shortfall, v.delta().unsigned_abs());
        }
    }

    /// Planning against the targets themselves produces nothing.
    #[test]
    fn on_target_input_plans_nothing(vals in validators()) {
        let balanced: Vec<ValidatorRecord> = vals
            .into_iter()
            .map(|mut v| {
                v.target = v.current;
                v
            })
            .collect();
        let plan = plan_staking(&balanced, &LiquidWallets::new());
        prop_assert!(plan.operations.is_empty());
        prop_assert!(plan.unmet.is_empty());
    }

    /// Every surplus is either moved out or reported as stranded, and a
    /// partial snapshot never moves more than its listed delegators hold.
    #[test]
    fn stranded_accounts_for_the_surplus(vals in partial_validators()) {
        let plan = plan_staking(&vals, &LiquidWallets::new());
        for v in vals.iter().filter(|v| v.delta() < 0) {
            let moved: u128 = plan
                .operations
                .items()
                .filter(|op| op.validator() == &v.address)
                .map(|op| op.amount().unwrap().raw())
                .sum();
            let listed: u128 = v.delegators.iter().map(|d| d.amount.raw()).sum();
            let stranded = plan
                .stranded
                .iter()
                .find(|s| s.validator == v.address)
                .map(|s| s.excess.raw())
                .unwrap_or(0);
            prop_assert!(moved <= listed);
            prop_assert_eq!(moved + stranded, v.delta().unsigned_abs());
        }
        for s in &plan.stranded {
            prop_assert!(s.excess.raw() > 0);
        }
    }
}
