use proptest::prelude::*;

use btsg_ledger::LedgerSimulator;
use btsg_planner::plan_rebalance;
use btsg_types::{
    DelegatorStake, MicroAmount, Operation, RebalanceParams, UnitScale, ValidatorRecord,
};

/// Validators whose current amount equals the sum of their delegators' stakes.
fn validators() -> impl Strategy<Value = Vec<ValidatorRecord>> {
    let stakes = prop::collection::vec((0u8..6, 0u128..800, 0u128..8), 0..6);
    prop::collection::vec((stakes, 0u128..2_000), 1..8).prop_map(|specs| {
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
                            .with_reward(MicroAmount::new(reward * 700_000)),
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

fn staked(records: &[ValidatorRecord]) -> u128 {
    records.iter().map(|v| v.current.raw()).sum()
}

proptest! {
    /// Final stake equals initial stake plus wallet-funded delegates minus
    /// undelegations; redelegations move stake without changing the total.
    #[test]
    fn stake_is_conserved(vals in validators()) {
        let plan = plan_rebalance(&vals, &RebalanceParams::default()).unwrap();
        let (mut delegated, mut undelegated) = (0u128, 0u128);
        for op in plan.staking.items() {
            match op {
                Operation::Delegate { amount, .. } => delegated += amount.raw(),
                Operation::Undelegate { amount, .. } => undelegated += amount.raw(),
                _ => {}
            }
        }

        let mut sim = LedgerSimulator::new(&vals);
        sim.replay(&plan.withdraw);
        sim.replay(&plan.staking);
        prop_assert!(sim.warnings().is_empty());

        let (records, liquid) = sim.into_parts();
        prop_assert_eq!(staked(&records), staked(&vals) + delegated - undelegated);
        prop_assert_eq!(liquid.total(), plan.wallets_after.total());
    }

    /// Every prefix of a planned operation list replays cleanly, and validator
    /// totals stay equal to the sum of their delegations throughout.
    #[test]
    fn every_prefix_replays_cleanly(vals in validators()) {
        let plan = plan_rebalance(&vals, &RebalanceParams::default()).unwrap();
        let mut sim = LedgerSimulator::new(&vals);
        for op in plan.withdraw.items().chain(plan.staking.items()) {
            prop_assert!(sim.apply(op), "operation skipped: {}", op);
            for v in sim.ledger().validators() {
                let held: MicroAmount = v.delegators.iter().map(|d| d.amount).sum();
                prop_assert_eq!(held, v.current);
            }
        }
    }

    /// When the replay reaches every target, planning again finds nothing to do.
    #[test]
    fn matched_state_replans_to_nothing(vals in validators()) {
        let params = RebalanceParams::default();
        let plan = plan_rebalance(&vals, &params).unwrap();
        let mut sim = LedgerSimulator::new(&vals);
        sim.replay(&plan.withdraw);
        sim.replay(&plan.staking);
        let report = sim.verify(params.tolerance_btsg, UnitScale::default());
        prop_assume!(report.all_matched());

        let again = plan_rebalance(&sim.into_records(), &params).unwrap();
        prop_assert!(again.staking.is_empty());
        prop_assert!(again.withdraw.is_empty());
    }

    /// The report matches exactly when the planner left nothing unmet.
    #[test]
    fn unmet_deficits_surface_as_mismatches(vals in validators()) {
        let params = RebalanceParams::default();
        let plan = plan_rebalance(&vals, &params).unwrap();
        let mut sim = LedgerSimulator::new(&vals);
        sim.replay(&plan.withdraw);
        sim.replay(&plan.staking);
        let report = sim.verify(params.tolerance_btsg, params.scale);
        prop_assert_eq!(report.all_matched(), plan.is_complete());
    }

    /// With unlisted stake, replay still applies every operation, listed
    /// stake never exceeds the validator total, each final amount lies
    /// between the initial amount and the target, and the report matches
    /// exactly when nothing was left unmet or stranded.
    #[test]
    fn partial_snapshots_stay_within_bounds(vals in partial_validators()) {
        let params = RebalanceParams::default();
        let plan = plan_rebalance(&vals, &params).unwrap();
        let mut sim = LedgerSimulator::new(&vals);
        sim.replay(&plan.withdraw);
        sim.replay(&plan.staking);
        prop_assert!(sim.warnings().is_empty());

        for (before, after) in vals.iter().zip(sim.ledger().validators()) {
            let held: MicroAmount = after.delegators.iter().map(|d| d.amount).sum();
            prop_assert!(held <= after.current);
            prop_assert!(after.current >= before.current.min(before.target));
            prop_assert!(after.current <= before.current.max(before.target));
        }

        let report = sim.verify(params.tolerance_btsg, params.scale);
        prop_assert_eq!(report.all_matched(), plan.is_complete());
    }
}
