//! Replay of withdraw and staking books against a fresh ledger.

use crate::error::ReplayWarning;
use crate::ledger::{LedgerSummary, StakingLedger};
use crate::report::{ValidatorCheck, VerificationReport};
use btsg_messages::{decode, CosmosMsg};
use btsg_types::{
    ByDelegator, LiquidWallets, Operation, OperationBook, UnitScale, ValidatorRecord,
};

/// Replays operations one at a time, skipping any whose preconditions fail.
///
/// Books are applied in the order they are passed in: callers replay the
/// withdraw book before the staking book so that delegates find their funds.
#[derive(Clone, Debug)]
pub struct LedgerSimulator {
    ledger: StakingLedger,
    warnings: Vec<ReplayWarning>,
    applied: usize,
}

impl LedgerSimulator {
    pub fn new(records: &[ValidatorRecord]) -> Self {
        Self {
            ledger: StakingLedger::from_records(records),
            warnings: Vec::new(),
            applied: 0,
        }
    }

    pub fn ledger(&self) -> &StakingLedger {
        &self.ledger
    }

    pub fn warnings(&self) -> &[ReplayWarning] {
        &self.warnings
    }

    pub fn summary(&self) -> LedgerSummary {
        self.ledger.summary()
    }

    /// Apply a single operation, recording a warning if it is skipped.
    pub fn apply(&mut self, op: &Operation) -> bool {
        match self.ledger.apply(op) {
            Ok(()) => {
                tracing::debug!(
                    kind = %op.kind(),
                    delegator = %op.delegator(),
                    validator = %op.validator(),
                    "applied operation"
                );
                self.applied += 1;
                true
            }
            Err(warning) => {
                self.skip(warning);
                false
            }
        }
    }

    fn skip(&mut self, warning: ReplayWarning) {
        tracing::warn!(%warning, "skipping operation");
        self.warnings.push(warning);
    }

    /// Delegator groups in book order, operations in group order.
    pub fn replay(&mut self, book: &OperationBook) {
        for op in book.items() {
            self.apply(op);
        }
    }

    /// Decode and replay wire messages. Messages that do not decode under
    /// `denom` are skipped with a warning.
    pub fn replay_messages(&mut self, book: &ByDelegator<CosmosMsg>, denom: &str) {
        for (delegator, msgs) in book.iter() {
            for msg in msgs {
                match decode(msg, denom) {
                    Ok(op) => {
                        self.apply(&op);
                    }
                    Err(e) => self.skip(ReplayWarning::Undecodable {
                        delegator: delegator.clone(),
                        type_url: msg.type_url.clone(),
                        reason: e.to_string(),
                    }),
                }
            }
        }
    }

    /// Compare every validator's final amount with its target.
    pub fn verify(&self, tolerance_btsg: f64, scale: UnitScale) -> VerificationReport {
        let validators = self
            .ledger
            .validators()
            .iter()
            .map(|v| {
                let delta_btsg = scale.signed_to_display(v.current.signed_diff(v.target));
                let check = ValidatorCheck {
                    address: v.address.clone(),
                    name: v.name.clone(),
                    final_amount: v.current,
                    target: v.target,
                    delta_btsg,
                    matched: delta_btsg.abs() <= tolerance_btsg,
                };
                if check.matched {
                    tracing::info!(validator = %v.address, name = %v.name, "OK");
                } else {
                    tracing::warn!(
                        validator = %v.address,
                        name = %v.name,
                        final_btsg = scale.to_display(v.current),
                        target_btsg = scale.to_display(v.target),
                        delta_btsg,
                        "mismatch"
                    );
                }
                check
            })
            .collect();

        VerificationReport {
            validators,
            liquid: self.ledger.liquid().clone(),
            warnings: self.warnings.clone(),
            applied: self.applied,
            skipped: self.warnings.len(),
        }
    }

    /// Final state, ready to be planned again.
    pub fn into_records(self) -> Vec<ValidatorRecord> {
        self.ledger.into_parts().0
    }

    pub fn into_parts(self) -> (Vec<ValidatorRecord>, LiquidWallets) {
        self.ledger.into_parts()
    }
}
