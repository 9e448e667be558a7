//! In-memory staking ledger: validator totals, per-validator delegations and
//! liquid balances.
//!
//! Every transition checks its preconditions before touching state, so a
//! rejected operation leaves the ledger exactly as it was.

use crate::error::ReplayWarning;
use btsg_types::{
    DelegatorAddress, DelegatorStake, LiquidWallets, MicroAmount, Operation, ValidatorAddress,
    ValidatorRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct StakingLedger {
    validators: Vec<ValidatorRecord>,
    index: HashMap<ValidatorAddress, usize>,
    liquid: LiquidWallets,
}

/// Summary statistics for the ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub validators: usize,
    pub delegations: usize,
    pub staked: MicroAmount,
    pub unclaimed_rewards: MicroAmount,
    pub liquid: MicroAmount,
}

impl StakingLedger {
    /// A ledger holding its own copy of `records`, with empty wallets.
    pub fn from_records(records: &[ValidatorRecord]) -> Self {
        let validators = records.to_vec();
        let index = validators
            .iter()
            .enumerate()
            .map(|(i, v)| (v.address.clone(), i))
            .collect();
        Self {
            validators,
            index,
            liquid: LiquidWallets::new(),
        }
    }

    pub fn validator(&self, address: &ValidatorAddress) -> Option<&ValidatorRecord> {
        self.index.get(address).map(|&i| &self.validators[i])
    }

    pub fn validators(&self) -> &[ValidatorRecord] {
        &self.validators
    }

    pub fn liquid(&self) -> &LiquidWallets {
        &self.liquid
    }

    pub fn into_parts(self) -> (Vec<ValidatorRecord>, LiquidWallets) {
        (self.validators, self.liquid)
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            validators: self.validators.len(),
            delegations: self.validators.iter().map(|v| v.delegators.len()).sum(),
            staked: self.validators.iter().map(|v| v.current).sum(),
            unclaimed_rewards: self.validators.iter().map(|v| v.total_rewards()).sum(),
            liquid: self.liquid.total(),
        }
    }

    /// Apply one operation, or explain why it cannot be applied.
    pub fn apply(&mut self, op: &Operation) -> Result<(), ReplayWarning> {
        match op {
            Operation::Withdraw {
                delegator,
                validator,
            } => self.withdraw(delegator, validator),
            Operation::Redelegate {
                delegator,
                src_validator,
                dst_validator,
                amount,
            } => self.redelegate(delegator, src_validator, dst_validator, *amount),
            Operation::Undelegate {
                delegator,
                validator,
                amount,
            } => self.undelegate(delegator, validator, *amount),
            Operation::Delegate {
                delegator,
                validator,
                amount,
            } => self.delegate(delegator, validator, *amount),
        }
    }

    fn position(&self, validator: &ValidatorAddress) -> Result<usize, ReplayWarning> {
        self.index
            .get(validator)
            .copied()
            .ok_or_else(|| ReplayWarning::UnknownValidator {
                validator: validator.clone(),
            })
    }

    fn stake_position(
        &self,
        at: usize,
        delegator: &DelegatorAddress,
    ) -> Result<usize, ReplayWarning> {
        let v = &self.validators[at];
        v.delegators
            .iter()
            .position(|d| &d.address == delegator)
            .ok_or_else(|| ReplayWarning::UnknownDelegator {
                delegator: delegator.clone(),
                validator: v.address.clone(),
            })
    }

    /// Locate `delegator`'s stake at `validator` and check both it and the
    /// validator total cover `amount`.
    fn checked_stake(
        &self,
        delegator: &DelegatorAddress,
        validator: &ValidatorAddress,
        amount: MicroAmount,
    ) -> Result<(usize, usize), ReplayWarning> {
        let at = self.position(validator)?;
        let slot = self.stake_position(at, delegator)?;
        let available = self.validators[at].delegators[slot].amount;
        if available < amount {
            return Err(ReplayWarning::InsufficientStake {
                delegator: delegator.clone(),
                validator: validator.clone(),
                available,
                requested: amount,
            });
        }
        let total = self.validators[at].current;
        if total < amount {
            return Err(ReplayWarning::InsufficientValidatorTotal {
                validator: validator.clone(),
                available: total,
                requested: amount,
            });
        }
        Ok((at, slot))
    }

    /// Check that `amount` can be added to `delegator`'s stake at `at`
    /// without overflowing either the stake or the validator total.
    fn check_room(
        &self,
        at: usize,
        delegator: &DelegatorAddress,
        amount: MicroAmount,
    ) -> Result<(), ReplayWarning> {
        let v = &self.validators[at];
        let held = v.stake_of(delegator);
        if v.current.checked_add(amount).is_none() || held.checked_add(amount).is_none() {
            return Err(ReplayWarning::StakeOverflow {
                delegator: delegator.clone(),
                validator: v.address.clone(),
                amount,
            });
        }
        Ok(())
    }

    fn take_stake(&mut self, at: usize, slot: usize, amount: MicroAmount) {
        let v = &mut self.validators[at];
        v.delegators[slot].amount = v.delegators[slot].amount - amount;
        v.current = v.current - amount;
    }

    /// Add stake, opening a delegation entry only for a positive amount.
    /// Callers check [`Self::check_room`] first.
    fn add_stake(&mut self, at: usize, delegator: &DelegatorAddress, amount: MicroAmount) {
        let v = &mut self.validators[at];
        v.current = v.current + amount;
        match v.delegators.iter_mut().find(|d| &d.address == delegator) {
            Some(stake) => stake.amount = stake.amount + amount,
            None if !amount.is_zero() => v
                .delegators
                .push(DelegatorStake::new(delegator.clone(), amount)),
            None => {}
        }
    }

    fn withdraw(
        &mut self,
        delegator: &DelegatorAddress,
        validator: &ValidatorAddress,
    ) -> Result<(), ReplayWarning> {
        let at = self.position(validator)?;
        let slot = self.stake_position(at, delegator)?;
        let stake = &mut self.validators[at].delegators[slot];
        let reward = std::mem::take(&mut stake.reward);
        self.liquid.credit(delegator, reward);
        Ok(())
    }

    fn redelegate(
        &mut self,
        delegator: &DelegatorAddress,
        src: &ValidatorAddress,
        dst: &ValidatorAddress,
        amount: MicroAmount,
    ) -> Result<(), ReplayWarning> {
        let dst_at = self.position(dst)?;
        let (src_at, slot) = self.checked_stake(delegator, src, amount)?;
        if src_at != dst_at {
            self.check_room(dst_at, delegator, amount)?;
        }
        self.take_stake(src_at, slot, amount);
        self.add_stake(dst_at, delegator, amount);
        Ok(())
    }

    fn undelegate(
        &mut self,
        delegator: &DelegatorAddress,
        validator: &ValidatorAddress,
        amount: MicroAmount,
    ) -> Result<(), ReplayWarning> {
        let (at, slot) = self.checked_stake(delegator, validator, amount)?;
        self.take_stake(at, slot, amount);
        Ok(())
    }

    fn delegate(
        &mut self,
        delegator: &DelegatorAddress,
        validator: &ValidatorAddress,
        amount: MicroAmount,
    ) -> Result<(), ReplayWarning> {
        let at = self.position(validator)?;
        self.check_room(at, delegator, amount)?;
        self.liquid
            .debit(delegator, amount)
            .map_err(|available| ReplayWarning::InsufficientLiquid {
                delegator: delegator.clone(),
                available,
                requested: amount,
            })?;
        self.add_stake(at, delegator, amount);
        Ok(())
    }
}
