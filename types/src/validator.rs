//! Validator and delegator records, in micro-units.

use crate::address::{DelegatorAddress, ValidatorAddress};
use crate::amount::MicroAmount;
use crate::error::TypesError;
use serde::{Deserialize, Serialize};

/// One delegator's position at a single validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatorStake {
    pub address: DelegatorAddress,
    /// Amount staked at this validator.
    pub amount: MicroAmount,
    /// Accrued claimable reward at this validator.
    #[serde(default)]
    pub reward: MicroAmount,
}

impl DelegatorStake {
    pub fn new(address: impl Into<DelegatorAddress>, amount: MicroAmount) -> Self {
        Self {
            address: address.into(),
            amount,
            reward: MicroAmount::ZERO,
        }
    }

    pub fn with_reward(mut self, reward: MicroAmount) -> Self {
        self.reward = reward;
        self
    }
}

/// A validator's current and target delegation, with its delegators in input order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorRecord {
    pub address: ValidatorAddress,
    pub name: String,
    pub current: MicroAmount,
    pub target: MicroAmount,
    pub delegators: Vec<DelegatorStake>,
}

impl ValidatorRecord {
    pub fn new(
        address: impl Into<ValidatorAddress>,
        name: impl Into<String>,
        current: MicroAmount,
        target: MicroAmount,
    ) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
            current,
            target,
            delegators: Vec::new(),
        }
    }

    pub fn with_delegator(mut self, stake: DelegatorStake) -> Self {
        self.delegators.push(stake);
        self
    }

    /// `target - current`: negative is a surplus, positive a deficit.
    pub fn delta(&self) -> i128 {
        self.target.signed_diff(self.current)
    }

    /// Stake held by `delegator` here, zero if absent.
    pub fn stake_of(&self, delegator: &DelegatorAddress) -> MicroAmount {
        self.delegators
            .iter()
            .find(|d| &d.address == delegator)
            .map(|d| d.amount)
            .unwrap_or(MicroAmount::ZERO)
    }

    pub fn total_rewards(&self) -> MicroAmount {
        self.delegators.iter().map(|d| d.reward).sum()
    }
}

/// Totals over a validator set, logged before planning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub current: MicroAmount,
    pub rewards: MicroAmount,
    pub target: MicroAmount,
}

impl AllocationSummary {
    pub fn from_records(validators: &[ValidatorRecord]) -> Result<Self, TypesError> {
        validators.iter().try_fold(Self::default(), |acc, v| -> Result<Self, TypesError> {
            let rewards = v
                .delegators
                .iter()
                .try_fold(acc.rewards, |sum, d| sum.checked_add(d.reward))
                .ok_or(TypesError::AmountOverflow("reward"))?;
            Ok(Self {
                current: acc
                    .current
                    .checked_add(v.current)
                    .ok_or(TypesError::AmountOverflow("current"))?,
                rewards,
                target: acc
                    .target
                    .checked_add(v.target)
                    .ok_or(TypesError::AmountOverflow("target"))?,
            })
        })
    }
}
