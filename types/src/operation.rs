//! Stake-movement operations produced by planning and consumed by replay.

use crate::address::{DelegatorAddress, ValidatorAddress};
use crate::amount::MicroAmount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single operation, always on behalf of one delegator.
///
/// Amounts are positive micro-unit counts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Claim the delegator's accrued reward at `validator`.
    Withdraw {
        delegator: DelegatorAddress,
        validator: ValidatorAddress,
    },
    /// Move stake between validators without unbonding.
    Redelegate {
        delegator: DelegatorAddress,
        src_validator: ValidatorAddress,
        dst_validator: ValidatorAddress,
        amount: MicroAmount,
    },
    /// Remove stake from `validator`.
    Undelegate {
        delegator: DelegatorAddress,
        validator: ValidatorAddress,
        amount: MicroAmount,
    },
    /// Stake liquid (already withdrawn) funds at `validator`.
    Delegate {
        delegator: DelegatorAddress,
        validator: ValidatorAddress,
        amount: MicroAmount,
    },
}

/// Discriminant of an [`Operation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Withdraw,
    Redelegate,
    Undelegate,
    Delegate,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Withdraw => "withdraw",
            Self::Redelegate => "redelegate",
            Self::Undelegate => "undelegate",
            Self::Delegate => "delegate",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Operation {
    pub fn delegator(&self) -> &DelegatorAddress {
        match self {
            Self::Withdraw { delegator, .. }
            | Self::Redelegate { delegator, .. }
            | Self::Undelegate { delegator, .. }
            | Self::Delegate { delegator, .. } => delegator,
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Withdraw { .. } => OperationKind::Withdraw,
            Self::Redelegate { .. } => OperationKind::Redelegate,
            Self::Undelegate { .. } => OperationKind::Undelegate,
            Self::Delegate { .. } => OperationKind::Delegate,
        }
    }

    /// Amount moved, `None` for withdrawals.
    pub fn amount(&self) -> Option<MicroAmount> {
        match self {
            Self::Withdraw { .. } => None,
            Self::Redelegate { amount, .. }
            | Self::Undelegate { amount, .. }
            | Self::Delegate { amount, .. } => Some(*amount),
        }
    }

    /// Source validator: the validator stake leaves, or the one a
    /// withdrawal or delegation targets.
    pub fn validator(&self) -> &ValidatorAddress {
        match self {
            Self::Withdraw { validator, .. }
            | Self::Undelegate { validator, .. }
            | Self::Delegate { validator, .. } => validator,
            Self::Redelegate { src_validator, .. } => src_validator,
        }
    }

    /// Destination of a redelegation.
    pub fn dst_validator(&self) -> Option<&ValidatorAddress> {
        match self {
            Self::Redelegate { dst_validator, .. } => Some(dst_validator),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Withdraw {
                delegator,
                validator,
            } => write!(f, "withdraw {delegator} @ {validator}"),
            Self::Redelegate {
                delegator,
                src_validator,
                dst_validator,
                amount,
            } => write!(
                f,
                "redelegate {amount} {src_validator} -> {dst_validator} for {delegator}"
            ),
            Self::Undelegate {
                delegator,
                validator,
                amount,
            } => write!(f, "undelegate {amount} from {validator} for {delegator}"),
            Self::Delegate {
                delegator,
                validator,
                amount,
            } => write!(f, "delegate {amount} to {validator} for {delegator}"),
        }
    }
}
