use btsg_types::{DelegatorAddress, MicroAmount, ValidatorAddress};
use serde::Serialize;
use thiserror::Error;

/// A precondition failure during replay. The offending operation is skipped
/// and replay continues.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum ReplayWarning {
    #[error("validator not found: {validator}")]
    UnknownValidator { validator: ValidatorAddress },

    #[error("delegator {delegator} has no delegation at {validator}")]
    UnknownDelegator {
        delegator: DelegatorAddress,
        validator: ValidatorAddress,
    },

    #[error("delegator {delegator} holds {available} at {validator}, cannot move {requested}")]
    InsufficientStake {
        delegator: DelegatorAddress,
        validator: ValidatorAddress,
        available: MicroAmount,
        requested: MicroAmount,
    },

    #[error("validator {validator} holds {available} in total, cannot release {requested}")]
    InsufficientValidatorTotal {
        validator: ValidatorAddress,
        available: MicroAmount,
        requested: MicroAmount,
    },

    #[error("adding {amount} for {delegator} overflows the stake at {validator}")]
    StakeOverflow {
        delegator: DelegatorAddress,
        validator: ValidatorAddress,
        amount: MicroAmount,
    },

    #[error("delegator {delegator} has {available} liquid, cannot delegate {requested}")]
    InsufficientLiquid {
        delegator: DelegatorAddress,
        available: MicroAmount,
        requested: MicroAmount,
    },

    #[error("undecodable message {type_url} for {delegator}: {reason}")]
    Undecodable {
        delegator: DelegatorAddress,
        type_url: String,
        reason: String,
    },
}
