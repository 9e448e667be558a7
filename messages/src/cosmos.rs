//! Cosmos SDK message envelopes for staking and distribution.
//!
//! Every message is `{ "typeUrl": ..., "value": {...} }` with camelCase value
//! fields and amounts as `{ "denom", "amount" }` where `amount` is an integer
//! string. [`encode`] and [`decode`] map between these and [`Operation`].

use crate::error::MessageError;
use btsg_types::{ByDelegator, MicroAmount, Operation, OperationBook, MAX_INPUT_MICRO};
use serde::{Deserialize, Serialize};

pub const MSG_WITHDRAW_DELEGATOR_REWARD: &str =
    "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward";
pub const MSG_DELEGATE: &str = "/cosmos.staking.v1beta1.MsgDelegate";
pub const MSG_BEGIN_REDELEGATE: &str = "/cosmos.staking.v1beta1.MsgBeginRedelegate";
pub const MSG_UNDELEGATE: &str = "/cosmos.staking.v1beta1.MsgUndelegate";

/// Message types a rebalance run can emit.
pub const STAKING_TYPE_URLS: [&str; 4] = [
    MSG_WITHDRAW_DELEGATOR_REWARD,
    MSG_DELEGATE,
    MSG_BEGIN_REDELEGATE,
    MSG_UNDELEGATE,
];

/// A message as it appears on the wire, with an uninterpreted value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CosmosMsg {
    #[serde(rename = "typeUrl")]
    pub type_url: String,
    pub value: serde_json::Value,
}

impl CosmosMsg {
    pub fn new<T: Serialize>(type_url: &str, value: &T) -> Result<Self, MessageError> {
        Ok(Self {
            type_url: type_url.to_string(),
            value: serde_json::to_value(value)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(denom: &str, amount: MicroAmount) -> Self {
        Self {
            denom: denom.to_string(),
            amount: amount.raw().to_string(),
        }
    }

    /// Parse the amount, checking the denom.
    pub fn micro(&self, expected_denom: &str) -> Result<MicroAmount, MessageError> {
        if self.denom != expected_denom {
            return Err(MessageError::DenomMismatch {
                expected: expected_denom.to_string(),
                found: self.denom.clone(),
            });
        }
        match self.amount.parse::<u128>() {
            Ok(n) if n > 0 && n <= MAX_INPUT_MICRO => Ok(MicroAmount::new(n)),
            _ => Err(MessageError::InvalidAmount(self.amount.clone())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgWithdrawDelegatorReward {
    pub delegator_address: String,
    pub validator_address: String,
}

/// Value of both `MsgDelegate` and `MsgUndelegate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgDelegation {
    pub delegator_address: String,
    pub validator_address: String,
    pub amount: Coin,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgBeginRedelegate {
    pub delegator_address: String,
    pub validator_src_address: String,
    pub validator_dst_address: String,
    pub amount: Coin,
}

/// Encode one operation as a wire message.
pub fn encode(op: &Operation, denom: &str) -> Result<CosmosMsg, MessageError> {
    match op {
        Operation::Withdraw {
            delegator,
            validator,
        } => CosmosMsg::new(
            MSG_WITHDRAW_DELEGATOR_REWARD,
            &MsgWithdrawDelegatorReward {
                delegator_address: delegator.to_string(),
                validator_address: validator.to_string(),
            },
        ),
        Operation::Redelegate {
            delegator,
            src_validator,
            dst_validator,
            amount,
        } => CosmosMsg::new(
            MSG_BEGIN_REDELEGATE,
            &MsgBeginRedelegate {
                delegator_address: delegator.to_string(),
                validator_src_address: src_validator.to_string(),
                validator_dst_address: dst_validator.to_string(),
                amount: Coin::new(denom, *amount),
            },
        ),
        Operation::Undelegate {
            delegator,
            validator,
            amount,
        } => CosmosMsg::new(
            MSG_UNDELEGATE,
            &MsgDelegation {
                delegator_address: delegator.to_string(),
                validator_address: validator.to_string(),
                amount: Coin::new(denom, *amount),
            },
        ),
        Operation::Delegate {
            delegator,
            validator,
            amount,
        } => CosmosMsg::new(
            MSG_DELEGATE,
            &MsgDelegation {
                delegator_address: delegator.to_string(),
                validator_address: validator.to_string(),
                amount: Coin::new(denom, *amount),
            },
        ),
    }
}

/// Decode a wire message back into an operation.
///
/// Fails on an unknown `typeUrl`, a denom other than `denom`, a zero or
/// non-integer amount, or a value that does not match its type.
pub fn decode(msg: &CosmosMsg, denom: &str) -> Result<Operation, MessageError> {
    match msg.type_url.as_str() {
        MSG_WITHDRAW_DELEGATOR_REWARD => {
            let v: MsgWithdrawDelegatorReward = serde_json::from_value(msg.value.clone())?;
            Ok(Operation::Withdraw {
                delegator: v.delegator_address.into(),
                validator: v.validator_address.into(),
            })
        }
        MSG_BEGIN_REDELEGATE => {
            let v: MsgBeginRedelegate = serde_json::from_value(msg.value.clone())?;
            Ok(Operation::Redelegate {
                amount: v.amount.micro(denom)?,
                delegator: v.delegator_address.into(),
                src_validator: v.validator_src_address.into(),
                dst_validator: v.validator_dst_address.into(),
            })
        }
        MSG_UNDELEGATE => {
            let v: MsgDelegation = serde_json::from_value(msg.value.clone())?;
            Ok(Operation::Undelegate {
                amount: v.amount.micro(denom)?,
                delegator: v.delegator_address.into(),
                validator: v.validator_address.into(),
            })
        }
        MSG_DELEGATE => {
            let v: MsgDelegation = serde_json::from_value(msg.value.clone())?;
            Ok(Operation::Delegate {
                amount: v.amount.micro(denom)?,
                delegator: v.delegator_address.into(),
                validator: v.validator_address.into(),
            })
        }
        other => Err(MessageError::UnknownTypeUrl(other.to_string())),
    }
}

/// Encode every operation in a book, keeping groups and order.
pub fn encode_book(book: &OperationBook, denom: &str) -> Result<ByDelegator<CosmosMsg>, MessageError> {
    book.try_map(|_, op| encode(op, denom))
}

/// The `messages.json` layout: withdrawals, then staking moves.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagesFile {
    pub withdraw: ByDelegator<CosmosMsg>,
    pub staking: ByDelegator<CosmosMsg>,
}

impl MessagesFile {
    pub fn encode(
        withdraw: &OperationBook,
        staking: &OperationBook,
        denom: &str,
    ) -> Result<Self, MessageError> {
        Ok(Self {
            withdraw: encode_book(withdraw, denom)?,
            staking: encode_book(staking, denom)?,
        })
    }
}
