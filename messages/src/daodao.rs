//! DAO DAO action lists.
//!
//! Each operation becomes a `manageStaking` action (keyed by `actionKey`); a
//! delegator's actions are wrapped in one `authzExec` entry (keyed by `key`)
//! addressed to that delegator.

use btsg_types::{MicroAmount, Operation, OperationBook};
use serde::{Deserialize, Serialize};

pub const MANAGE_STAKING: &str = "manageStaking";
pub const AUTHZ_EXEC: &str = "authzExec";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageStaking {
    pub chain_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub validator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_validator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthzExec {
    pub chain_id: String,
    pub address: String,
    #[serde(rename = "_actionData")]
    pub action_data: Vec<DaodaoAction>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaodaoAction {
    pub action_key: String,
    pub data: ManageStaking,
}

/// Per-delegator wrapper around that delegator's actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DelegatorAction {
    pub key: String,
    pub data: AuthzExec,
}

/// Top-level document written to `daodao-tx-*.json`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DaodaoTx {
    pub actions: Vec<DelegatorAction>,
}

fn scaled(amount: MicroAmount, decimals: u32) -> f64 {
    amount.raw() as f64 / 10f64.powi(decimals as i32)
}

/// Translate one operation into a `manageStaking` action.
pub fn manage_staking(op: &Operation, chain_id: &str, decimals: u32) -> DaodaoAction {
    let (validator, to_validator) = match op {
        Operation::Redelegate {
            src_validator,
            dst_validator,
            ..
        } => (src_validator.to_string(), Some(dst_validator.to_string())),
        other => (other.validator().to_string(), None),
    };
    let kind = match op {
        Operation::Withdraw { .. } => "withdraw_delegator_reward",
        Operation::Redelegate { .. } => "redelegate",
        Operation::Undelegate { .. } => "undelegate",
        Operation::Delegate { .. } => "delegate",
    };
    DaodaoAction {
        action_key: MANAGE_STAKING.to_string(),
        data: ManageStaking {
            chain_id: chain_id.to_string(),
            kind: kind.to_string(),
            validator,
            to_validator,
            amount: op.amount().map(|a| scaled(a, decimals)),
        },
    }
}

/// One `authzExec` action per delegator group, in group order.
pub fn build_actions(book: &OperationBook, chain_id: &str, decimals: u32) -> DaodaoTx {
    let actions = book
        .iter()
        .map(|(delegator, ops)| DelegatorAction {
            key: AUTHZ_EXEC.to_string(),
            data: AuthzExec {
                chain_id: chain_id.to_string(),
                address: delegator.to_string(),
                action_data: ops
                    .iter()
                    .map(|op| manage_staking(op, chain_id, decimals))
                    .collect(),
            },
        })
        .collect();
    DaodaoTx { actions }
}
