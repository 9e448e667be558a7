//! Flat row views for spreadsheet import.

use btsg_types::{MicroAmount, OperationBook, OperationKind, UnitScale, ValidatorRecord};
use serde::{Deserialize, Serialize};

/// One operation as a row. Amounts stay in micro-units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRow {
    pub delegator: String,
    pub kind: OperationKind,
    pub src_validator: String,
    pub dst_validator: Option<String>,
    pub amount: Option<MicroAmount>,
}

/// Flatten a book into rows, group by group.
pub fn operation_rows(book: &OperationBook) -> Vec<OperationRow> {
    book.items()
        .map(|op| OperationRow {
            delegator: op.delegator().to_string(),
            kind: op.kind(),
            src_validator: op.validator().to_string(),
            dst_validator: op.dst_validator().map(|v| v.to_string()),
            amount: op.amount(),
        })
        .collect()
}

/// Per-validator summary row, in BTSG.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllocationRow {
    pub validator_address: String,
    pub validator_name: String,
    pub current_delegation: f64,
    pub new_delegation: f64,
    pub difference: f64,
    pub total_rewards: f64,
}

pub fn allocation_rows(records: &[ValidatorRecord], scale: UnitScale) -> Vec<AllocationRow> {
    records
        .iter()
        .map(|v| AllocationRow {
            validator_address: v.address.to_string(),
            validator_name: v.name.clone(),
            current_delegation: scale.to_display(v.current),
            new_delegation: scale.to_display(v.target),
            difference: scale.signed_to_display(v.delta()),
            total_rewards: scale.to_display(v.total_rewards()),
        })
        .collect()
}
