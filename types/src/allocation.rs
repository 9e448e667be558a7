//! The allocation snapshot as it appears on disk (`allocations.json`).
//!
//! Amounts here are BTSG floats. They are turned into [`ValidatorRecord`]s,
//! and so into micro-units, exactly once via [`AllocationFile::into_records`].

use crate::amount::UnitScale;
use crate::error::TypesError;
use crate::validator::{DelegatorStake, ValidatorRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AllocationFile {
    pub delegations: Vec<AllocationEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub address: String,
    pub name: String,
    /// Current delegation, BTSG.
    pub total_amount: f64,
    /// Informational only; per-delegator rewards are authoritative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rewards: Option<f64>,
    /// Target delegation, BTSG.
    pub new_delegations: f64,
    #[serde(default)]
    pub delegators: Vec<DelegatorEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DelegatorEntry {
    pub address: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<f64>,
}

impl AllocationFile {
    pub fn from_json_str(s: &str) -> Result<Self, TypesError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Convert the snapshot into micro-unit records.
    ///
    /// Fails on the first negative or non-finite amount, or on a validator
    /// address that appears twice.
    pub fn into_records(&self, scale: UnitScale) -> Result<Vec<ValidatorRecord>, TypesError> {
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(self.delegations.len());
        for entry in &self.delegations {
            if !seen.insert(entry.address.as_str()) {
                return Err(TypesError::DuplicateValidator(entry.address.clone()));
            }
            records.push(entry.to_record(scale)?);
        }
        Ok(records)
    }

    /// Rebuild a snapshot from records, e.g. to persist a simulated final state.
    pub fn from_records(records: &[ValidatorRecord], scale: UnitScale) -> Self {
        let delegations = records
            .iter()
            .map(|v| AllocationEntry {
                address: v.address.to_string(),
                name: v.name.clone(),
                total_amount: scale.to_display(v.current),
                total_rewards: Some(scale.to_display(v.total_rewards())),
                new_delegations: scale.to_display(v.target),
                delegators: v
                    .delegators
                    .iter()
                    .map(|d| DelegatorEntry {
                        address: d.address.to_string(),
                        amount: scale.to_display(d.amount),
                        rewards: Some(scale.to_display(d.reward)),
                    })
                    .collect(),
            })
            .collect();
        Self { delegations }
    }
}

impl AllocationEntry {
    pub fn to_record(&self, scale: UnitScale) -> Result<ValidatorRecord, TypesError> {
        let wrap = |e: TypesError| TypesError::InvalidValidator {
            validator: self.address.clone(),
            reason: e.to_string(),
        };
        let current = scale.to_micro(self.total_amount).map_err(wrap)?;
        let target = scale.to_micro(self.new_delegations).map_err(wrap)?;
        let mut record = ValidatorRecord::new(self.address.as_str(), self.name.as_str(), current, target);
        for d in &self.delegators {
            let amount = scale.to_micro(d.amount).map_err(wrap)?;
            let reward = scale.to_micro(d.rewards.unwrap_or(0.0)).map_err(wrap)?;
            record
                .delegators
                .push(DelegatorStake::new(d.address.as_str(), amount).with_reward(reward));
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::MicroAmount;

    const SNAPSHOT: &str = r#"{
        "delegations": [
            {
                "address": "bitsongvaloper1aaa",
                "name": "Alpha",
                "total_amount": 100.5,
                "total_rewards": 2.0,
                "new_delegations": 80,
                "delegators": [
                    { "address": "bitsong1xyz", "amount": 100.5, "rewards": 2.0 },
                    { "address": "bitsong1abc", "amount": 0 }
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_and_converts() {
        let file = AllocationFile::from_json_str(SNAPSHOT).unwrap();
        let records = file.into_records(UnitScale::default()).unwrap();
        assert_eq!(records.len(), 1);
        let v = &records[0];
        assert_eq!(v.current, MicroAmount::new(100_500_000));
        assert_eq!(v.target, MicroAmount::new(80_000_000));
        assert_eq!(v.delegators[0].reward, MicroAmount::new(2_000_000));
        assert_eq!(v.delegators[1].reward, MicroAmount::ZERO);
    }

    #[test]
    fn malformed_json_is_fatal() {
        assert!(matches!(
            AllocationFile::from_json_str("{\"delegations\": 3}"),
            Err(TypesError::Malformed(_))
        ));
    }

    #[test]
    fn negative_amount_is_fatal() {
        let mut file = AllocationFile::from_json_str(SNAPSHOT).unwrap();
        file.delegations[0].new_delegations = -1.0;
        let err = file.into_records(UnitScale::default()).unwrap_err();
        assert!(matches!(err, TypesError::InvalidValidator { .. }));
    }

    #[test]
    fn oversized_target_is_fatal() {
        let mut file = AllocationFile::from_json_str(SNAPSHOT).unwrap();
        file.delegations[0].new_delegations = 2e32;
        let err = file.into_records(UnitScale::default()).unwrap_err();
        assert!(matches!(err, TypesError::InvalidValidator { .. }));
    }

    #[test]
    fn duplicate_validator_is_fatal() {
        let mut file = AllocationFile::from_json_str(SNAPSHOT).unwrap();
        let dup = file.delegations[0].clone();
        file.delegations.push(dup);
        assert!(matches!(
            file.into_records(UnitScale::default()),
            Err(TypesError::DuplicateValidator(_))
        ));
    }

    #[test]
    fn records_round_trip_through_snapshot() {
        let scale = UnitScale::default();
        let records = AllocationFile::from_json_str(SNAPSHOT)
            .unwrap()
            .into_records(scale)
            .unwrap();
        let again = AllocationFile::from_records(&records, scale)
            .into_records(scale)
            .unwrap();
        assert_eq!(records, again);
    }
}
