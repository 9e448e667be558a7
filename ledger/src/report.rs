use crate::error::ReplayWarning;
use btsg_types::{LiquidWallets, MicroAmount, ValidatorAddress};
use serde::Serialize;
use std::fmt;

/// Final amount of one validator compared to its target.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidatorCheck {
    pub address: ValidatorAddress,
    pub name: String,
    #[serde(rename = "final")]
    pub final_amount: MicroAmount,
    pub target: MicroAmount,
    /// `final - target` in BTSG.
    pub delta_btsg: f64,
    pub matched: bool,
}

impl fmt::Display for ValidatorCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.matched { "OK" } else { "MISMATCH" };
        write!(
            f,
            "{status:<8} {} ({}) final={} target={} delta={:+.6} BTSG",
            self.address, self.name, self.final_amount, self.target, self.delta_btsg
        )
    }
}

/// Result of a replay: per-validator checks plus what happened on the way.
#[derive(Clone, Debug, Serialize)]
pub struct VerificationReport {
    pub validators: Vec<ValidatorCheck>,
    pub liquid: LiquidWallets,
    pub warnings: Vec<ReplayWarning>,
    pub applied: usize,
    pub skipped: usize,
}

impl VerificationReport {
    /// Overall result: every validator within tolerance.
    pub fn all_matched(&self) -> bool {
        self.validators.iter().all(|c| c.matched)
    }

    pub fn mismatched(&self) -> impl Iterator<Item = &ValidatorCheck> {
        self.validators.iter().filter(|c| !c.matched)
    }

    pub fn check(&self, address: &ValidatorAddress) -> Option<&ValidatorCheck> {
        self.validators.iter().find(|c| &c.address == address)
    }
}
