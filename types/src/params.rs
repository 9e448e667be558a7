//! Run parameters shared by reward selection, planning and verification.

use crate::amount::{MicroAmount, UnitScale};
use crate::error::TypesError;
use serde::{Deserialize, Serialize};

/// Base denomination on BitSong.
pub const DEFAULT_DENOM: &str = "ubtsg";

/// Rewards at or above this many BTSG are withdrawn.
pub const DEFAULT_REWARD_THRESHOLD_BTSG: f64 = 1.0;

/// Absolute tolerance, in BTSG, when comparing final amounts to targets.
pub const DEFAULT_TOLERANCE_BTSG: f64 = 1e-6;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RebalanceParams {
    /// Minimum accrued reward, BTSG, worth claiming.
    pub reward_threshold_btsg: f64,
    /// Micro-units per BTSG.
    pub scale: UnitScale,
    /// Denomination carried on wire messages.
    pub denom: String,
    /// Allowed |final - target|, BTSG.
    pub tolerance_btsg: f64,
}

impl RebalanceParams {
    /// The reward threshold in micro-units.
    pub fn reward_threshold(&self) -> Result<MicroAmount, TypesError> {
        self.scale.to_micro(self.reward_threshold_btsg)
    }
}

impl Default for RebalanceParams {
    fn default() -> Self {
        Self {
            reward_threshold_btsg: DEFAULT_REWARD_THRESHOLD_BTSG,
            scale: UnitScale::default(),
            denom: DEFAULT_DENOM.to_string(),
            tolerance_btsg: DEFAULT_TOLERANCE_BTSG,
        }
    }
}
