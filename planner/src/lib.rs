//! Rebalance planning: turns current vs. target delegations into an ordered
//! list of stake movements.
//!
//! This crate handles:
//! - Surplus / deficit partitioning of validators by delta
//! - Redelegation from surplus to deficit validators
//! - Undelegation of surplus no deficit can absorb
//! - Delegation of withdrawn rewards into remaining deficits
//! - Reporting deficits that cannot be met and surplus that cannot be moved

pub mod delta;
pub mod plan;
pub mod planner;

pub use delta::{StrandedSurplus, UnmetDeficit};
pub use plan::{plan_rebalance, RebalancePlan};
pub use planner::{plan_staking, StakingPlan};
