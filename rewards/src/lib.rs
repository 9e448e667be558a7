//! Reward selection: the first stage of a rebalance run.

pub mod selector;

pub use selector::{select_rewards, RewardSelection};
