//! Fundamental types for BTSG stake rebalancing.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! amounts and unit scaling, addresses, validator records, the on-disk allocation
//! snapshot, operations, per-delegator books, liquid wallets and run parameters.

pub mod address;
pub mod allocation;
pub mod amount;
pub mod book;
pub mod error;
pub mod operation;
pub mod params;
pub mod time;
pub mod validator;
pub mod wallet;

pub use address::{DelegatorAddress, ValidatorAddress};
pub use allocation::{AllocationEntry, AllocationFile, DelegatorEntry};
pub use amount::{MicroAmount, UnitScale, MAX_INPUT_MICRO, MICRO_PER_BTSG};
pub use book::{ByDelegator, OperationBook};
pub use error::TypesError;
pub use operation::{Operation, OperationKind};
pub use params::RebalanceParams;
pub use time::{Timestamp, ONE_YEAR_SECS};
pub use validator::{AllocationSummary, DelegatorStake, ValidatorRecord};
pub use wallet::LiquidWallets;
