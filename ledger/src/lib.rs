//! Staking ledger simulator.
//!
//! Replays a rebalance plan against a fresh copy of the initial validator and
//! delegator state, then checks each validator's final amount against its
//! target. Precondition failures never abort a replay: the operation is
//! skipped and reported as a [`ReplayWarning`].

pub mod error;
pub mod ledger;
pub mod report;
pub mod simulator;

pub use error::ReplayWarning;
pub use ledger::{LedgerSummary, StakingLedger};
pub use report::{ValidatorCheck, VerificationReport};
pub use simulator::LedgerSimulator;
