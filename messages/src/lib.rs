//! Message shapes for executing a rebalance plan on chain.
//!
//! Operations become Cosmos SDK messages grouped by delegator (`messages.json`),
//! which can then be wrapped as authz `MsgExec` batches, DAO DAO action lists or
//! flat rows. Wire messages can also be decoded back into operations so that a
//! written file can be replayed.

pub mod authz;
pub mod cosmos;
pub mod daodao;
pub mod error;
pub mod rows;

pub use authz::{build_exec_array, build_grants, MsgExec};
pub use cosmos::{decode, encode, encode_book, CosmosMsg, MessagesFile};
pub use daodao::{build_actions, DaodaoAction, DaodaoTx, DelegatorAction};
pub use error::MessageError;
pub use rows::{allocation_rows, operation_rows, AllocationRow, OperationRow};
