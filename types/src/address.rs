//! Validator and delegator address types.
//!
//! Addresses are opaque bech32 strings (`bitsongvaloper...`, `bitsong1...`).
//! No checksum validation is done here; the chain rejects bad addresses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validator operator address.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorAddress(String);

impl ValidatorAddress {
    /// The bech32 prefix used by BitSong validator operators.
    pub const PREFIX: &'static str = "bitsongvaloper";

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ValidatorAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ValidatorAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A delegator account address.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DelegatorAddress(String);

impl DelegatorAddress {
    /// The bech32 prefix used by BitSong accounts.
    pub const PREFIX: &'static str = "bitsong1";

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DelegatorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DelegatorAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for DelegatorAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
