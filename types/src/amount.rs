//! Stake amount types.
//!
//! Amounts are represented as fixed-point integers (u128) to avoid floating-point errors.
//! The smallest unit is 1 ubtsg (a micro-unit). Display amounts in BTSG only exist
//! at the input and output boundaries and are converted through a [`UnitScale`].

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Micro-units per BTSG on BitSong.
pub const MICRO_PER_BTSG: u64 = 1_000_000;

/// Largest amount accepted from input, in micro-units.
pub const MAX_INPUT_MICRO: u128 = u64::MAX as u128;

/// A stake or reward amount in micro-units.
///
/// Internally stored as raw units (u128) for precision.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MicroAmount(u128);

impl MicroAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Signed difference `self - other`, for deltas. Saturates at the
    /// `i128` bounds instead of wrapping.
    pub fn signed_diff(self, other: Self) -> i128 {
        if self.0 >= other.0 {
            i128::try_from(self.0 - other.0).unwrap_or(i128::MAX)
        } else {
            i128::try_from(other.0 - self.0).map_or(i128::MIN, |d| -d)
        }
    }
}

impl Add for MicroAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for MicroAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for MicroAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, a| acc + a)
    }
}

impl fmt::Display for MicroAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ubtsg", self.0)
    }
}

/// Conversion factor between BTSG and micro-units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitScale(u64);

impl UnitScale {
    pub fn new(micro_per_unit: u64) -> Result<Self, TypesError> {
        if micro_per_unit == 0 {
            return Err(TypesError::InvalidScale);
        }
        Ok(Self(micro_per_unit))
    }

    pub fn micro_per_unit(&self) -> u64 {
        self.0
    }

    /// Convert a BTSG amount to micro-units, truncating toward zero.
    ///
    /// This is the only place precision is lost; it must be applied to
    /// current and target amounts alike before they are differenced.
    /// Results above [`MAX_INPUT_MICRO`] are rejected.
    pub fn to_micro(&self, btsg: f64) -> Result<MicroAmount, TypesError> {
        if !btsg.is_finite() || btsg < 0.0 {
            return Err(TypesError::InvalidAmount(btsg));
        }
        let scaled = (btsg * self.0 as f64).floor();
        if scaled >= MAX_INPUT_MICRO as f64 {
            return Err(TypesError::InvalidAmount(btsg));
        }
        Ok(MicroAmount(scaled as u128))
    }

    /// Convert micro-units back to BTSG for display.
    pub fn to_display(&self, amount: MicroAmount) -> f64 {
        amount.0 as f64 / self.0 as f64
    }

    /// Convert a signed micro-unit difference to BTSG for display.
    pub fn signed_to_display(&self, delta: i128) -> f64 {
        delta as f64 / self.0 as f64
    }
}

impl Default for UnitScale {
    fn default() -> Self {
        Self(MICRO_PER_BTSG)
    }
}
