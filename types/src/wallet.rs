//! Liquid wallets: withdrawn rewards not yet re-staked.

use crate::address::DelegatorAddress;
use crate::amount::MicroAmount;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Liquid balance per delegator, in micro-units.
///
/// Insertion order is kept so that ties in "largest wallet first" ordering
/// resolve the same way on every run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(DelegatorAddress, MicroAmount)>", into = "Vec<(DelegatorAddress, MicroAmount)>")]
pub struct LiquidWallets {
    entries: Vec<(DelegatorAddress, MicroAmount)>,
    index: HashMap<DelegatorAddress, usize>,
}

impl LiquidWallets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, delegator: &DelegatorAddress) -> MicroAmount {
        self.index
            .get(delegator)
            .map(|&i| self.entries[i].1)
            .unwrap_or(MicroAmount::ZERO)
    }

    /// Add `amount` to `delegator`'s wallet, creating it on first credit.
    pub fn credit(&mut self, delegator: &DelegatorAddress, amount: MicroAmount) {
        match self.index.get(delegator) {
            Some(&i) => self.entries[i].1 = self.entries[i].1 + amount,
            None => {
                self.index.insert(delegator.clone(), self.entries.len());
                self.entries.push((delegator.clone(), amount));
            }
        }
    }

    /// Take `amount` out of `delegator`'s wallet.
    ///
    /// Returns the available balance as the error when it is short; the
    /// wallet is left untouched in that case.
    pub fn debit(
        &mut self,
        delegator: &DelegatorAddress,
        amount: MicroAmount,
    ) -> Result<(), MicroAmount> {
        let available = self.balance(delegator);
        let remaining = available.checked_sub(amount).ok_or(available)?;
        if let Some(&i) = self.index.get(delegator) {
            self.entries[i].1 = remaining;
        }
        Ok(())
    }

    /// Wallets with a positive balance, largest first; ties keep insertion order.
    pub fn funded_by_balance_desc(&self) -> Vec<(DelegatorAddress, MicroAmount)> {
        let mut funded: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, bal)| !bal.is_zero())
            .cloned()
            .collect();
        funded.sort_by(|a, b| b.1.cmp(&a.1));
        funded
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DelegatorAddress, MicroAmount)> {
        self.entries.iter().map(|(d, bal)| (d, *bal))
    }

    pub fn total(&self) -> MicroAmount {
        self.entries.iter().map(|(_, bal)| *bal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<(DelegatorAddress, MicroAmount)>> for LiquidWallets {
    fn from(entries: Vec<(DelegatorAddress, MicroAmount)>) -> Self {
        let mut wallets = Self::new();
        for (delegator, amount) in entries {
            wallets.credit(&delegator, amount);
        }
        wallets
    }
}

impl From<LiquidWallets> for Vec<(DelegatorAddress, MicroAmount)> {
    fn from(wallets: LiquidWallets) -> Self {
        wallets.entries
    }
}
