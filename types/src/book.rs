//! Per-delegator grouping that remembers discovery order.
//!
//! Downstream batching groups operations by delegator, but the order in which
//! groups were first seen, and the order inside each group, is an execution
//! order: a withdrawal must be replayed before the delegate it funds.
//! [`ByDelegator`] serialises as a JSON object whose keys appear in that order.

use crate::address::DelegatorAddress;
use crate::operation::Operation;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Typed operations grouped by delegator.
pub type OperationBook = ByDelegator<Operation>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByDelegator<T> {
    groups: Vec<(DelegatorAddress, Vec<T>)>,
    index: HashMap<DelegatorAddress, usize>,
}

impl<T> Default for ByDelegator<T> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> ByDelegator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` to `delegator`'s group, opening the group if needed.
    pub fn push(&mut self, delegator: &DelegatorAddress, item: T) {
        match self.index.get(delegator) {
            Some(&i) => self.groups[i].1.push(item),
            None => {
                self.index.insert(delegator.clone(), self.groups.len());
                self.groups.push((delegator.clone(), vec![item]));
            }
        }
    }

    pub fn get(&self, delegator: &DelegatorAddress) -> Option<&[T]> {
        self.index
            .get(delegator)
            .map(|&i| self.groups[i].1.as_slice())
    }

    /// Groups in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&DelegatorAddress, &[T])> {
        self.groups.iter().map(|(d, items)| (d, items.as_slice()))
    }

    /// Every item, group by group.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.groups.iter().flat_map(|(_, items)| items.iter())
    }

    pub fn delegators(&self) -> impl Iterator<Item = &DelegatorAddress> {
        self.groups.iter().map(|(d, _)| d)
    }

    /// Number of delegator groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of items across all groups.
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|(_, items)| items.len()).sum()
    }

    /// Convert every item, keeping groups and order.
    pub fn map<U>(&self, mut f: impl FnMut(&DelegatorAddress, &T) -> U) -> ByDelegator<U> {
        let mut out = ByDelegator::new();
        for (delegator, items) in &self.groups {
            for item in items {
                out.push(delegator, f(delegator, item));
            }
        }
        out
    }

    /// Fallible [`map`](Self::map); stops at the first error.
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(&DelegatorAddress, &T) -> Result<U, E>,
    ) -> Result<ByDelegator<U>, E> {
        let mut out = ByDelegator::new();
        for (delegator, items) in &self.groups {
            for item in items {
                out.push(delegator, f(delegator, item)?);
            }
        }
        Ok(out)
    }
}

impl OperationBook {
    /// Group operations by their own delegator, in the order given.
    pub fn from_operations(ops: impl IntoIterator<Item = Operation>) -> Self {
        let mut book = Self::new();
        for op in ops {
            let delegator = op.delegator().clone();
            book.push(&delegator, op);
        }
        book
    }
}

impl<T: Serialize> Serialize for ByDelegator<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (delegator, items) in &self.groups {
            map.serialize_entry(delegator, items)?;
        }
        map.end()
    }
}

struct ByDelegatorVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for ByDelegatorVisitor<T> {
    type Value = ByDelegator<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from delegator address to a list")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut book = ByDelegator::new();
        while let Some((delegator, items)) = access.next_entry::<DelegatorAddress, Vec<T>>()? {
            for item in items {
                book.push(&delegator, item);
            }
        }
        Ok(book)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ByDelegator<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ByDelegatorVisitor(PhantomData))
    }
}
