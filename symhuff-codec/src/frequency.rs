//! Symbol frequency analysis.

use crate::Symbol;
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Occurrence count per distinct symbol.
///
/// Iteration is in ascending symbol order, which the tree builder relies on
/// for its tie-break.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FrequencyMap {
    counts: BTreeMap<Symbol, u64>,
}

impl FrequencyMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every symbol in `symbols`.
    pub fn from_symbols(symbols: &[Symbol]) -> Self {
        let mut counts = BTreeMap::new();
        for &symbol in symbols {
            *counts.entry(symbol).or_insert(0u64) += 1;
        }
        Self { counts }
    }

    /// Add `count` occurrences of `symbol`.
    pub fn insert(&mut self, symbol: Symbol, count: u64) {
        *self.counts.entry(symbol).or_insert(0) += count;
    }

    /// Count for `symbol`, if present.
    pub fn get(&self, symbol: Symbol) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no symbol has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

impl FromIterator<(Symbol, u64)> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = (Symbol, u64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (symbol, count) in iter {
            map.insert(symbol, count);
        }
        map
    }
}

impl<'a> IntoIterator for &'a FrequencyMap {
    type Item = (&'a Symbol, &'a u64);
    type IntoIter = btree_map::Iter<'a, Symbol, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}
