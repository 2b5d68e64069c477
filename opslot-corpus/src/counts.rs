//! Insertion-ordered token count tables
//!
//! Downstream tie-breaking (token ranking, slot lookup) depends on stable
//! first-encounter order, which a plain HashMap cannot provide. `CountTable`
//! keeps entries in the order tokens were first seen and indexes them for
//! O(1) increments.

use std::collections::HashMap;

/// Token occurrence counts, iterable in first-encounter order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    entries: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` occurrences of `token`
    pub fn add(&mut self, token: &str, n: u32) {
        match self.index.get(token) {
            Some(&i) => self.entries[i].1 += n,
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), n));
            }
        }
    }

    /// Count for `token`, if ever seen
    pub fn get(&self, token: &str) -> Option<u32> {
        self.index.get(token).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in first-encounter order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.entries.iter().map(|(tok, n)| (tok.as_str(), *n))
    }

    /// Merge another table into this one, summing counts. Precedence is
    /// explicit: counts add, they never overwrite. Tokens unseen here are
    /// appended in `other`'s order.
    pub fn merge(&mut self, other: &CountTable) {
        for (tok, n) in other.iter() {
            self.add(tok, n);
        }
    }

    /// Tokens sorted by descending count. The sort is stable, so equal
    /// counts keep first-encounter order.
    pub fn ranked(&self) -> Vec<String> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.into_iter().map(|(tok, _)| tok).collect()
    }
}
