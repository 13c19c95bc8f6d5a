//! A single field index
//!
//! Maps erased field values to the store positions holding them.
//! `BTreeMap` keeps key iteration deterministic; position lists are
//! kept sorted ascending.

use std::collections::BTreeMap;

use super::key::IndexKey;

/// Mapping from an extracted field value to the positions holding it.
#[derive(Debug, Default)]
pub struct FieldIndex {
    tree: BTreeMap<IndexKey, Vec<usize>>,
}

impl FieldIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            tree: BTreeMap::new(),
        }
    }

    /// Insert a position for a key, maintaining ascending order.
    pub fn insert(&mut self, key: IndexKey, position: usize) {
        let positions = self.tree.entry(key).or_default();
        match positions.binary_search(&position) {
            Ok(_) => {}
            Err(slot) => positions.insert(slot, position),
        }
    }

    /// All positions for an exact key match, sorted ascending.
    ///
    /// A missing key yields an empty list, never an error.
    pub fn lookup(&self, key: &IndexKey) -> Vec<usize> {
        self.tree.get(key).cloned().unwrap_or_default()
    }

    /// Number of distinct keys in the index.
    pub fn key_count(&self) -> usize {
        self.tree.len()
    }
}
