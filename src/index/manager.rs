//! Index Manager for tabledb
//!
//! Maintains the named secondary indexes over a record store.
//!
//! An index is either fully valid or fully absent. Any store mutation
//! clears every index (the table façade calls [`IndexManager::invalidate_all`]);
//! rebuilds are deferred to the next lookup, which favors write-heavy
//! workloads over lookup latency.

use std::collections::HashMap;

use crate::store::RecordStore;

use super::field_index::FieldIndex;
use super::key::IntoIndexKey;

/// Default index name derived from the key type.
///
/// Convenience only: two different fields of the same key type collide
/// on this name. Tables indexing several same-typed fields must supply
/// explicit names through [`IndexManager::create_index`].
pub fn default_index_name<K>() -> &'static str {
    std::any::type_name::<K>()
}

/// Maintains field-value indexes over a record store.
#[derive(Debug, Default)]
pub struct IndexManager {
    indexes: HashMap<String, FieldIndex>,
}

impl IndexManager {
    /// Creates a manager with no indexes.
    pub fn new() -> Self {
        Self {
            indexes: HashMap::new(),
        }
    }

    /// Builds an index named `name` by scanning the store once.
    ///
    /// Records whose extracted key is absent (`None`) are skipped. An
    /// existing index under the same name is overwritten.
    pub fn create_index<T, K, F>(&mut self, store: &RecordStore<T>, selector: F, name: &str)
    where
        F: Fn(&T) -> K,
        K: IntoIndexKey,
    {
        let mut index = FieldIndex::new();
        for (position, record) in store.records().iter().enumerate() {
            if let Some(key) = selector(record).into_index_key() {
                index.insert(key, position);
            }
        }
        self.indexes.insert(name.to_string(), index);
    }

    /// Records matching `key` under the index named after the key type.
    ///
    /// See [`default_index_name`] for the collision caveat; prefer
    /// [`IndexManager::get_by_index_named`] when a table indexes more
    /// than one field of the same type.
    pub fn get_by_index<T, K, Q, F>(&mut self, store: &RecordStore<T>, selector: F, key: Q) -> Vec<T>
    where
        T: Clone,
        F: Fn(&T) -> K,
        K: IntoIndexKey,
        Q: IntoIndexKey,
    {
        let name = default_index_name::<K>();
        self.get_by_index_named(store, name, selector, key)
    }

    /// Records matching `key` under the named index.
    ///
    /// Builds the index lazily on first use. Missing keys yield an
    /// empty result, never an error. Positions that have fallen out of
    /// range are skipped defensively, though a freshly rebuilt index
    /// cannot contain any.
    pub fn get_by_index_named<T, K, Q, F>(
        &mut self,
        store: &RecordStore<T>,
        name: &str,
        selector: F,
        key: Q,
    ) -> Vec<T>
    where
        T: Clone,
        F: Fn(&T) -> K,
        K: IntoIndexKey,
        Q: IntoIndexKey,
    {
        if !self.indexes.contains_key(name) {
            self.create_index(store, &selector, name);
        }

        let Some(key) = key.into_index_key() else {
            return Vec::new();
        };

        let positions = match self.indexes.get(name) {
            Some(index) => index.lookup(&key),
            None => Vec::new(),
        };

        positions
            .into_iter()
            .filter_map(|position| store.get(position).cloned())
            .collect()
    }

    /// Clears every named index without rebuilding.
    ///
    /// Called after any store mutation; the next lookup rebuilds what
    /// it needs.
    pub fn invalidate_all(&mut self) {
        self.indexes.clear();
    }

    /// Whether an index exists under `name`.
    pub fn has_index(&self, name: &str) -> bool {
        self.indexes.contains_key(name)
    }

    /// Number of currently materialized indexes.
    pub fn index_count(&self) -> usize {
        self.indexes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Player {
        name: String,
        score: i64,
    }

    fn player(name: &str, score: i64) -> Player {
        Player {
            name: name.to_string(),
            score,
        }
    }

    fn sample_store() -> RecordStore<Player> {
        let mut store = RecordStore::new();
        store.add(player("Alice", 100));
        store.add(player("Bob", 250));
        store.add(player("Alice", 75));
        store
    }

    #[test]
    fn test_create_index_and_lookup() {
        let store = sample_store();
        let mut manager = IndexManager::new();

        manager.create_index(&store, |p: &Player| p.name.clone(), "name");
        let hits = manager.get_by_index_named(&store, "name", |p: &Player| p.name.clone(), "Alice");

        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|p| p.name == "Alice"));
    }

    #[test]
    fn test_lazy_build_on_lookup() {
        let store = sample_store();
        let mut manager = IndexManager::new();

        assert_eq!(manager.index_count(), 0);
        let hits = manager.get_by_index(&store, |p: &Player| p.score, 250i64);

        assert_eq!(hits, vec![player("Bob", 250)]);
        assert_eq!(manager.index_count(), 1);
    }

    #[test]
    fn test_missing_key_is_empty() {
        let store = sample_store();
        let mut manager = IndexManager::new();

        let hits =
            manager.get_by_index_named(&store, "name", |p: &Player| p.name.clone(), "Nonexistent");

        assert!(hits.is_empty());
    }

    #[test]
    fn test_absent_keys_skipped() {
        let mut store = RecordStore::new();
        store.add(player("Alice", 100));
        store.add(player("", 50));
        let mut manager = IndexManager::new();

        // Empty names extract no key at all.
        let selector = |p: &Player| {
            if p.name.is_empty() {
                None
            } else {
                Some(p.name.clone())
            }
        };
        manager.create_index(&store, selector, "name");
        let hits = manager.get_by_index_named(&store, "name", selector, Some("Alice".to_string()));

        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_invalidate_all_clears_everything() {
        let store = sample_store();
        let mut manager = IndexManager::new();
        manager.create_index(&store, |p: &Player| p.name.clone(), "name");
        manager.create_index(&store, |p: &Player| p.score, "score");

        manager.invalidate_all();

        assert_eq!(manager.index_count(), 0);
        assert!(!manager.has_index("name"));
    }

    #[test]
    fn test_create_index_overwrites_same_name() {
        let store = sample_store();
        let mut manager = IndexManager::new();
        manager.create_index(&store, |p: &Player| p.name.clone(), "field");
        manager.create_index(&store, |p: &Player| p.score, "field");

        assert_eq!(manager.index_count(), 1);
        let hits = manager.get_by_index_named(&store, "field", |p: &Player| p.score, 75i64);
        assert_eq!(hits, vec![player("Alice", 75)]);
    }

    #[test]
    fn test_none_lookup_key_is_empty() {
        let store = sample_store();
        let mut manager = IndexManager::new();

        let absent: Option<i64> = None;
        let hits = manager.get_by_index_named(&store, "score", |p: &Player| Some(p.score), absent);

        assert!(hits.is_empty());
    }
}
