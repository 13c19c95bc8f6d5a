//! Table façade for tabledb
//!
//! Composes one record store, its index manager and its sort cache
//! into a single named entity, and re-exports the CRUD, index, sort
//! and query operations catalogs and adapters talk to.
//!
//! Correctness contract: every mutating entry point runs exactly one
//! invalidation pass over the derived structures when the store
//! actually changed, so no index or sort result visible to a caller
//! ever reflects a stale store state. Bulk operations invalidate once
//! per call, not once per record.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::adapter::{AdapterResult, SharedAdapter};
use crate::index::{IndexManager, IntoIndexKey};
use crate::observability::{Event, Logger};
use crate::query;
use crate::query::{QueryResult, CaseSensitivity};
use crate::sort::{SortCache, SortDirection};
use crate::store::RecordStore;

/// A named, single-record-type, in-memory store with CRUD, indexing,
/// sorting and query capability.
pub struct Table<T> {
    name: String,
    store: RecordStore<T>,
    indexes: IndexManager,
    sort_cache: SortCache<T>,
    adapter: Option<SharedAdapter<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Table<T> {
    /// Creates an empty table named after the record type.
    pub fn new() -> Self {
        Self::named(short_type_name::<T>())
    }

    /// Creates an empty table with an explicit name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            store: RecordStore::new(),
            indexes: IndexManager::new(),
            sort_cache: SortCache::new(),
            adapter: None,
        }
    }

    /// Attaches a shared adapter, builder style.
    pub fn with_adapter(mut self, adapter: SharedAdapter<T>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Swaps in a shared adapter.
    pub fn set_adapter(&mut self, adapter: SharedAdapter<T>) {
        self.adapter = Some(adapter);
    }

    /// The table's name, as seen by catalogs.
    pub fn table_name(&self) -> &str {
        &self.name
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True when the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The record at `position`, or `None` if out of range.
    pub fn get_record(&self, position: usize) -> Option<&T> {
        self.store.get(position)
    }

    /// First record in insertion order.
    pub fn first_record(&self) -> Option<&T> {
        self.store.first()
    }

    /// Last record in insertion order.
    pub fn last_record(&self) -> Option<&T> {
        self.store.last()
    }

    /// The full record snapshot in insertion order.
    pub fn records(&self) -> &[T] {
        self.store.records()
    }

    /// Clears all derived structures after a store change.
    fn mark_changed(&mut self) {
        self.indexes.invalidate_all();
        self.sort_cache.invalidate();
    }
}

impl<T: PartialEq> Table<T> {
    /// Position of the first record equal to `record`; only stable
    /// until the next mutation.
    pub fn index_of(&self, record: &T) -> Option<usize> {
        self.store.index_of(record)
    }

    /// Whether any record equals `record`.
    pub fn contains(&self, record: &T) -> bool {
        self.store.contains(record)
    }
}

impl<T: Clone> Table<T> {
    // ------------------------------------------------------------------
    // CRUD
    // ------------------------------------------------------------------

    /// Appends a record.
    pub fn add_record(&mut self, record: T) {
        if self.store.add(record) {
            self.mark_changed();
        }
    }

    /// Removes and returns the record at `position`; no-op when out of
    /// range.
    pub fn remove_record(&mut self, position: usize) -> Option<T> {
        let removed = self.store.remove_at(position);
        if removed.is_some() {
            self.mark_changed();
        }
        removed
    }

    /// Replaces the record at `position`; no-op when out of range.
    pub fn update_record(&mut self, position: usize, record: T) -> bool {
        let updated = self.store.update_at(position, record);
        if updated {
            self.mark_changed();
        }
        updated
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        if self.store.clear() {
            self.mark_changed();
        }
    }

    // ------------------------------------------------------------------
    // Bulk operations (one invalidation pass each)
    // ------------------------------------------------------------------

    /// Appends all `records`.
    pub fn add_range<I: IntoIterator<Item = T>>(&mut self, records: I) {
        let mut added = false;
        for record in records {
            self.store.add(record);
            added = true;
        }
        if added {
            self.mark_changed();
        }
    }

    /// Removes every record matching `predicate`; returns the number
    /// removed.
    pub fn remove_all<P: Fn(&T) -> bool>(&mut self, predicate: P) -> usize {
        let removed = self.store.remove_matching(predicate);
        if removed > 0 {
            self.mark_changed();
        }
        removed
    }

    /// Rewrites every record matching `predicate` through `update_fn`;
    /// returns the number rewritten.
    pub fn update_all<P, U>(&mut self, predicate: P, update_fn: U) -> usize
    where
        P: Fn(&T) -> bool,
        U: Fn(&T) -> T,
    {
        let updated = self.store.update_matching(predicate, update_fn);
        if updated > 0 {
            self.mark_changed();
        }
        updated
    }

    // ------------------------------------------------------------------
    // Indexing
    // ------------------------------------------------------------------

    /// Builds a named index over the field extracted by `selector`.
    ///
    /// Overwrites any existing index of the same name. The index stays
    /// valid until the next mutation.
    pub fn create_index<K, F>(&mut self, selector: F, name: &str)
    where
        F: Fn(&T) -> K,
        K: IntoIndexKey,
    {
        self.indexes.create_index(&self.store, selector, name);
        Logger::trace(
            Event::IndexCreated.as_str(),
            &[("index", name), ("table", &self.name)],
        );
    }

    /// Records matching `key` under the index named after the key
    /// type, building it on demand.
    ///
    /// Two different fields of the same key type collide on the
    /// derived name; use [`Table::get_by_index_named`] for tables that
    /// index several same-typed fields.
    pub fn get_by_index<K, Q, F>(&mut self, selector: F, key: Q) -> Vec<T>
    where
        F: Fn(&T) -> K,
        K: IntoIndexKey,
        Q: IntoIndexKey,
    {
        self.indexes.get_by_index(&self.store, selector, key)
    }

    /// Records matching `key` under the named index, building it on
    /// demand. Missing keys yield an empty result.
    pub fn get_by_index_named<K, Q, F>(&mut self, name: &str, selector: F, key: Q) -> Vec<T>
    where
        F: Fn(&T) -> K,
        K: IntoIndexKey,
        Q: IntoIndexKey,
    {
        self.indexes.get_by_index_named(&self.store, name, selector, key)
    }

    /// Clears all indexes; each is rebuilt lazily on its next lookup.
    pub fn rebuild_indexes(&mut self) {
        self.indexes.invalidate_all();
    }

    // ------------------------------------------------------------------
    // Sorting
    // ------------------------------------------------------------------

    /// Records ordered ascending by the field extracted by `selector`.
    ///
    /// `key_name` identifies the sort key for cache purposes: repeated
    /// calls with the same name and direction and no intervening
    /// mutation are served from the cache.
    pub fn order_by<K, F>(&mut self, key_name: &str, selector: F) -> Vec<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        self.sort_cache
            .order_by(&self.store, key_name, selector, SortDirection::Ascending)
            .to_vec()
    }

    /// Records ordered descending by the field extracted by
    /// `selector`. Same caching contract as [`Table::order_by`].
    pub fn order_by_descending<K, F>(&mut self, key_name: &str, selector: F) -> Vec<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        self.sort_cache
            .order_by(&self.store, key_name, selector, SortDirection::Descending)
            .to_vec()
    }

    /// Drops the cached ordering.
    pub fn clear_sort_cache(&mut self) {
        self.sort_cache.invalidate();
    }

    /// The `count` records with the largest keys, best first.
    pub fn top<K, F>(&mut self, key_name: &str, selector: F, count: usize) -> Vec<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        let mut sorted = self.order_by_descending(key_name, selector);
        sorted.truncate(count);
        sorted
    }

    /// The `count` records with the smallest keys, smallest first.
    pub fn bottom<K, F>(&mut self, key_name: &str, selector: F, count: usize) -> Vec<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        let mut sorted = self.order_by(key_name, selector);
        sorted.truncate(count);
        sorted
    }

    // ------------------------------------------------------------------
    // Queries (stateless, eager, bypass indexes and sort cache)
    // ------------------------------------------------------------------

    /// Records matching `predicate`, in insertion order.
    pub fn filter<P: Fn(&T) -> bool>(&self, predicate: P) -> Vec<T> {
        query::filter(self.records(), predicate)
    }

    /// First record matching `predicate`; fails with
    /// [`crate::query::QueryError::NotFound`] when nothing matches.
    pub fn first<P: Fn(&T) -> bool>(&self, predicate: P) -> QueryResult<T> {
        query::first(self.records(), predicate)
    }

    /// First record matching `predicate`, or `None`.
    pub fn first_or_default<P: Fn(&T) -> bool>(&self, predicate: P) -> Option<T> {
        query::first_or_default(self.records(), predicate)
    }

    /// Last record matching `predicate`, or `None`.
    pub fn last_or_default<P: Fn(&T) -> bool>(&self, predicate: P) -> Option<T> {
        query::last_or_default(self.records(), predicate)
    }

    /// Number of records matching `predicate`.
    pub fn count_matching<P: Fn(&T) -> bool>(&self, predicate: P) -> usize {
        query::count_matching(self.records(), predicate)
    }

    /// Whether any record matches `predicate`.
    pub fn any<P: Fn(&T) -> bool>(&self, predicate: P) -> bool {
        query::any(self.records(), predicate)
    }

    /// Whether every record matches `predicate`; vacuously true when
    /// empty.
    pub fn all<P: Fn(&T) -> bool>(&self, predicate: P) -> bool {
        query::all(self.records(), predicate)
    }

    /// Projects each record through `selector`.
    pub fn select<U, F: Fn(&T) -> U>(&self, selector: F) -> Vec<U> {
        query::select(self.records(), selector)
    }

    /// Sum of a numeric projection; zero when empty.
    pub fn sum<F: Fn(&T) -> f64>(&self, selector: F) -> f64 {
        query::sum(self.records(), selector)
    }

    /// Average of a numeric projection; fails on an empty table.
    pub fn average<F: Fn(&T) -> f64>(&self, selector: F) -> QueryResult<f64> {
        query::average(self.records(), selector)
    }

    /// Largest projected value; fails on an empty table.
    pub fn max_of<K: PartialOrd, F: Fn(&T) -> K>(&self, selector: F) -> QueryResult<K> {
        query::max_of(self.records(), selector)
    }

    /// Smallest projected value; fails on an empty table.
    pub fn min_of<K: PartialOrd, F: Fn(&T) -> K>(&self, selector: F) -> QueryResult<K> {
        query::min_of(self.records(), selector)
    }

    /// Distinct projected values in first-occurrence order.
    pub fn distinct<K: PartialEq, F: Fn(&T) -> K>(&self, selector: F) -> Vec<K> {
        query::distinct(self.records(), selector)
    }

    /// Groups records by projected key, keys in first-seen order.
    pub fn group_by<K: PartialEq, F: Fn(&T) -> K>(&self, selector: F) -> Vec<(K, Vec<T>)> {
        query::group_by(self.records(), selector)
    }

    /// Records whose projected value lies in `[min, max]`, inclusive.
    pub fn between<K: PartialOrd, F: Fn(&T) -> K>(&self, selector: F, min: K, max: K) -> Vec<T> {
        query::between(self.records(), selector, min, max)
    }

    /// Records whose projected text contains `text`, case-insensitive.
    pub fn contains_text<F: Fn(&T) -> String>(&self, selector: F, text: &str) -> Vec<T> {
        query::contains_text(self.records(), selector, text)
    }

    /// Records whose projected text contains `text`.
    pub fn contains_text_case<F: Fn(&T) -> String>(
        &self,
        selector: F,
        text: &str,
        case: CaseSensitivity,
    ) -> Vec<T> {
        query::contains_text_case(self.records(), selector, text, case)
    }

    /// Records whose projected text starts with `text`,
    /// case-insensitive.
    pub fn starts_with_text<F: Fn(&T) -> String>(&self, selector: F, text: &str) -> Vec<T> {
        query::starts_with_text(self.records(), selector, text)
    }

    /// Records whose projected text starts with `text`.
    pub fn starts_with_text_case<F: Fn(&T) -> String>(
        &self,
        selector: F,
        text: &str,
        case: CaseSensitivity,
    ) -> Vec<T> {
        query::starts_with_text_case(self.records(), selector, text, case)
    }

    /// Records whose projected text ends with `text`,
    /// case-insensitive.
    pub fn ends_with_text<F: Fn(&T) -> String>(&self, selector: F, text: &str) -> Vec<T> {
        query::ends_with_text(self.records(), selector, text)
    }

    /// Records whose projected text ends with `text`.
    pub fn ends_with_text_case<F: Fn(&T) -> String>(
        &self,
        selector: F,
        text: &str,
        case: CaseSensitivity,
    ) -> Vec<T> {
        query::ends_with_text_case(self.records(), selector, text, case)
    }

    /// Records on page `number` (1-based) of size `size`.
    pub fn get_page(&self, number: usize, size: usize) -> QueryResult<Vec<T>> {
        query::page(self.records(), number, size)
    }

    /// Number of pages of size `size`.
    pub fn get_page_count(&self, size: usize) -> QueryResult<usize> {
        query::page_count(self.len(), size)
    }

    /// A randomized copy of the full record sequence.
    pub fn shuffle(&self) -> Vec<T> {
        query::shuffle(self.records())
    }

    /// Up to `count` records chosen at random without replacement.
    pub fn sample(&self, count: usize) -> Vec<T> {
        query::sample(self.records(), count)
    }

    // ------------------------------------------------------------------
    // Conveniences
    // ------------------------------------------------------------------

    /// A map view keyed by the projected value. The first record wins
    /// on a duplicate key; later duplicates are skipped with a Warn
    /// log line.
    pub fn to_map<K, F>(&self, selector: F) -> HashMap<K, T>
    where
        K: Eq + Hash + Debug,
        F: Fn(&T) -> K,
    {
        let mut map = HashMap::new();
        for record in self.records() {
            let key = selector(record);
            if map.contains_key(&key) {
                let rendered = format!("{key:?}");
                Logger::warn(
                    Event::DuplicateKey.as_str(),
                    &[("key", rendered.as_str()), ("table", &self.name)],
                );
                continue;
            }
            map.insert(key, record.clone());
        }
        map
    }

    /// First record whose projected value equals `key`, by linear
    /// scan. No index is consulted or built.
    pub fn get_by_key<K, F>(&self, selector: F, key: &K) -> Option<T>
    where
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        self.records()
            .iter()
            .find(|record| selector(record) == *key)
            .cloned()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Loads the table through its adapter, then resets indexes.
    ///
    /// A table without an adapter initializes to its current (usually
    /// empty) contents.
    pub fn initialize(&mut self) -> AdapterResult<()> {
        self.deserialize()?;
        let records = self.len().to_string();
        Logger::info(
            Event::TableInitialized.as_str(),
            &[("records", records.as_str()), ("table", &self.name)],
        );
        Ok(())
    }

    /// Externalizes the current record snapshot through the adapter;
    /// no-op without one.
    pub fn serialize(&self) -> AdapterResult<()> {
        if let Some(adapter) = self.adapter.clone() {
            adapter.borrow_mut().serialize(self)?;
            let records = self.len().to_string();
            Logger::trace(
                Event::SerializeComplete.as_str(),
                &[("records", records.as_str()), ("table", &self.name)],
            );
        }
        Ok(())
    }

    /// Replaces the table's contents from the adapter, then resets
    /// indexes; no-op without an adapter.
    pub fn deserialize(&mut self) -> AdapterResult<()> {
        if let Some(adapter) = self.adapter.clone() {
            adapter.borrow_mut().deserialize(self)?;
            let records = self.len().to_string();
            Logger::trace(
                Event::DeserializeComplete.as_str(),
                &[("records", records.as_str()), ("table", &self.name)],
            );
        }
        self.rebuild_indexes();
        Ok(())
    }
}

/// Last path segment of the record type's name.
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
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

    fn sample_table() -> Table<Player> {
        let mut table = Table::named("players");
        table.add_record(player("Alice", 100));
        table.add_record(player("Bob", 250));
        table.add_record(player("Charlie", 75));
        table
    }

    #[test]
    fn test_default_name_is_record_type() {
        let table: Table<Player> = Table::new();
        assert_eq!(table.table_name(), "Player");
    }

    #[test]
    fn test_crud_roundtrip() {
        let mut table = sample_table();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get_record(1), Some(&player("Bob", 250)));

        table.update_record(0, player("Alice", 150));
        assert_eq!(table.get_record(0), Some(&player("Alice", 150)));

        assert_eq!(table.remove_record(2), Some(player("Charlie", 75)));
        assert_eq!(table.len(), 2);
        assert_eq!(table.remove_record(9), None);
    }

    #[test]
    fn test_mutation_invalidates_index() {
        let mut table = sample_table();
        table.create_index(|p: &Player| p.name.clone(), "name");

        table.add_record(player("Alice", 300));

        // Lazy rebuild must reflect the post-mutation state.
        let hits = table.get_by_index_named("name", |p: &Player| p.name.clone(), "Alice");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_bulk_remove_then_sort_reflects_change() {
        let mut table = sample_table();

        let descending = table.order_by_descending("score", |p| p.score);
        assert_eq!(descending[0].score, 250);

        let removed = table.remove_all(|p| p.score < 100);
        assert_eq!(removed, 1);

        let descending = table.order_by_descending("score", |p| p.score);
        let scores: Vec<i64> = descending.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![250, 100]);
    }

    #[test]
    fn test_update_all_counts_and_invalidates() {
        let mut table = sample_table();
        table.order_by("score", |p| p.score);

        let updated = table.update_all(
            |p| p.score >= 100,
            |p| Player {
                score: p.score + 1,
                ..p.clone()
            },
        );

        assert_eq!(updated, 2);
        let ascending = table.order_by("score", |p| p.score);
        let scores: Vec<i64> = ascending.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![75, 101, 251]);
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let table = sample_table();

        assert_eq!(table.count_matching(|p| p.score >= 100), 2);
        assert!(table.any(|p| p.name == "Bob"));
        assert!(table.all(|p| p.score > 0));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_first_contract_split() {
        let table = sample_table();

        assert!(table.first(|p| p.score > 1000).is_err());
        assert_eq!(table.first_or_default(|p| p.score > 1000), None);
        assert_eq!(
            table.first(|p| p.score > 200),
            Ok(player("Bob", 250))
        );
    }

    #[test]
    fn test_top_and_bottom() {
        let mut table = sample_table();

        let top = table.top("score", |p| p.score, 2);
        let top_scores: Vec<i64> = top.iter().map(|p| p.score).collect();
        assert_eq!(top_scores, vec![250, 100]);

        let bottom = table.bottom("score", |p| p.score, 1);
        assert_eq!(bottom[0].score, 75);
    }

    #[test]
    fn test_to_map_first_record_wins() {
        let mut table = sample_table();
        table.add_record(player("Alice", 999));

        let map = table.to_map(|p| p.name.clone());

        assert_eq!(map.len(), 3);
        assert_eq!(map["Alice"].score, 100);
    }

    #[test]
    fn test_get_by_key_linear() {
        let table = sample_table();

        assert_eq!(
            table.get_by_key(|p| p.name.clone(), &"Bob".to_string()),
            Some(player("Bob", 250))
        );
        assert_eq!(table.get_by_key(|p| p.name.clone(), &"Zed".to_string()), None);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut table = sample_table();
        table.create_index(|p: &Player| p.score, "score");
        table.order_by("score", |p| p.score);

        table.clear();

        assert!(table.is_empty());
        let hits = table.get_by_index_named("score", |p: &Player| p.score, 250i64);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_initialize_without_adapter() {
        let mut table = sample_table();
        assert!(table.initialize().is_ok());
        // Contents untouched without an adapter.
        assert_eq!(table.len(), 3);
    }
}
