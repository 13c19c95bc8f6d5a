//! Sort Cache for tabledb
//!
//! Memoizes the single most-recently-used ordering of a table's
//! records. A cached ordering is valid only while no mutation has
//! occurred since it was built (the table façade invalidates the cache
//! on every mutation) and only for the exact sort key and direction it
//! was built with; any mismatch forces a full re-sort and replaces the
//! slot.

use std::cmp::Ordering;

use crate::store::RecordStore;

/// Requested ordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest key first
    Ascending,
    /// Largest key first
    Descending,
}

#[derive(Debug)]
struct CachedOrder<T> {
    key: String,
    direction: SortDirection,
    records: Vec<T>,
}

/// Single-slot memoized ordering over a record store.
///
/// Sort keys are identified by a caller-chosen name, since Rust
/// closures carry no stable identity of their own. Two calls with the
/// same name are assumed to extract the same field.
#[derive(Debug)]
pub struct SortCache<T> {
    cached: Option<CachedOrder<T>>,
}

impl<T> Default for SortCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SortCache<T> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self { cached: None }
    }

    /// Drops any cached ordering.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Whether a cached ordering is currently held.
    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }
}

impl<T: Clone> SortCache<T> {
    /// The records ordered by `selector`, served from cache when the
    /// key name and direction both match the cached parameters.
    ///
    /// The sort is stable: ties keep their insertion order in either
    /// direction. Keys that do not compare (`partial_cmp` returning
    /// `None`) tie.
    pub fn order_by<K, F>(
        &mut self,
        store: &RecordStore<T>,
        key_name: &str,
        selector: F,
        direction: SortDirection,
    ) -> &[T]
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        let hit = self
            .cached
            .as_ref()
            .is_some_and(|c| c.key == key_name && c.direction == direction);

        if !hit {
            let mut records = store.records().to_vec();
            records.sort_by(|a, b| {
                let ordering = selector(a)
                    .partial_cmp(&selector(b))
                    .unwrap_or(Ordering::Equal);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
            self.cached = Some(CachedOrder {
                key: key_name.to_string(),
                direction,
                records,
            });
        }

        match &self.cached {
            Some(cached) => &cached.records,
            None => &[],
        }
    }
}
