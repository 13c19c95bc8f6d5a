//! Record Store for tabledb
//!
//! The ordered, mutable collection of records backing a table.
//! Identity is positional: a record's id is its index in the sequence,
//! and captured positions are only stable between mutations.
//!
//! Out-of-range positions are never errors. `get`, `remove_at` and
//! `update_at` degrade to `None`/`false`, and callers must treat an
//! absent record as a valid outcome.
//!
//! Every mutating operation reports whether the store actually changed
//! through its return value. The table façade is the sole consumer of
//! that signal and runs exactly one invalidation pass over the index
//! manager and sort cache per mutating call.

/// Ordered sequence of records of a single type.
///
/// Insertion order is preserved. Duplicate field values and duplicate
/// identical records are both permitted; the store enforces no
/// uniqueness constraint.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    records: Vec<T>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecordStore<T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Returns the record at `position`, or `None` if out of range.
    pub fn get(&self, position: usize) -> Option<&T> {
        self.records.get(position)
    }

    /// Appends a record. Always changes the store.
    pub fn add(&mut self, record: T) -> bool {
        self.records.push(record);
        true
    }

    /// Removes and returns the record at `position`.
    ///
    /// Returns `None` for out-of-range positions without touching the
    /// store. Records after `position` shift down by one.
    pub fn remove_at(&mut self, position: usize) -> Option<T> {
        if position < self.records.len() {
            Some(self.records.remove(position))
        } else {
            None
        }
    }

    /// Replaces the record at `position`.
    ///
    /// Returns `false` for out-of-range positions without touching the
    /// store.
    pub fn update_at(&mut self, position: usize, record: T) -> bool {
        match self.records.get_mut(position) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Removes all records. Returns `false` if the store was already
    /// empty.
    pub fn clear(&mut self) -> bool {
        if self.records.is_empty() {
            return false;
        }
        self.records.clear();
        true
    }

    /// Removes every record matching `predicate`, preserving the order
    /// of survivors. Returns the number removed.
    pub fn remove_matching<P: Fn(&T) -> bool>(&mut self, predicate: P) -> usize {
        let before = self.records.len();
        self.records.retain(|record| !predicate(record));
        before - self.records.len()
    }

    /// Rewrites every record matching `predicate` through `update_fn`,
    /// in place. Returns the number rewritten.
    pub fn update_matching<P, U>(&mut self, predicate: P, update_fn: U) -> usize
    where
        P: Fn(&T) -> bool,
        U: Fn(&T) -> T,
    {
        let mut updated = 0;
        for record in &mut self.records {
            if predicate(record) {
                *record = update_fn(record);
                updated += 1;
            }
        }
        updated
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record in insertion order, if any.
    pub fn first(&self) -> Option<&T> {
        self.records.first()
    }

    /// Last record in insertion order, if any.
    pub fn last(&self) -> Option<&T> {
        self.records.last()
    }

    /// The full record sequence in insertion order.
    pub fn records(&self) -> &[T] {
        &self.records
    }
}

impl<T: PartialEq> RecordStore<T> {
    /// Position of the first record equal to `record`.
    ///
    /// The position is only stable until the next mutation.
    pub fn index_of(&self, record: &T) -> Option<usize> {
        self.records.iter().position(|r| r == record)
    }

    /// Whether any record equals `record`.
    pub fn contains(&self, record: &T) -> bool {
        self.records.iter().any(|r| r == record)
    }
}
