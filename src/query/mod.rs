//! Query layer for tabledb
//!
//! Stateless predicate, projection and aggregate operations over the
//! current record sequence. Nothing here mutates the store or touches
//! the index manager and sort cache; results are eagerly materialized
//! into owned vectors, so no iterator borrows the store across a later
//! mutation.

mod errors;
pub mod page;
pub mod text;

pub use errors::{QueryError, QueryResult};
pub use page::{page, page_count};
pub use text::{
    contains_text, contains_text_case, ends_with_text, ends_with_text_case, starts_with_text,
    starts_with_text_case, CaseSensitivity,
};

use std::cmp::Ordering;

use rand::seq::SliceRandom;

/// Records matching `predicate`, in insertion order.
pub fn filter<T, P>(records: &[T], predicate: P) -> Vec<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    records.iter().filter(|r| predicate(r)).cloned().collect()
}

/// First record matching `predicate`.
///
/// This is the one query operation with a hard failure path: no match
/// is a [`QueryError::NotFound`], unlike [`first_or_default`].
pub fn first<T, P>(records: &[T], predicate: P) -> QueryResult<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    records
        .iter()
        .find(|r| predicate(r))
        .cloned()
        .ok_or(QueryError::NotFound)
}

/// First record matching `predicate`, or `None`.
pub fn first_or_default<T, P>(records: &[T], predicate: P) -> Option<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    records.iter().find(|r| predicate(r)).cloned()
}

/// Last record matching `predicate`, or `None`.
pub fn last_or_default<T, P>(records: &[T], predicate: P) -> Option<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    records.iter().rev().find(|r| predicate(r)).cloned()
}

/// Number of records matching `predicate`.
pub fn count_matching<T, P>(records: &[T], predicate: P) -> usize
where
    P: Fn(&T) -> bool,
{
    records.iter().filter(|r| predicate(r)).count()
}

/// Whether any record matches `predicate`.
pub fn any<T, P>(records: &[T], predicate: P) -> bool
where
    P: Fn(&T) -> bool,
{
    records.iter().any(|r| predicate(r))
}

/// Whether every record matches `predicate`. Vacuously true on an
/// empty sequence.
pub fn all<T, P>(records: &[T], predicate: P) -> bool
where
    P: Fn(&T) -> bool,
{
    records.iter().all(|r| predicate(r))
}

/// Projects each record through `selector`.
pub fn select<T, U, F>(records: &[T], selector: F) -> Vec<U>
where
    F: Fn(&T) -> U,
{
    records.iter().map(selector).collect()
}

/// Sum of a numeric projection. Zero on an empty sequence.
pub fn sum<T, F>(records: &[T], selector: F) -> f64
where
    F: Fn(&T) -> f64,
{
    records.iter().map(selector).sum()
}

/// Average of a numeric projection.
///
/// Fails with [`QueryError::EmptyCollection`] on zero records, since
/// no sensible value exists.
pub fn average<T, F>(records: &[T], selector: F) -> QueryResult<f64>
where
    F: Fn(&T) -> f64,
{
    if records.is_empty() {
        return Err(QueryError::EmptyCollection);
    }
    Ok(sum(records, selector) / records.len() as f64)
}

/// Largest projected value.
///
/// Fails with [`QueryError::EmptyCollection`] on zero records.
/// Incomparable values tie and the earlier one wins.
pub fn max_of<T, K, F>(records: &[T], selector: F) -> QueryResult<K>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut iter = records.iter();
    let mut best = selector(iter.next().ok_or(QueryError::EmptyCollection)?);
    for record in iter {
        let key = selector(record);
        if key.partial_cmp(&best) == Some(Ordering::Greater) {
            best = key;
        }
    }
    Ok(best)
}

/// Smallest projected value.
///
/// Fails with [`QueryError::EmptyCollection`] on zero records.
pub fn min_of<T, K, F>(records: &[T], selector: F) -> QueryResult<K>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut iter = records.iter();
    let mut best = selector(iter.next().ok_or(QueryError::EmptyCollection)?);
    for record in iter {
        let key = selector(record);
        if key.partial_cmp(&best) == Some(Ordering::Less) {
            best = key;
        }
    }
    Ok(best)
}

/// Distinct projected values in first-occurrence order.
pub fn distinct<T, K, F>(records: &[T], selector: F) -> Vec<K>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut values: Vec<K> = Vec::new();
    for record in records {
        let value = selector(record);
        if !values.contains(&value) {
            values.push(value);
        }
    }
    values
}

/// Groups records by projected key, keys in first-seen order.
///
/// A linear key scan keeps the output deterministic without an `Ord`
/// or `Hash` bound on the key.
pub fn group_by<T, K, F>(records: &[T], selector: F) -> Vec<(K, Vec<T>)>
where
    T: Clone,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for record in records {
        let key = selector(record);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(record.clone()),
            None => groups.push((key, vec![record.clone()])),
        }
    }
    groups
}

/// Records whose projected value lies in `[min, max]`, inclusive on
/// both ends.
pub fn between<T, K, F>(records: &[T], selector: F, min: K, max: K) -> Vec<T>
where
    T: Clone,
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    records
        .iter()
        .filter(|r| {
            let value = selector(r);
            value >= min && value <= max
        })
        .cloned()
        .collect()
}

/// A randomized copy of the full sequence.
pub fn shuffle<T: Clone>(records: &[T]) -> Vec<T> {
    let mut shuffled = records.to_vec();
    shuffled.shuffle(&mut rand::thread_rng());
    shuffled
}

/// Up to `count` records chosen at random without replacement.
pub fn sample<T: Clone>(records: &[T], count: usize) -> Vec<T> {
    records
        .choose_multiple(&mut rand::thread_rng(), count)
        .cloned()
        .collect()
}
