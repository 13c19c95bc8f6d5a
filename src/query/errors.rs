//! Query error types
//!
//! Almost every query operation degrades to an empty result or a
//! default value; the variants here cover the few explicit failure
//! paths the query contract defines.

use thiserror::Error;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised by query operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// `first` found no matching record. The degrading counterpart is
    /// `first_or_default`.
    #[error("no record matched the predicate")]
    NotFound,

    /// An aggregate was requested over zero records and no sensible
    /// value exists (average, max, min).
    #[error("operation is undefined on an empty record set")]
    EmptyCollection,

    /// A caller-supplied argument is invalid (e.g. a zero page size).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
