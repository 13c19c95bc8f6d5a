//! Pagination
//!
//! 1-based pages over the insertion-ordered record sequence. A page
//! past the end is empty, not an error; a zero page size or zero page
//! number is a programming error and fails fast.

use super::errors::{QueryError, QueryResult};

/// Records on page `number` (1-based) of size `size`.
pub fn page<T: Clone>(records: &[T], number: usize, size: usize) -> QueryResult<Vec<T>> {
    if size == 0 {
        return Err(QueryError::InvalidArgument(
            "page size must be greater than zero".to_string(),
        ));
    }
    if number == 0 {
        return Err(QueryError::InvalidArgument(
            "page numbers are 1-based".to_string(),
        ));
    }

    Ok(records
        .iter()
        .skip((number - 1) * size)
        .take(size)
        .cloned()
        .collect())
}

/// Number of pages of size `size` needed for `len` records.
pub fn page_count(len: usize, size: usize) -> QueryResult<usize> {
    if size == 0 {
        return Err(QueryError::InvalidArgument(
            "page size must be greater than zero".to_string(),
        ));
    }
    Ok(len.div_ceil(size))
}
