//! Adapter error types
//!
//! Adapters own the persistence I/O; everything that can go wrong on a
//! round-trip surfaces here.

use thiserror::Error;

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Errors raised while externalizing or loading a table snapshot
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Underlying file or stream I/O failed
    #[error("adapter I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A sheet row could not be parsed into a record
    #[error("parse error at line {line}: {reason}")]
    Parse {
        /// 1-based line number in the sheet
        line: usize,
        /// What went wrong with the cell or row
        reason: String,
    },
}
