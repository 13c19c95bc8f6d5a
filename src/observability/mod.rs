//! Observability for tabledb
//!
//! Structured logging for the table engine:
//! - one JSON line per event
//! - deterministic key ordering
//! - synchronous, no buffering, read-only with respect to execution
//!
//! # Usage
//!
//! ```ignore
//! use tabledb::observability::{Event, Logger};
//!
//! Logger::warn(Event::DuplicateTable.as_str(), &[("table", "players")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
