//! Secondary indexing subsystem
//!
//! Field-value indexes over a record store: erased keys, one
//! `BTreeMap` per named index, and the manager that builds, looks up
//! and invalidates them.

mod field_index;
mod key;
mod manager;

pub use field_index::FieldIndex;
pub use key::{IndexKey, IntoIndexKey};
pub use manager::{default_index_name, IndexManager};
