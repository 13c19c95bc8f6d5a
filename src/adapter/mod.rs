//! Table adapters
//!
//! The narrow contract between a table and whatever persisted
//! representation its records live in. The engine never inspects the
//! wire format: it hands the adapter a record snapshot to externalize,
//! or lets the adapter replace the table's contents wholesale.
//!
//! Adapters are referenced, not owned, by tables: one adapter value
//! can be shared between tables of a compatible record type through
//! [`SharedAdapter`]. The engine is single threaded, so plain
//! `Rc<RefCell<...>>` sharing applies.

mod errors;
mod json;
mod sheet;

pub use errors::{AdapterError, AdapterResult};
pub use json::{JsonFileAdapter, MemoryAdapter};
pub use sheet::{FieldMap, SheetAdapter};

use std::cell::RefCell;
use std::rc::Rc;

use crate::table::Table;

/// Converts a table's records to and from a persisted representation.
pub trait TableAdapter<T> {
    /// Externalizes the table's current record snapshot.
    fn serialize(&mut self, table: &Table<T>) -> AdapterResult<()>;

    /// Replaces the table's contents from the persisted snapshot.
    fn deserialize(&mut self, table: &mut Table<T>) -> AdapterResult<()>;
}

/// A shared, substitutable adapter handle.
pub type SharedAdapter<T> = Rc<RefCell<dyn TableAdapter<T>>>;

/// Wraps an adapter value into a [`SharedAdapter`] handle.
pub fn shared<T, A: TableAdapter<T> + 'static>(adapter: A) -> SharedAdapter<T> {
    Rc::new(RefCell::new(adapter))
}
