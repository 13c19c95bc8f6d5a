//! Table catalog
//!
//! A registry of heterogeneously-typed tables addressed by name. The
//! catalog owns its tables; callers hold the catalog (usually one per
//! application) and borrow tables back out through typed downcasts.
//! There is no global instance: whoever needs the catalog receives it
//! explicitly.

use std::any::Any;
use std::collections::HashMap;

use crate::adapter::AdapterResult;
use crate::observability::{Event, Logger};
use crate::table::Table;

/// The type-erased view the catalog keeps of each registered table.
pub trait TableEntry {
    /// The table's registered name.
    fn table_name(&self) -> &str;

    /// Loads the table through its adapter and resets its indexes.
    fn initialize(&mut self) -> AdapterResult<()>;

    /// Current number of records.
    fn record_count(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Clone + 'static> TableEntry for Table<T> {
    fn table_name(&self) -> &str {
        Table::table_name(self)
    }

    fn initialize(&mut self) -> AdapterResult<()> {
        Table::initialize(self)
    }

    fn record_count(&self) -> usize {
        self.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Named registry of tables, preserving registration order.
#[derive(Default)]
pub struct Catalog {
    order: Vec<String>,
    tables: HashMap<String, Box<dyn TableEntry>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table under its own name; returns whether it was
    /// accepted. Registering a second table under an occupied name is
    /// a warned no-op: the first registration stays.
    pub fn register<T: Clone + 'static>(&mut self, table: Table<T>) -> bool {
        let name = table.table_name().to_string();
        if self.tables.contains_key(&name) {
            Logger::warn(Event::DuplicateTable.as_str(), &[("table", name.as_str())]);
            return false;
        }
        Logger::info(Event::TableRegistered.as_str(), &[("table", name.as_str())]);
        self.order.push(name.clone());
        self.tables.insert(name, Box::new(table));
        true
    }

    /// Drops the named table; returns whether one was registered.
    pub fn remove(&mut self, name: &str) -> bool {
        if self.tables.remove(name).is_none() {
            return false;
        }
        self.order.retain(|registered| registered != name);
        Logger::info(Event::TableRemoved.as_str(), &[("table", name)]);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drops every registered table.
    pub fn clear(&mut self) {
        self.order.clear();
        self.tables.clear();
    }

    /// Registered names, oldest first.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Type-erased view of the named table.
    pub fn get(&self, name: &str) -> Option<&dyn TableEntry> {
        self.tables.get(name).map(|entry| &**entry)
    }

    /// Mutable type-erased view of the named table.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn TableEntry + 'static)> {
        self.tables.get_mut(name).map(|entry| &mut **entry)
    }

    /// The named table, downcast to its record type. `None` when the
    /// name is unregistered or the record type does not match.
    pub fn get_table<T: Clone + 'static>(&self, name: &str) -> Option<&Table<T>> {
        self.tables
            .get(name)
            .and_then(|entry| entry.as_any().downcast_ref())
    }

    /// Mutable counterpart of [`Catalog::get_table`].
    pub fn get_table_mut<T: Clone + 'static>(&mut self, name: &str) -> Option<&mut Table<T>> {
        self.tables
            .get_mut(name)
            .and_then(|entry| entry.as_any_mut().downcast_mut())
    }

    /// Initializes every table in registration order, stopping at the
    /// first adapter failure.
    pub fn initialize_all(&mut self) -> AdapterResult<()> {
        for name in &self.order {
            if let Some(entry) = self.tables.get_mut(name) {
                entry.initialize()?;
            }
        }
        Ok(())
    }
}
