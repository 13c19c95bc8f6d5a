//! In-memory and JSON-file adapters.
//!
//! `MemoryAdapter` keeps the snapshot in a plain `Vec`, which makes it
//! both the reference adapter for tests and a cheap way to seed a
//! table. `JsonFileAdapter` persists the snapshot as a JSON array of
//! records on disk.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::adapter::{AdapterResult, TableAdapter};
use crate::table::Table;

/// Holds the serialized snapshot in memory.
#[derive(Debug, Default)]
pub struct MemoryAdapter<T> {
    records: Vec<T>,
}

impl<T> MemoryAdapter<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Seeds the adapter with records to hand out on the next
    /// deserialize.
    pub fn with_records(records: Vec<T>) -> Self {
        Self { records }
    }

    /// The last snapshot handed to [`TableAdapter::serialize`].
    pub fn snapshot(&self) -> &[T] {
        &self.records
    }
}

impl<T: Clone> TableAdapter<T> for MemoryAdapter<T> {
    fn serialize(&mut self, table: &Table<T>) -> AdapterResult<()> {
        self.records = table.records().to_vec();
        Ok(())
    }

    fn deserialize(&mut self, table: &mut Table<T>) -> AdapterResult<()> {
        table.clear();
        table.add_range(self.records.iter().cloned());
        Ok(())
    }
}

/// Persists the snapshot as a JSON array at a fixed path.
#[derive(Debug)]
pub struct JsonFileAdapter<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonFileAdapter<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl<T> TableAdapter<T> for JsonFileAdapter<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    fn serialize(&mut self, table: &Table<T>) -> AdapterResult<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, table.records())?;
        writer.flush()?;
        Ok(())
    }

    /// A missing file is treated as an empty-but-valid snapshot with
    /// no records to load, so a fresh table initializes cleanly.
    fn deserialize(&mut self, table: &mut Table<T>) -> AdapterResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let file = File::open(&self.path)?;
        let records: Vec<T> = serde_json::from_reader(BufReader::new(file))?;
        table.clear();
        table.add_range(records);
        Ok(())
    }
}
