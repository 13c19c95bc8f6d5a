//! Delimited-sheet adapter.
//!
//! Persists records as a header row plus one delimited line per
//! record. The mapping between columns and record fields is spelled
//! out explicitly through a [`FieldMap`]: each column names itself and
//! carries a getter and a setter, so nothing about the record layout
//! is inferred.
//!
//! Cells are written verbatim with no quoting. A cell value containing
//! the delimiter or a newline cannot be represented and is rejected at
//! serialize time.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::adapter::{AdapterError, AdapterResult, TableAdapter};
use crate::table::Table;

/// One sheet column bound to one record field.
struct FieldColumn<T> {
    name: &'static str,
    get: fn(&T) -> String,
    set: fn(&mut T, &str) -> Result<(), String>,
}

/// An explicit, ordered column-to-field mapping.
pub struct FieldMap<T> {
    columns: Vec<FieldColumn<T>>,
}

impl<T> Default for FieldMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FieldMap<T> {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Adds a column, builder style. Column order here is the write
    /// order of the sheet.
    pub fn column(
        mut self,
        name: &'static str,
        get: fn(&T) -> String,
        set: fn(&mut T, &str) -> Result<(), String>,
    ) -> Self {
        self.columns.push(FieldColumn { name, get, set });
        self
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }
}

/// Persists records as delimiter-separated lines under a header row.
pub struct SheetAdapter<T> {
    path: PathBuf,
    delimiter: char,
    fields: FieldMap<T>,
}

impl<T> SheetAdapter<T> {
    /// Tab-delimited adapter at `path`.
    pub fn new(path: impl Into<PathBuf>, fields: FieldMap<T>) -> Self {
        Self {
            path: path.into(),
            delimiter: '\t',
            fields,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn header(&self) -> String {
        let names: Vec<&str> = self.fields.columns.iter().map(|c| c.name).collect();
        names.join(&self.delimiter.to_string())
    }

    fn render_cell(&self, value: String, line: usize, name: &str) -> AdapterResult<String> {
        if value.contains(self.delimiter) || value.contains('\n') || value.contains('\r') {
            return Err(AdapterError::Parse {
                line,
                reason: format!("cell '{name}' contains the delimiter or a line break"),
            });
        }
        Ok(value)
    }
}

impl<T> TableAdapter<T> for SheetAdapter<T>
where
    T: Default + Clone,
{
    fn serialize(&mut self, table: &Table<T>) -> AdapterResult<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", self.header())?;

        let delimiter = self.delimiter.to_string();
        for (row, record) in table.records().iter().enumerate() {
            let mut cells = Vec::with_capacity(self.fields.columns.len());
            for column in &self.fields.columns {
                // Data rows start on line 2, under the header.
                let cell = self.render_cell((column.get)(record), row + 2, column.name)?;
                cells.push(cell);
            }
            writeln!(writer, "{}", cells.join(&delimiter))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn deserialize(&mut self, table: &mut Table<T>) -> AdapterResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let file = File::open(&self.path)?;
        let mut lines = BufReader::new(file).lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                // Empty file: a valid snapshot with no records.
                table.clear();
                return Ok(());
            }
        };

        // Column order in the file is authoritative; each header cell
        // must name a mapped column.
        let mut layout = Vec::new();
        for name in header.split(self.delimiter) {
            match self.fields.position_of(name) {
                Some(position) => layout.push(position),
                None => {
                    return Err(AdapterError::Parse {
                        line: 1,
                        reason: format!("unknown column '{name}'"),
                    })
                }
            }
        }

        let mut records = Vec::new();
        for (offset, line) in lines.enumerate() {
            let line = line?;
            let number = offset + 2;
            if line.is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split(self.delimiter).collect();
            if cells.len() != layout.len() {
                return Err(AdapterError::Parse {
                    line: number,
                    reason: format!(
                        "expected {} cells, found {}",
                        layout.len(),
                        cells.len()
                    ),
                });
            }
            let mut record = T::default();
            for (cell, &position) in cells.iter().zip(&layout) {
                let column = &self.fields.columns[position];
                (column.set)(&mut record, cell).map_err(|reason| AdapterError::Parse {
                    line: number,
                    reason: format!("column '{}': {reason}", column.name),
                })?;
            }
            records.push(record);
        }

        table.clear();
        table.add_range(records);
        Ok(())
    }
}
