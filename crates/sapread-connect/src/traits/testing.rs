//! Testing utilities for connectors
//!
//! [`MockSession`] is an in-memory stand-in for a connected ERPL session:
//! tables, field metadata and rows are declared up front, and failures can
//! be injected at the ping, the metadata queries or part-way through a scan.
//!
//! # Example
//!
//! ```rust
//! use sapread_connect::connectors::sap::discover_catalog;
//! use sapread_connect::testing::{field, MockSession};
//!
//! let session = MockSession::new()
//!     .with_table("T1", "First", vec![field("ID", "Key", "INT4", "10", "0")])
//!     .with_table("T2", "Second", vec![field("ID", "Key", "INT4", "10", "0")]);
//!
//! let catalog = discover_catalog(&session, "T*").unwrap();
//! assert_eq!(catalog.stream_names().collect::<Vec<_>>(), ["T1", "T2"]);
//! ```

use std::cell::Cell;
use std::rc::Rc;

use serde_json::Value;

use crate::connectors::sap::session::{
    ErpSession, FieldEntry, RowIter, RowValues, TableEntry, TableScan,
};
use crate::error::{ConnectorError, Result};

/// Build a field metadata entry. Positions are assigned by
/// [`MockSession::with_table`].
pub fn field(name: &str, text: &str, type_tag: &str, length: &str, decimals: &str) -> FieldEntry {
    FieldEntry {
        position: String::new(),
        name: name.to_string(),
        text: text.to_string(),
        type_tag: type_tag.to_string(),
        length: length.to_string(),
        decimals: decimals.to_string(),
    }
}

#[derive(Debug, Clone)]
struct MockTable {
    entry: TableEntry,
    fields: Vec<FieldEntry>,
    columns: Rc<[String]>,
    rows: Vec<Vec<Value>>,
    fail_after: Option<usize>,
}

/// An in-memory ERP session for tests
#[derive(Debug, Default)]
pub struct MockSession {
    tables: Vec<MockTable>,
    ping_error: Option<String>,
    directory_error: Option<String>,
    scans_opened: Cell<usize>,
}

impl MockSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a table with its field metadata.
    ///
    /// The scan's columns default to the field names.
    pub fn with_table(mut self, name: &str, text: &str, fields: Vec<FieldEntry>) -> Self {
        let fields: Vec<FieldEntry> = fields
            .into_iter()
            .enumerate()
            .map(|(idx, mut f)| {
                f.position = format!("{:04}", idx + 1);
                f
            })
            .collect();
        let columns: Rc<[String]> = fields.iter().map(|f| f.name.clone()).collect();

        self.tables.push(MockTable {
            entry: TableEntry::new(name, text, "TRANSP"),
            fields,
            columns,
            rows: Vec::new(),
            fail_after: None,
        });
        self
    }

    /// Set the rows a scan of `table` returns
    pub fn with_rows(mut self, table: &str, rows: Vec<Vec<Value>>) -> Self {
        if let Some(t) = self.table_mut(table) {
            t.rows = rows;
        }
        self
    }

    /// Override the scan's column names for `table`
    pub fn with_columns(mut self, table: &str, columns: &[&str]) -> Self {
        if let Some(t) = self.table_mut(table) {
            t.columns = columns.iter().map(|c| c.to_string()).collect();
        }
        self
    }

    /// Make the scan of `table` fail after yielding `rows` rows
    pub fn fail_after(mut self, table: &str, rows: usize) -> Self {
        if let Some(t) = self.table_mut(table) {
            t.fail_after = Some(rows);
        }
        self
    }

    /// Make the ping probe fail
    pub fn fail_ping(mut self, message: impl Into<String>) -> Self {
        self.ping_error = Some(message.into());
        self
    }

    /// Make the table directory query fail
    pub fn fail_directory(mut self, message: impl Into<String>) -> Self {
        self.directory_error = Some(message.into());
        self
    }

    /// Number of scans opened so far
    pub fn scans_opened(&self) -> usize {
        self.scans_opened.get()
    }

    fn table(&self, name: &str) -> Option<&MockTable> {
        self.tables.iter().find(|t| t.entry.name == name)
    }

    fn table_mut(&mut self, name: &str) -> Option<&mut MockTable> {
        self.tables.iter_mut().find(|t| t.entry.name == name)
    }
}

/// Match a table name against a selection where `*` is a wildcard
fn matches_selection(pattern: &str, name: &str) -> bool {
    match pattern.split_once('*') {
        None => pattern == name,
        Some((prefix, rest)) => {
            let Some(tail) = name.strip_prefix(prefix) else {
                return false;
            };
            (0..=tail.len())
                .filter(|&i| tail.is_char_boundary(i))
                .any(|i| matches_selection(rest, &tail[i..]))
        }
    }
}

impl ErpSession for MockSession {
    type Scan<'a> = MockScan<'a>;

    fn ping(&self) -> Result<()> {
        match &self.ping_error {
            Some(msg) => Err(ConnectorError::connection(msg.clone())),
            None => Ok(()),
        }
    }

    fn show_tables(&self, selection: &str) -> Result<Vec<TableEntry>> {
        if let Some(msg) = &self.directory_error {
            return Err(ConnectorError::discovery(msg.clone()));
        }
        Ok(self
            .tables
            .iter()
            .filter(|t| matches_selection(selection, &t.entry.name))
            .map(|t| t.entry.clone())
            .collect())
    }

    fn describe_fields(&self, table: &str) -> Result<Vec<FieldEntry>> {
        self.table(table)
            .map(|t| t.fields.clone())
            .ok_or_else(|| ConnectorError::discovery(format!("table {} does not exist", table)))
    }

    fn open_scan(&self, table: &str) -> Result<MockScan<'_>> {
        let found = self
            .table(table)
            .ok_or_else(|| ConnectorError::read(table, "table does not exist"))?;
        self.scans_opened.set(self.scans_opened.get() + 1);
        Ok(MockScan { table: found })
    }
}

/// Scan over a [`MockSession`] table
#[derive(Debug)]
pub struct MockScan<'a> {
    table: &'a MockTable,
}

impl TableScan for MockScan<'_> {
    fn rows(&mut self) -> Result<RowIter<'_>> {
        let table = self.table;
        let limit = table.fail_after.unwrap_or(usize::MAX);

        let rows = table.rows.iter().take(limit).map(move |values| {
            Ok(RowValues {
                columns: Rc::clone(&table.columns),
                values: values.clone(),
            })
        });
        let failure = table.fail_after.map(move |_| {
            Err(ConnectorError::read(
                &table.entry.name,
                "RFC_COMMUNICATION_FAILURE",
            ))
        });

        Ok(Box::new(rows.chain(failure)))
    }
}
