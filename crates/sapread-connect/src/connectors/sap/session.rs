//! ERPL sessions
//!
//! A session is a DuckDB connection with the ERPL extension loaded and the
//! SAP logon parameters applied. Discovery and reads only see the
//! [`ErpSession`] trait, so they run unchanged against the in-memory session
//! used in tests.
//!
//! ```text
//! DuckDbSession::connect
//!   ├── open in-memory DB (allow_unsigned_extensions)
//!   ├── SET custom_extension_repository
//!   ├── INSTALL / LOAD <extension>
//!   └── SET sap_ashost / sap_sysnr / sap_user / sap_password / sap_client / sap_lang
//! ```

use std::rc::Rc;

use duckdb::types::Value;
use duckdb::{Connection, Statement};
use tracing::{debug, info};

use super::config::SapReadTableConfig;
use super::value::{value_to_json, value_to_text};
use crate::error::{ConnectorError, Result};

/// One row of the table directory (`sap_show_tables`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    /// Technical table name
    pub name: String,
    /// Display text
    pub text: String,
    /// Table category
    pub table_type: String,
}

impl TableEntry {
    pub fn new(
        name: impl Into<String>,
        text: impl Into<String>,
        table_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            table_type: table_type.into(),
        }
    }
}

/// One row of field metadata (`sap_describe_fields`)
///
/// Length and decimals stay as the raw text the extension reports; the
/// schema builder parses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub position: String,
    pub name: String,
    pub text: String,
    pub type_tag: String,
    pub length: String,
    pub decimals: String,
}

/// Column names and values of one fetched row
#[derive(Debug, Clone, PartialEq)]
pub struct RowValues {
    pub columns: Rc<[String]>,
    pub values: Vec<serde_json::Value>,
}

/// Pull-based iterator over fetched rows
pub type RowIter<'a> = Box<dyn Iterator<Item = Result<RowValues>> + 'a>;

/// A prepared row fetch for one table
pub trait TableScan {
    /// Execute the fetch and iterate its rows lazily
    fn rows(&mut self) -> Result<RowIter<'_>>;
}

/// Operations the connector needs from a connected ERP session
pub trait ErpSession {
    type Scan<'a>: TableScan
    where
        Self: 'a;

    /// Lightweight round trip to the remote system
    fn ping(&self) -> Result<()>;

    /// Tables matching a selection pattern
    fn show_tables(&self, selection: &str) -> Result<Vec<TableEntry>>;

    /// Field metadata for a table, in position order
    fn describe_fields(&self, table: &str) -> Result<Vec<FieldEntry>>;

    /// Prepare a full scan of a table
    fn open_scan(&self, table: &str) -> Result<Self::Scan<'_>>;
}

/// Quote a value as a SQL string literal
pub fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Quote a value as a SQL identifier
pub fn sql_identifier(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// The `SET` statements applying the SAP logon parameters.
///
/// Contains the password in clear text: never log the result.
fn logon_statements(config: &SapReadTableConfig) -> String {
    [
        ("sap_ashost", config.sap_ashost.as_str()),
        ("sap_sysnr", config.sap_sysnr.as_str()),
        ("sap_user", config.sap_user.as_str()),
        ("sap_password", config.sap_password.expose_secret()),
        ("sap_client", config.sap_client.as_str()),
        ("sap_lang", config.sap_lang.as_str()),
    ]
    .iter()
    .map(|(name, value)| format!("SET {} = {};", name, sql_literal(value)))
    .collect::<Vec<_>>()
    .join("\n")
}

/// DuckDB connection with the ERPL extension loaded
pub struct DuckDbSession {
    conn: Connection,
}

impl DuckDbSession {
    /// Open a session and apply the configuration. Single attempt.
    pub fn connect(config: &SapReadTableConfig) -> Result<Self> {
        info!("Creating DuckDB connection with ERPL extension loaded");
        config.log_parameters();

        let db_config = duckdb::Config::default()
            .allow_unsigned_extensions()
            .map_err(connection_error)?;
        let conn = Connection::open_in_memory_with_flags(db_config).map_err(connection_error)?;

        conn.execute_batch(&format!(
            "SET custom_extension_repository = {};",
            sql_literal(&config.custom_extension_repository)
        ))
        .map_err(connection_error)?;

        let extension = sql_identifier(&config.extension_name);
        conn.execute_batch(&format!("INSTALL {ext}; LOAD {ext};", ext = extension))
            .map_err(connection_error)?;
        debug!(extension = %config.extension_name, "ERPL extension loaded");

        conn.execute_batch(&logon_statements(config))
            .map_err(connection_error)?;

        Ok(Self { conn })
    }

    fn query_metadata<T>(&self, sql: &str, map: impl Fn(&[Value]) -> T) -> Result<Vec<T>> {
        debug!(sql = %sql, "Executing metadata query");
        let mut stmt = self.conn.prepare(sql).map_err(discovery_error)?;
        let rows = stmt
            .query_map([], |row| {
                let width = row.as_ref().column_count();
                (0..width)
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<duckdb::Result<Vec<Value>>>()
            })
            .map_err(discovery_error)?;

        let mut entries = Vec::new();
        for row in rows {
            let values = row.map_err(discovery_error)?;
            entries.push(map(&values));
        }
        Ok(entries)
    }
}

impl ErpSession for DuckDbSession {
    type Scan<'a> = DuckDbScan<'a>;

    fn ping(&self) -> Result<()> {
        self.conn
            .execute_batch("PRAGMA sap_rfc_ping")
            .map_err(connection_error)
    }

    fn show_tables(&self, selection: &str) -> Result<Vec<TableEntry>> {
        let sql = format!(
            "SELECT * FROM sap_show_tables(TABLENAME={}) ORDER BY 1",
            sql_literal(selection)
        );
        self.query_metadata(&sql, |values| TableEntry {
            name: text_at(values, 0),
            text: text_at(values, 1),
            table_type: text_at(values, 2),
        })
    }

    fn describe_fields(&self, table: &str) -> Result<Vec<FieldEntry>> {
        let sql = format!(
            "SELECT * FROM sap_describe_fields({}) ORDER BY 1",
            sql_literal(table)
        );
        self.query_metadata(&sql, |values| FieldEntry {
            position: text_at(values, 0),
            name: text_at(values, 2),
            text: text_at(values, 3),
            type_tag: text_at(values, 4),
            length: text_at(values, 5),
            decimals: text_at(values, 6),
        })
    }

    fn open_scan(&self, table: &str) -> Result<DuckDbScan<'_>> {
        let sql = format!("SELECT * FROM sap_read_table({})", sql_literal(table));
        debug!(sql = %sql, "Preparing table scan");
        let stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| ConnectorError::read(table, e.to_string()))?;
        Ok(DuckDbScan {
            table: table.to_string(),
            stmt,
        })
    }
}

/// Prepared `sap_read_table` statement
pub struct DuckDbScan<'conn> {
    table: String,
    stmt: Statement<'conn>,
}

impl TableScan for DuckDbScan<'_> {
    fn rows(&mut self) -> Result<RowIter<'_>> {
        let table = self.table.clone();
        let mut columns: Option<Rc<[String]>> = None;

        let rows = self
            .stmt
            .query_map([], move |row| {
                let stmt = row.as_ref();
                let columns = columns
                    .get_or_insert_with(|| stmt.column_names().into())
                    .clone();
                let values = (0..columns.len())
                    .map(|i| row.get::<_, Value>(i).map(value_to_json))
                    .collect::<duckdb::Result<Vec<_>>>()?;
                Ok(RowValues { columns, values })
            })
            .map_err(|e| ConnectorError::read(&table, e.to_string()))?;

        let table = self.table.clone();
        Ok(Box::new(rows.map(move |row| {
            row.map_err(|e| ConnectorError::read(&table, e.to_string()))
        })))
    }
}

fn text_at(values: &[Value], idx: usize) -> String {
    values
        .get(idx)
        .cloned()
        .map(value_to_text)
        .unwrap_or_default()
}

fn connection_error(e: duckdb::Error) -> ConnectorError {
    ConnectorError::Connection(e.to_string())
}

fn discovery_error(e: duckdb::Error) -> ConnectorError {
    ConnectorError::Discovery(e.to_string())
}
