//! Catalog discovery

use tracing::{debug, info};

use super::schema::build_table_schema;
use super::session::ErpSession;
use crate::error::Result;
use crate::traits::catalog::{Catalog, Stream};

/// List the tables matching `selection` and describe each as a stream.
///
/// Streams come out in ascending name order. Any schema failure aborts the
/// whole discovery.
pub fn discover_catalog<S: ErpSession>(session: &S, selection: &str) -> Result<Catalog> {
    let mut tables = session.show_tables(selection)?;
    tables.sort_by(|a, b| a.name.cmp(&b.name));
    info!(selection = %selection, tables = tables.len(), "Discovering SAP tables");

    let mut catalog = Catalog::new();
    for table in tables {
        debug!(table = %table.name, table_type = %table.table_type, "Describing table");
        let schema = build_table_schema(session, &table.name)?;
        catalog = catalog.add_stream(
            Stream::new(table.name, schema)
                .with_text(table.text)
                .with_table_type(table.table_type),
        );
    }

    Ok(catalog)
}
