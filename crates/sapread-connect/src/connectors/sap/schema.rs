//! JSON schema construction from SAP field metadata

use serde_json::{json, Map, Value};
use tracing::debug;

use super::session::{ErpSession, FieldEntry};
use super::types::map_field_type;
use crate::error::{ConnectorError, Result};

/// Draft identifier written into every stream schema
pub const JSON_SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema#";

/// Query a table's field metadata and build its stream schema
pub fn build_table_schema<S: ErpSession>(session: &S, table: &str) -> Result<Value> {
    let fields = session.describe_fields(table)?;
    debug!(table = %table, fields = fields.len(), "Building stream schema");
    schema_from_fields(table, &fields)
}

/// Assemble a stream schema from field metadata, keeping metadata order
pub fn schema_from_fields(table: &str, fields: &[FieldEntry]) -> Result<Value> {
    let mut properties = Map::with_capacity(fields.len());

    for field in fields {
        let kind = map_field_type(&field.type_tag)?;
        let length = parse_dimension(table, field, "length", &field.length)?;
        let decimals = parse_dimension(table, field, "decimals", &field.decimals)?;

        properties.insert(
            field.name.clone(),
            json!({
                "type": kind,
                "length": length,
                "decimals": decimals,
                "description": field.text,
            }),
        );
    }

    Ok(json!({
        "$schema": JSON_SCHEMA_DRAFT,
        "type": "object",
        "properties": properties,
    }))
}

fn parse_dimension(table: &str, field: &FieldEntry, what: &str, raw: &str) -> Result<i64> {
    raw.trim().parse().map_err(|_| {
        ConnectorError::schema(format!(
            "table '{}' field '{}': {} is not an integer: '{}'",
            table, field.name, what, raw
        ))
    })
}
