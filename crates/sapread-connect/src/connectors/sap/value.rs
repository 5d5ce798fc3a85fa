//! DuckDB value conversion

use base64::Engine;
use chrono::{DateTime, NaiveTime};
use duckdb::types::{TimeUnit, Value};
use serde_json::json;

/// Convert an engine value to JSON
pub fn value_to_json(value: Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => json!(b),
        Value::TinyInt(n) => json!(n),
        Value::SmallInt(n) => json!(n),
        Value::Int(n) => json!(n),
        Value::BigInt(n) => json!(n),
        Value::HugeInt(n) => match i64::try_from(n) {
            Ok(small) => json!(small),
            Err(_) => json!(n.to_string()),
        },
        Value::UTinyInt(n) => json!(n),
        Value::USmallInt(n) => json!(n),
        Value::UInt(n) => json!(n),
        Value::UBigInt(n) => json!(n),
        Value::Float(n) => serde_json::Value::from(n as f64),
        Value::Double(n) => serde_json::Value::from(n),
        Value::Decimal(d) => decimal_to_json(&d.to_string()),
        Value::Text(s) | Value::Enum(s) => json!(s),
        Value::Blob(b) => json!(base64::engine::general_purpose::STANDARD.encode(b)),
        Value::Date32(days) => DateTime::from_timestamp(i64::from(days) * 86_400, 0)
            .map(|dt| json!(dt.date_naive().to_string()))
            .unwrap_or(serde_json::Value::Null),
        Value::Time64(unit, t) => time_of_day(to_micros(unit, t))
            .map(|time| json!(time.to_string()))
            .unwrap_or(serde_json::Value::Null),
        Value::Timestamp(unit, t) => DateTime::from_timestamp_micros(to_micros(unit, t))
            .map(|dt| json!(dt.to_rfc3339()))
            .unwrap_or(serde_json::Value::Null),
        Value::Interval {
            months,
            days,
            nanos,
        } => json!({ "months": months, "days": days, "nanos": nanos }),
        Value::List(items) | Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(value_to_json).collect())
        }
        Value::Struct(fields) => {
            let obj: serde_json::Map<String, serde_json::Value> = fields
                .keys()
                .zip(fields.values())
                .map(|(k, v)| (k.clone(), value_to_json(v.clone())))
                .collect();
            serde_json::Value::Object(obj)
        }
        Value::Map(entries) => {
            let obj: serde_json::Map<String, serde_json::Value> = entries
                .keys()
                .zip(entries.values())
                .map(|(k, v)| (value_to_text(k.clone()), value_to_json(v.clone())))
                .collect();
            serde_json::Value::Object(obj)
        }
        Value::Union(inner) => value_to_json(*inner),
        // Variants added by newer engine versions
        #[allow(unreachable_patterns)]
        other => json!(format!("{:?}", other)),
    }
}

/// Render an engine value as plain text, for metadata columns
pub fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Text(s) => s,
        other => match value_to_json(other) {
            serde_json::Value::String(s) => s,
            rendered => rendered.to_string(),
        },
    }
}

/// Decimals are emitted as JSON numbers; values beyond f64 precision lose
/// their trailing digits.
fn decimal_to_json(rendered: &str) -> serde_json::Value {
    match rendered.parse::<f64>() {
        Ok(n) if n.is_finite() => serde_json::Value::from(n),
        _ => json!(rendered),
    }
}

fn to_micros(unit: TimeUnit, value: i64) -> i64 {
    match unit {
        TimeUnit::Second => value.saturating_mul(1_000_000),
        TimeUnit::Millisecond => value.saturating_mul(1_000),
        TimeUnit::Microsecond => value,
        TimeUnit::Nanosecond => value / 1_000,
    }
}

fn time_of_day(micros: i64) -> Option<NaiveTime> {
    let secs = u32::try_from(micros.div_euclid(1_000_000)).ok()?;
    let nanos = u32::try_from(micros.rem_euclid(1_000_000) * 1_000).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
}
