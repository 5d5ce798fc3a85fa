//! Record type emitted by sources

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field name to value mapping for one row
pub type RecordData = serde_json::Map<String, serde_json::Value>;

/// One row of a stream, as handed to the output sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stream name this record belongs to
    pub stream: String,

    /// Row data keyed by column name
    pub data: RecordData,

    /// Wall-clock time at conversion, serialized as epoch seconds
    #[serde(with = "chrono::serde::ts_seconds")]
    pub emitted_at: DateTime<Utc>,
}

impl Record {
    /// Create a record stamped with the current time
    pub fn new(stream: impl Into<String>, data: RecordData) -> Self {
        Self {
            stream: stream.into(),
            data,
            emitted_at: Utc::now(),
        }
    }

    /// Create a record from column names and values, zipped positionally
    pub fn from_columns<I>(stream: impl Into<String>, columns: &[String], values: I) -> Self
    where
        I: IntoIterator<Item = serde_json::Value>,
    {
        let data = columns.iter().cloned().zip(values).collect();
        Self::new(stream, data)
    }

    /// Override the emission time (builder-style)
    pub fn with_emitted_at(mut self, ts: DateTime<Utc>) -> Self {
        self.emitted_at = ts;
        self
    }

    /// Column names present in this record
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_columns() {
        let columns = vec!["MANDT".to_string(), "BUKRS".to_string()];
        let record = Record::from_columns("T001", &columns, vec![json!("100"), json!("1000")]);

        assert_eq!(record.stream, "T001");
        assert_eq!(record.field_names().collect::<Vec<_>>(), ["MANDT", "BUKRS"]);
        assert_eq!(record.data["BUKRS"], json!("1000"));
    }

    #[test]
    fn test_emitted_at_serializes_as_seconds() {
        let ts = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let record = Record::new("T001", RecordData::new()).with_emitted_at(ts);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["emitted_at"], json!(1_700_000_000));
        assert_eq!(value["stream"], "T001");
        assert_eq!(value["data"], json!({}));
    }
}
