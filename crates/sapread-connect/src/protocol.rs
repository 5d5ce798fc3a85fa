//! Protocol messages written by the binary
//!
//! One JSON object per line on stdout, tagged by `type`.

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use crate::error::{ConnectorError, Result};
use crate::traits::catalog::Catalog;
use crate::traits::record::Record;
use crate::traits::source::CheckResult;

/// Error details carried by a `TRACE` message
#[derive(Debug, Clone, Serialize)]
pub struct TraceError {
    /// Error kind (e.g. `read_error`)
    pub failure_type: String,
    /// Human-readable message
    pub message: String,
}

/// Payload of a `TRACE` message
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub trace_type: String,
    /// Milliseconds since the epoch
    pub emitted_at: i64,
    pub error: TraceError,
}

/// A single protocol message
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    Spec {
        spec: serde_json::Value,
    },
    ConnectionStatus {
        #[serde(rename = "connectionStatus")]
        connection_status: CheckResult,
    },
    Catalog {
        catalog: Catalog,
    },
    Record {
        record: Record,
    },
    Trace {
        trace: Trace,
    },
}

impl Message {
    /// Build an error trace from a connector error
    pub fn error_trace(err: &ConnectorError) -> Self {
        Self::trace(err.kind(), err.to_string())
    }

    /// Build an error trace from a kind and message
    pub fn trace(kind: &str, message: impl Into<String>) -> Self {
        Self::Trace {
            trace: Trace {
                trace_type: "ERROR".to_string(),
                emitted_at: Utc::now().timestamp_millis(),
                error: TraceError {
                    failure_type: kind.to_string(),
                    message: message.into(),
                },
            },
        }
    }
}

/// Writes protocol messages as JSON lines
pub struct MessageWriter<W: Write> {
    out: W,
    written: u64,
}

impl<W: Write> MessageWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Serialize one message followed by a newline
    pub fn write(&mut self, message: &Message) -> Result<()> {
        serde_json::to_writer(&mut self.out, message)?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Number of messages written
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::catalog::Stream;
    use crate::traits::record::RecordData;
    use serde_json::json;

    fn lines(messages: &[Message]) -> Vec<serde_json::Value> {
        let mut writer = MessageWriter::new(Vec::new());
        for m in messages {
            writer.write(m).unwrap();
        }
        assert_eq!(writer.written(), messages.len() as u64);
        String::from_utf8(writer.into_inner())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_connection_status_message() {
        let out = lines(&[Message::ConnectionStatus {
            connection_status: CheckResult::failure("ERPL connection test failed: boom"),
        }]);
        assert_eq!(
            out[0],
            json!({
                "type": "CONNECTION_STATUS",
                "connectionStatus": {"status": "FAILED", "message": "ERPL connection test failed: boom"}
            })
        );
    }

    #[test]
    fn test_catalog_and_record_messages() {
        let catalog = Catalog::new().add_stream(Stream::new("T001", json!({"type": "object"})));
        let ts = chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let mut data = RecordData::new();
        data.insert("BUKRS".into(), json!("1000"));

        let out = lines(&[
            Message::Catalog { catalog },
            Message::Record {
                record: Record::new("T001", data).with_emitted_at(ts),
            },
        ]);

        assert_eq!(out[0]["type"], "CATALOG");
        assert_eq!(out[0]["catalog"]["streams"][0]["name"], "T001");
        assert_eq!(out[1]["type"], "RECORD");
        assert_eq!(out[1]["record"]["emitted_at"], json!(1_700_000_000));
        assert_eq!(out[1]["record"]["data"]["BUKRS"], "1000");
    }

    #[test]
    fn test_error_trace() {
        let err = ConnectorError::read("T001", "RFC_COMMUNICATION_FAILURE");
        let out = lines(&[Message::error_trace(&err)]);

        assert_eq!(out[0]["type"], "TRACE");
        assert_eq!(out[0]["trace"]["type"], "ERROR");
        assert_eq!(out[0]["trace"]["error"]["failure_type"], "read_error");
        assert!(out[0]["trace"]["error"]["message"]
            .as_str()
            .unwrap()
            .contains("T001"));
    }

    #[test]
    fn test_spec_message() {
        let out = lines(&[Message::Spec {
            spec: json!({"documentationUrl": "https://erpl.io"}),
        }]);
        assert_eq!(out[0]["type"], "SPEC");
        assert_eq!(out[0]["spec"]["documentationUrl"], "https://erpl.io");
    }
}
