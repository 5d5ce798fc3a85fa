//! Error types for sapread-connect
//!
//! One error enum covers every connector operation. Only the connectivity
//! check folds errors into a status value; everything else propagates them.

use thiserror::Error;

/// Result type alias for connector operations
pub type Result<T> = std::result::Result<T, ConnectorError>;

/// Errors that can occur in connector operations
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Configuration validation failed or a protocol document was unusable
    #[error("configuration error: {0}")]
    Config(String),

    /// SAP field type tag outside the closed translation table
    #[error("unsupported ERPL field type: {0}")]
    UnsupportedType(String),

    /// Session establishment failed (extension install/load, parameters)
    #[error("connection error: {0}")]
    Connection(String),

    /// Table directory or field metadata query failed
    #[error("discovery error: {0}")]
    Discovery(String),

    /// Malformed field metadata
    #[error("schema error: {0}")]
    Schema(String),

    /// Row fetch failed for a stream
    #[error("read error on stream '{stream}': {message}")]
    Read { stream: String, message: String },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConnectorError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a discovery error
    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    /// Create a schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a read error for a stream
    pub fn read(stream: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Read {
            stream: stream.into(),
            message: msg.into(),
        }
    }

    /// Short machine-readable kind, used for protocol trace messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::UnsupportedType(_) | Self::Schema(_) => "schema_error",
            Self::Connection(_) => "connection_error",
            Self::Discovery(_) => "discovery_error",
            Self::Read { .. } => "read_error",
            Self::Io(_) | Self::Json(_) => "system_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConnectorError::read("MARA", "RFC_COMMUNICATION_FAILURE");
        assert_eq!(
            err.to_string(),
            "read error on stream 'MARA': RFC_COMMUNICATION_FAILURE"
        );

        let err = ConnectorError::UnsupportedType("BOGUS".to_string());
        assert!(err.to_string().contains("BOGUS"));
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(ConnectorError::config("x").kind(), "config_error");
        assert_eq!(ConnectorError::connection("x").kind(), "connection_error");
        assert_eq!(ConnectorError::discovery("x").kind(), "discovery_error");
        assert_eq!(ConnectorError::schema("x").kind(), "schema_error");
        assert_eq!(
            ConnectorError::UnsupportedType("x".into()).kind(),
            "schema_error"
        );
        assert_eq!(ConnectorError::read("T", "x").kind(), "read_error");
    }
}
