//! SAP data dictionary type tags and their JSON schema kinds

use serde::Serialize;
use std::fmt;

use crate::error::{ConnectorError, Result};

/// Generic JSON schema primitive a SAP field maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Integer,
}

impl JsonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every type tag the mapper accepts
pub const SUPPORTED_FIELD_TYPES: &[&str] = &[
    "ACCP", "CHAR", "CLNT", "CURR", "CUKY", "DATS", "DEC", "FLTP", "INT1", "INT2", "INT4", "LANG",
    "LCHR", "LRAW", "NUMC", "PREC", "QUAN", "RAW", "RAWSTRING", "RSTR", "STRING", "STRG", "SSTR",
    "TIMS", "UNIT",
];

/// Map an ERPL field type tag to its JSON schema kind.
///
/// The table is closed: an unknown tag is an error, never a default.
pub fn map_field_type(tag: &str) -> Result<JsonType> {
    let kind = match tag {
        "ACCP" | "CURR" | "DEC" | "FLTP" | "QUAN" => JsonType::Number,
        "INT1" | "INT2" | "INT4" | "PREC" => JsonType::Integer,
        "CHAR" | "CLNT" | "CUKY" | "DATS" | "LANG" | "LCHR" | "LRAW" | "NUMC" | "RAW"
        | "RAWSTRING" | "RSTR" | "STRING" | "STRG" | "SSTR" | "TIMS" | "UNIT" => JsonType::String,
        other => return Err(ConnectorError::UnsupportedType(other.to_string())),
    };
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_kinds() {
        let expected = [
            ("ACCP", JsonType::Number),
            ("CHAR", JsonType::String),
            ("CLNT", JsonType::String),
            ("CURR", JsonType::Number),
            ("CUKY", JsonType::String),
            ("DATS", JsonType::String),
            ("DEC", JsonType::Number),
            ("FLTP", JsonType::Number),
            ("INT1", JsonType::Integer),
            ("INT2", JsonType::Integer),
            ("INT4", JsonType::Integer),
            ("LANG", JsonType::String),
            ("LCHR", JsonType::String),
            ("LRAW", JsonType::String),
            ("NUMC", JsonType::String),
            ("PREC", JsonType::Integer),
            ("QUAN", JsonType::Number),
            ("RAW", JsonType::String),
            ("RAWSTRING", JsonType::String),
            ("RSTR", JsonType::String),
            ("STRING", JsonType::String),
            ("STRG", JsonType::String),
            ("SSTR", JsonType::String),
            ("TIMS", JsonType::String),
            ("UNIT", JsonType::String),
        ];

        assert_eq!(expected.len(), SUPPORTED_FIELD_TYPES.len());
        for (tag, kind) in expected {
            assert_eq!(map_field_type(tag).unwrap(), kind, "tag {}", tag);
        }
    }

    #[test]
    fn test_supported_list_is_accepted() {
        for tag in SUPPORTED_FIELD_TYPES {
            assert!(map_field_type(tag).is_ok(), "tag {}", tag);
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        match map_field_type("BOGUS") {
            Err(ConnectorError::UnsupportedType(tag)) => assert_eq!(tag, "BOGUS"),
            other => panic!("expected UnsupportedType, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(map_field_type("char").is_err());
        assert!(map_field_type(" CHAR").is_err());
        assert!(map_field_type("").is_err());
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(JsonType::Integer).unwrap(),
            serde_json::json!("integer")
        );
        assert_eq!(JsonType::Number.to_string(), "number");
    }
}
