//! Common types for sapread-connect

use schemars::JsonSchema;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// A wrapper around `SecretString` for credentials.
///
/// This type:
/// - Redacts the value in `Debug` and `Display` output
/// - Serializes as `"***REDACTED***"` so config dumps never carry it
/// - Provides `expose_secret()` for the one place the value is needed
///   (applying it to the session)
///
/// # Example
///
/// ```rust
/// use sapread_connect::SensitiveString;
///
/// let secret = SensitiveString::new("init1234");
/// assert_eq!(format!("{:?}", secret), "[REDACTED]");
/// assert_eq!(secret.expose_secret(), "init1234");
/// ```
#[derive(Clone)]
pub struct SensitiveString(SecretString);

impl SensitiveString {
    /// Create a new sensitive string from any string-like value
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::new(value.into().into_boxed_str()))
    }

    /// Expose the secret value.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    /// Whether the underlying value is empty
    pub fn is_empty(&self) -> bool {
        self.expose_secret().is_empty()
    }

    /// The last character only, for diagnostic logging
    pub fn tail(&self) -> String {
        redacted_tail(self.expose_secret())
    }
}

/// Render only the last character of a value, for `(ends with)` log lines.
///
/// Empty values render as `<empty>`.
pub fn redacted_tail(value: &str) -> String {
    match value.chars().last() {
        Some(c) => c.to_string(),
        None => "<empty>".to_string(),
    }
}

impl std::fmt::Debug for SensitiveString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl std::fmt::Display for SensitiveString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl From<String> for SensitiveString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SensitiveString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Serialize for SensitiveString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("***REDACTED***")
    }
}

impl<'de> Deserialize<'de> for SensitiveString {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::new(value))
    }
}

impl JsonSchema for SensitiveString {
    fn schema_name() -> String {
        "SensitiveString".to_string()
    }

    fn is_referenceable() -> bool {
        false
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        let mut schema = gen.subschema_for::<String>();
        if let schemars::schema::Schema::Object(obj) = &mut schema {
            obj.format = Some("password".to_string());
            obj.metadata().description =
                Some("Secret value. Only its last character is ever logged.".to_string());
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_string_redacted() {
        let secret = SensitiveString::new("init1234");
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(format!("{}", secret), "[REDACTED]");
    }

    #[test]
    fn test_sensitive_string_serialize() {
        let secret = SensitiveString::new("init1234");
        let serialized = serde_json::to_string(&secret).unwrap();
        assert_eq!(serialized, "\"***REDACTED***\"");
        assert!(!serialized.contains("init1234"));
    }

    #[test]
    fn test_sensitive_string_deserialize() {
        let secret: SensitiveString = serde_json::from_str("\"init1234\"").unwrap();
        assert_eq!(secret.expose_secret(), "init1234");
    }

    #[test]
    fn test_tail() {
        assert_eq!(SensitiveString::new("init1234").tail(), "4");
        assert_eq!(SensitiveString::new("").tail(), "<empty>");
        assert_eq!(redacted_tail("DEVELOPER"), "R");
        assert_eq!(redacted_tail("passwörd€"), "€");
    }
}
