//! Prior-sync state
//!
//! The connector only performs full refreshes. State handed in by the
//! platform is carried as an opaque JSON blob and never interpreted.

use serde::{Deserialize, Serialize};

/// Opaque state from a previous sync
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(serde_json::Value);

impl State {
    /// Create empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a raw state document
    pub fn from_value(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrow the raw document
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Check if state carries nothing
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            serde_json::Value::Null => true,
            serde_json::Value::Object(map) => map.is_empty(),
            serde_json::Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }
}
