//! Connector specification types

use super::catalog::SyncMode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Connector specification describing its capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorSpec {
    /// Unique connector type identifier (e.g., "sap-read-table")
    pub connector_type: String,

    /// Semantic version
    pub version: String,

    /// Human-readable description
    pub description: Option<String>,

    /// Documentation URL
    pub documentation_url: Option<String>,

    /// JSON Schema for the connector's configuration
    pub config_schema: Option<serde_json::Value>,

    /// Supported sync modes
    pub supported_sync_modes: Vec<SyncMode>,

    /// Whether this connector supports incremental sync with state
    pub supports_incremental: bool,
}

impl ConnectorSpec {
    /// Create a new connector spec
    pub fn new(connector_type: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            connector_type: connector_type.into(),
            version: version.into(),
            description: None,
            documentation_url: None,
            config_schema: None,
            supported_sync_modes: vec![SyncMode::FullRefresh],
            supports_incremental: false,
        }
    }

    /// Create a builder for fluent construction
    pub fn builder(
        connector_type: impl Into<String>,
        version: impl Into<String>,
    ) -> ConnectorSpecBuilder {
        ConnectorSpecBuilder::new(connector_type, version)
    }

    /// Render as the protocol's `SPEC` payload
    pub fn to_protocol(&self) -> serde_json::Value {
        serde_json::json!({
            "documentationUrl": self.documentation_url,
            "connectionSpecification": self.config_schema.clone().unwrap_or_default(),
            "supportsIncremental": self.supports_incremental,
            "supported_destination_sync_modes": ["append", "overwrite"],
        })
    }
}

/// Builder for ConnectorSpec
#[derive(Debug)]
pub struct ConnectorSpecBuilder {
    spec: ConnectorSpec,
}

impl ConnectorSpecBuilder {
    /// Create a new builder
    pub fn new(connector_type: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            spec: ConnectorSpec::new(connector_type, version),
        }
    }

    /// Set description
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.spec.description = Some(desc.into());
        self
    }

    /// Set documentation URL
    pub fn documentation_url(mut self, url: impl Into<String>) -> Self {
        self.spec.documentation_url = Some(url.into());
        self
    }

    /// Set config schema from a type implementing JsonSchema
    pub fn config_schema<T: JsonSchema>(mut self) -> Self {
        let schema = schemars::schema_for!(T);
        self.spec.config_schema = Some(serde_json::to_value(schema).unwrap_or_default());
        self
    }

    /// Set supported sync modes
    pub fn sync_modes(mut self, modes: Vec<SyncMode>) -> Self {
        self.spec.supported_sync_modes = modes;
        self
    }

    /// Build the spec
    pub fn build(self) -> ConnectorSpec {
        self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    struct DemoConfig {
        host: String,
    }

    #[test]
    fn test_connector_spec_builder() {
        let spec = ConnectorSpec::builder("test-source", "1.0.0")
            .description("A test source")
            .config_schema::<DemoConfig>()
            .build();

        assert_eq!(spec.connector_type, "test-source");
        assert_eq!(spec.description, Some("A test source".to_string()));
        assert!(!spec.supports_incremental);
        assert_eq!(spec.supported_sync_modes, vec![SyncMode::FullRefresh]);

        let protocol = spec.to_protocol();
        assert!(protocol["connectionSpecification"]["properties"]
            .get("host")
            .is_some());
        assert_eq!(protocol["supportsIncremental"], false);
    }
}
