//! Catalog types for describing available streams
//!
//! Field names follow the Airbyte protocol so catalogs written by `discover`
//! can be edited and fed back into `read` unchanged.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Catalog of available streams from a source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Available streams
    pub streams: Vec<Stream>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stream to the catalog
    pub fn add_stream(mut self, stream: Stream) -> Self {
        self.streams.push(stream);
        self
    }

    /// Find a stream by name
    pub fn find_stream(&self, name: &str) -> Option<&Stream> {
        self.streams.iter().find(|s| s.name == name)
    }

    /// Stream names in catalog order
    pub fn stream_names(&self) -> impl Iterator<Item = &str> {
        self.streams.iter().map(|s| s.name.as_str())
    }

    /// Whether the catalog has no streams
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

/// A stream represents one SAP table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    /// Technical table name (e.g., "MARA")
    pub name: String,

    /// Display text from the data dictionary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Table category (TRANSP, POOL, CLUSTER, VIEW, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_type: Option<String>,

    /// JSON Schema of the stream's records
    #[serde(default)]
    pub json_schema: serde_json::Value,

    /// Supported sync modes for this stream
    #[serde(default = "default_sync_modes")]
    pub supported_sync_modes: Vec<SyncMode>,
}

fn default_sync_modes() -> Vec<SyncMode> {
    vec![SyncMode::FullRefresh]
}

impl Stream {
    /// Create a new full-refresh stream
    pub fn new(name: impl Into<String>, json_schema: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            text: None,
            table_type: None,
            json_schema,
            supported_sync_modes: default_sync_modes(),
        }
    }

    /// Set display text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set table category
    pub fn with_table_type(mut self, table_type: impl Into<String>) -> Self {
        self.table_type = Some(table_type.into());
        self
    }

    /// Field names declared in the schema, in schema order
    pub fn property_names(&self) -> Vec<&str> {
        self.json_schema
            .get("properties")
            .and_then(|p| p.as_object())
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Sync mode for a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Full refresh: re-read all data each sync
    #[default]
    FullRefresh,
    /// Incremental: read only new/changed data (never offered by this connector)
    Incremental,
}

/// Configured catalog (user's selection of streams and sync modes)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfiguredCatalog {
    /// Configured streams
    pub streams: Vec<ConfiguredStream>,
}

impl ConfiguredCatalog {
    /// Create an empty configured catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a catalog, selecting all streams with default settings
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            streams: catalog
                .streams
                .iter()
                .map(ConfiguredStream::from_stream)
                .collect(),
        }
    }

    /// Add a configured stream
    pub fn add_stream(mut self, stream: ConfiguredStream) -> Self {
        self.streams.push(stream);
        self
    }

    /// Find a configured stream by name
    pub fn find_stream(&self, name: &str) -> Option<&ConfiguredStream> {
        self.streams.iter().find(|s| s.stream.name == name)
    }
}

/// A stream configured by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfiguredStream {
    /// The stream definition
    pub stream: Stream,

    /// Selected sync mode
    #[serde(default)]
    pub sync_mode: SyncMode,

    /// Destination sync mode
    #[serde(default)]
    pub destination_sync_mode: DestinationSyncMode,
}

impl ConfiguredStream {
    /// Create from a stream with default settings
    pub fn from_stream(stream: &Stream) -> Self {
        Self {
            stream: stream.clone(),
            sync_mode: SyncMode::FullRefresh,
            destination_sync_mode: DestinationSyncMode::Append,
        }
    }

    /// Set sync mode
    pub fn sync_mode(mut self, mode: SyncMode) -> Self {
        self.sync_mode = mode;
        self
    }
}

/// Destination sync mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DestinationSyncMode {
    /// Append new records
    #[default]
    Append,
    /// Overwrite existing data
    Overwrite,
    /// Append with deduplication
    AppendDedup,
}
