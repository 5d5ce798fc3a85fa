//! sapread-connect - SAP table source connector
//!
//! Exposes tables of an SAP ERP system as discoverable, readable streams
//! through an embedded DuckDB engine with the ERPL (SAP RFC) extension.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 source-sapreadtable (CLI)                       │
//! │  spec / check / discover / read  →  JSONL protocol on stdout    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                 SapReadTableSource                              │
//! │  ├── check     → DuckDbSession::connect + PRAGMA sap_rfc_ping   │
//! │  ├── discover  → sap_show_tables + sap_describe_fields          │
//! │  └── read      → sap_read_table, one stream after another       │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                 DuckDB + ERPL extension                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Library Usage
//!
//! ```rust,ignore
//! use sapread_connect::prelude::*;
//!
//! let source = SapReadTableSource::new();
//! let catalog = source.discover(&config).await?;
//!
//! let mut records = source
//!     .read(&config, &ConfiguredCatalog::from_catalog(&catalog), None)
//!     .await?;
//! while let Some(record) = records.next().await {
//!     println!("{:?}", record?);
//! }
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! source-sapreadtable spec
//! source-sapreadtable check --config config.yaml
//! source-sapreadtable discover --config config.yaml
//! source-sapreadtable read --config config.yaml --catalog catalog.json
//! ```

// Core connector traits
pub mod traits;

// Common types (SensitiveString)
pub mod types;

// Error types
pub mod error;

// Document loading with env expansion
pub mod config;

// JSONL protocol messages
pub mod protocol;

// Connector implementations
pub mod connectors;

pub use traits::testing;

pub use types::SensitiveString;

// Re-export core traits at crate root for ergonomic use
pub use traits::{
    Catalog, CheckResult, CheckStatus, ConfiguredCatalog, ConfiguredStream, ConnectorSpec,
    ConnectorSpecBuilder, DestinationSyncMode, Record, RecordData, RecordStream, Source,
    SourceConfig, SourceExt, State, Stream, SyncMode,
};

pub use connectors::{SapReadTableConfig, SapReadTableSource};
pub use error::{ConnectorError, Result};
pub use protocol::{Message, MessageWriter};

pub use async_trait::async_trait;
pub use serde_json::Value as JsonValue;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        async_trait, Catalog, CheckResult, CheckStatus, ConfiguredCatalog, ConfiguredStream,
        ConnectorError, ConnectorSpec, Record, RecordStream, Result, SapReadTableConfig,
        SapReadTableSource, SensitiveString, Source, SourceExt, State, Stream, SyncMode,
    };
    pub use futures::StreamExt;
}
