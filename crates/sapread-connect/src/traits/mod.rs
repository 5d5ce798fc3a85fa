//! Core connector traits and types
//!
//! - `Source` - check / discover / read lifecycle
//! - `catalog` - stream descriptors and the user's configured selection
//! - `record` - rows emitted during a read
//! - `state` - opaque prior-sync marker
//! - `spec` - connector capabilities and config schema
//! - `testing` - in-memory ERP session for tests

pub mod catalog;
pub mod record;
pub mod source;
pub mod spec;
pub mod state;
pub mod testing;

// Re-export source types
pub use source::{CheckResult, CheckStatus, RecordStream, Source, SourceConfig, SourceExt};

// Re-export record types
pub use record::{Record, RecordData};

// Re-export catalog types
pub use catalog::{
    Catalog, ConfiguredCatalog, ConfiguredStream, DestinationSyncMode, Stream, SyncMode,
};

// Re-export state types
pub use state::State;

// Re-export spec types
pub use spec::{ConnectorSpec, ConnectorSpecBuilder};

// Re-export testing utilities
pub use testing::{MockScan, MockSession};
