//! SAP table source
//!
//! Exposes SAP tables as streams through an embedded DuckDB engine with the
//! ERPL extension loaded.
//!
//! # Operations
//!
//! - `check` installs and loads the extension, applies the logon
//!   parameters and runs `PRAGMA sap_rfc_ping`
//! - `discover` lists tables matching `table_selection` and builds one
//!   JSON schema per table from its field metadata
//! - `read` streams every row of each configured table as a record
//!
//! # Example
//!
//! ```yaml
//! custom_extension_repository: "http://get.erpl.io"
//! extension_name: erpl
//! sap_ashost: sap.example.internal
//! sap_sysnr: "00"
//! sap_user: DEVELOPER
//! sap_password: ${SAP_PASSWORD}
//! sap_client: "001"
//! sap_lang: EN
//! table_selection: "T00*"
//! ```

pub mod config;
pub mod discover;
pub mod reader;
pub mod schema;
pub mod session;
pub mod types;
pub mod value;

pub use config::SapReadTableConfig;
pub use discover::discover_catalog;
pub use reader::{read_streams, RowStreamer};
pub use schema::{build_table_schema, schema_from_fields, JSON_SCHEMA_DRAFT};
pub use session::{DuckDbSession, ErpSession, FieldEntry, RowValues, TableEntry, TableScan};
pub use types::{map_field_type, JsonType, SUPPORTED_FIELD_TYPES};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{ConnectorError, Result};
use crate::traits::catalog::{Catalog, ConfiguredCatalog, SyncMode};
use crate::traits::source::{CheckResult, RecordStream, Source, SourceExt};
use crate::traits::spec::ConnectorSpec;
use crate::traits::state::State;

/// Ping a freshly opened session, folding every failure into the result
pub fn check_connection<S, F>(connect: F) -> CheckResult
where
    S: ErpSession,
    F: FnOnce() -> Result<S>,
{
    match connect().and_then(|session| session.ping()) {
        Ok(()) => {
            info!("ERPL connection test succeeded");
            CheckResult::success("ERPL connection test succeeded")
        }
        Err(e) => {
            warn!(error = %e, "ERPL connection test failed");
            CheckResult::failure(format!("ERPL connection test failed: {}", e))
        }
    }
}

/// SAP read-table source
#[derive(Debug, Default, Clone, Copy)]
pub struct SapReadTableSource;

impl SapReadTableSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl Source for SapReadTableSource {
    type Config = SapReadTableConfig;

    fn spec() -> ConnectorSpec {
        ConnectorSpec::builder("sap-read-table", env!("CARGO_PKG_VERSION"))
            .description("Read SAP tables over RFC through DuckDB and the ERPL extension")
            .documentation_url("https://erpl.io")
            .config_schema::<SapReadTableConfig>()
            .sync_modes(vec![SyncMode::FullRefresh])
            .build()
    }

    async fn check(&self, config: &Self::Config) -> CheckResult {
        if let Err(e) = Self::validate_config(config) {
            return CheckResult::failure(format!("ERPL connection test failed: {}", e));
        }
        check_connection(|| DuckDbSession::connect(config))
    }

    async fn discover(&self, config: &Self::Config) -> Result<Catalog> {
        Self::validate_config(config)?;
        let selection = config
            .table_selection
            .as_deref()
            .ok_or_else(|| ConnectorError::config("table_selection is required for discover"))?;
        info!(selection = %selection, "ERPL source stream discovery");

        let session = DuckDbSession::connect(config)?;
        discover_catalog(&session, selection)
    }

    async fn read(
        &self,
        config: &Self::Config,
        catalog: &ConfiguredCatalog,
        state: Option<State>,
    ) -> Result<RecordStream> {
        Self::validate_config(config)?;
        if state.is_some_and(|s| !s.is_empty()) {
            debug!("Ignoring prior sync state, full refresh only");
        }
        info!(streams = catalog.streams.len(), "ERPL source read");

        let session = DuckDbSession::connect(config)?;
        Ok(read_streams(session, catalog.clone()))
    }
}
