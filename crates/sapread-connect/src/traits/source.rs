//! Source connector trait
//!
//! This module provides the core `Source` trait for implementing data source connectors.

use super::catalog::{Catalog, ConfiguredCatalog};
use super::record::Record;
use super::spec::ConnectorSpec;
use super::state::State;
use crate::error::Result;
use async_trait::async_trait;
use futures::stream::LocalBoxStream;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Trait for source connector configuration
pub trait SourceConfig: DeserializeOwned + Validate + JsonSchema {}

// Blanket implementation
impl<T> SourceConfig for T where T: DeserializeOwned + Validate + JsonSchema {}

/// Outcome of a connection check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    Succeeded,
    Failed,
}

/// Result of a connection check.
///
/// Checks never fail with an error: every failure is folded into a
/// `Failed` status carrying the cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the check succeeded
    pub status: CheckStatus,
    /// Human-readable outcome
    pub message: String,
}

impl CheckResult {
    /// Create a successful check result
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Succeeded,
            message: message.into(),
        }
    }

    /// Create a failed check result
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Failed,
            message: message.into(),
        }
    }

    /// Check if successful
    pub fn is_success(&self) -> bool {
        self.status == CheckStatus::Succeeded
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            CheckStatus::Succeeded => write!(f, "✓ {}", self.message),
            CheckStatus::Failed => write!(f, "✗ {}", self.message),
        }
    }
}

/// Lazy, single-pass sequence of records produced by `read`
pub type RecordStream = LocalBoxStream<'static, Result<Record>>;

/// Trait for source connectors
///
/// Every operation runs on one logical thread; the futures and the record
/// stream are not `Send`.
///
/// # Example
///
/// ```rust,ignore
/// use sapread_connect::prelude::*;
///
/// pub struct MySource;
///
/// #[async_trait(?Send)]
/// impl Source for MySource {
///     type Config = MySourceConfig;
///
///     fn spec() -> ConnectorSpec {
///         ConnectorSpec::builder("my-source", "1.0.0").build()
///     }
///
///     async fn check(&self, config: &Self::Config) -> CheckResult {
///         CheckResult::success("ok")
///     }
///
///     async fn discover(&self, config: &Self::Config) -> Result<Catalog> {
///         Ok(Catalog::default())
///     }
///
///     async fn read(
///         &self,
///         config: &Self::Config,
///         catalog: &ConfiguredCatalog,
///         state: Option<State>,
///     ) -> Result<RecordStream> {
///         todo!()
///     }
/// }
/// ```
#[async_trait(?Send)]
pub trait Source {
    /// Configuration type for this source
    type Config: SourceConfig;

    /// Return the connector specification
    fn spec() -> ConnectorSpec;

    /// Check connectivity and configuration
    async fn check(&self, config: &Self::Config) -> CheckResult;

    /// Discover available streams
    async fn discover(&self, config: &Self::Config) -> Result<Catalog>;

    /// Read the configured streams, one after another
    ///
    /// `state` is the platform's prior-sync marker. Sources that only
    /// support full refresh accept and ignore it.
    async fn read(
        &self,
        config: &Self::Config,
        catalog: &ConfiguredCatalog,
        state: Option<State>,
    ) -> Result<RecordStream>;
}

/// Extension trait for source operations
pub trait SourceExt: Source {
    /// Validate configuration
    fn validate_config(config: &Self::Config) -> Result<()> {
        config
            .validate()
            .map_err(|e| crate::error::ConnectorError::Config(e.to_string()))
    }
}

// Blanket implementation
impl<T: Source> SourceExt for T {}
