//! SAP read-table source configuration

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::{Validate, ValidationError};

use crate::types::{redacted_tail, SensitiveString};

/// Connection parameters for the ERPL-backed SAP source
///
/// # Example
///
/// ```yaml
/// custom_extension_repository: "http://get.erpl.io"
/// extension_name: erpl
/// sap_ashost: sap.example.internal
/// sap_sysnr: "00"
/// sap_user: DEVELOPER
/// sap_password: ${SAP_PASSWORD}
/// sap_client: "001"
/// sap_lang: EN
/// table_selection: "T00*"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
pub struct SapReadTableConfig {
    /// DuckDB extension repository the ERPL extension is installed from
    #[validate(length(min = 1))]
    pub custom_extension_repository: String,

    /// Name of the extension to install and load (usually "erpl")
    #[validate(length(min = 1, max = 255))]
    pub extension_name: String,

    /// SAP application server host
    #[validate(length(min = 1, max = 255))]
    pub sap_ashost: String,

    /// SAP system number (e.g., "00")
    #[validate(length(min = 1))]
    pub sap_sysnr: String,

    /// SAP user name
    #[validate(length(min = 1))]
    pub sap_user: String,

    /// SAP password
    #[validate(custom(function = "validate_secret"))]
    pub sap_password: SensitiveString,

    /// SAP client (e.g., "001")
    #[validate(length(min = 1))]
    pub sap_client: String,

    /// SAP logon language (e.g., "EN")
    #[validate(length(min = 1))]
    pub sap_lang: String,

    /// Table name pattern used by discovery (e.g., "T00*")
    #[serde(default)]
    pub table_selection: Option<String>,
}

fn validate_secret(value: &SensitiveString) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("empty_secret")
            .with_message("sap_password must not be empty".into()));
    }
    Ok(())
}

impl SapReadTableConfig {
    /// Log every connection parameter at debug level; credentials only by
    /// their last character.
    pub fn log_parameters(&self) {
        debug!(
            custom_extension_repository = %self.custom_extension_repository,
            "ERPL connection parameters"
        );
        debug!(sap_ashost = %self.sap_ashost, "ERPL connection parameters");
        debug!(sap_sysnr = %self.sap_sysnr, "ERPL connection parameters");
        debug!(
            sap_user_ends_with = %redacted_tail(&self.sap_user),
            "ERPL connection parameters"
        );
        debug!(
            sap_password_ends_with = %self.sap_password.tail(),
            "ERPL connection parameters"
        );
        debug!(sap_client = %self.sap_client, "ERPL connection parameters");
        debug!(sap_lang = %self.sap_lang, "ERPL connection parameters");
    }
}
