//! Loading of protocol documents (config, catalog, state)
//!
//! Documents may be JSON or YAML. Environment references of the form
//! `${VAR}` or `${VAR:-default}` are expanded before parsing, so secrets
//! such as the SAP password can stay out of the file.

use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::LazyLock;

/// Pre-compiled regex for environment variable expansion
/// Pattern: ${VAR} or ${VAR:-default}
static ENV_VAR_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\$\{([a-zA-Z_][a-zA-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("env var regex pattern is invalid - this is a bug")
});

/// Read, expand and parse a document from a file
pub fn load_document<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

    parse_document(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))
}

/// Expand and parse a document held in memory
pub fn parse_document<T: DeserializeOwned>(content: &str) -> anyhow::Result<T> {
    let expanded = expand_env_vars(content);
    Ok(serde_yaml::from_str(&expanded)?)
}

/// Expand environment variables in the format ${VAR} or ${VAR:-default}
///
/// Unset variables without a default expand to the empty string.
pub fn expand_env_vars(content: &str) -> String {
    ENV_VAR_REGEX
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let default = caps.get(2).map(|m| m.as_str());

            std::env::var(var_name).unwrap_or_else(|_| default.unwrap_or("").to_string())
        })
        .to_string()
}
