//! Registry configuration.
//!
//! Loaded from TOML; every section is optional and the defaults keep the
//! registry silent about skipped properties.
//!
//! ```toml
//! [diagnostics]
//! log_skipped = true
//! log_generation = true
//!
//! [defaults]
//! skip_null = false
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

///
/// RegistryConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub diagnostics: DiagnosticsConfig,
    pub defaults: CopyDefaults,
}

impl RegistryConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&input)
    }
}

///
/// DiagnosticsConfig
///
/// Optional diagnostic channel. Skips are never errors; enabling
/// `log_skipped` only emits tracing events for them.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsConfig {
    pub log_skipped: bool,
    pub log_generation: bool,
}

///
/// CopyDefaults
///
/// Flags used by the registry's convenience copy helpers.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopyDefaults {
    pub skip_null: bool,
}

///
/// TESTS
///
