//! Configuration loading for PhaseForge.
//!
//! Every field has a default matching the builder's stock behaviour, so a
//! config file only needs the keys it overrides.

use crate::error::ConfigError;
use crate::PackageManager;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_STORAGE_KEY: &str = "phaseBuilder:v2";
pub const DEFAULT_LEGACY_STORAGE_KEY: &str = "phaseBuilder:v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BuilderConfig {
    /// Emit `OWNER`, `REPO_URL`, `STACK` and `DATE_ISO` into the global scope when set
    pub include_legacy_fields: bool,
    /// Warn about phase inputs the current template never references
    pub warn_unused_phase_inputs: bool,
    pub storage_key: String,
    pub legacy_storage_key: String,
    pub default_package_manager: PackageManager,
    pub default_monorepo: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            include_legacy_fields: true,
            warn_unused_phase_inputs: true,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            legacy_storage_key: DEFAULT_LEGACY_STORAGE_KEY.to_string(),
            default_package_manager: PackageManager::Pnpm,
            default_monorepo: true,
        }
    }
}

impl BuilderConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: BuilderConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded builder config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage_key".to_string(),
                value: self.storage_key.clone(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.legacy_storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "legacy_storage_key".to_string(),
                value: self.legacy_storage_key.clone(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.storage_key == self.legacy_storage_key {
            return Err(ConfigError::InvalidValue {
                field: "legacy_storage_key".to_string(),
                value: self.legacy_storage_key.clone(),
                reason: "must differ from storage_key".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
