//! Configuration for the contract tooling
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (hemvist-schemas.toml)
//! - Environment variables (HEMVIST_SCHEMAS_*)
//!
//! ## Example config file (hemvist-schemas.toml):
//! ```toml
//! [validation]
//! max_depth = 64
//! strict_unknown_fields = false
//!
//! [export]
//! output_format = "pretty"
//! include_checksums = true
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::validate::ValidatorOptions;

/// Main configuration for the contract tooling
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemasConfig {
    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum input nesting before validation reports a depth violation
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Reject fields a shape does not declare
    #[serde(default)]
    pub strict_unknown_fields: bool,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output format (pretty or compact)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Include per-shape checksums in exported manifests
    #[serde(default = "default_true")]
    pub include_checksums: bool,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

fn default_max_depth() -> usize {
    64
}

fn default_true() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            strict_unknown_fields: false,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Pretty,
            include_checksums: true,
        }
    }
}

impl SchemasConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("hemvist-schemas")
    }

    /// Load configuration with a custom file stem (used by tests)
    pub fn load_from(file_stem: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(file_stem).required(false))
            .add_source(Environment::with_prefix("HEMVIST_SCHEMAS").separator("__"))
            .build()?
            .try_deserialize()
    }
}

impl From<&ValidationConfig> for ValidatorOptions {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            strict_unknown_fields: config.strict_unknown_fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SchemasConfig::default();
        assert_eq!(config.validation.max_depth, 64);
        assert!(!config.validation.strict_unknown_fields);
        assert_eq!(config.export.output_format, OutputFormat::Pretty);
        assert!(config.export.include_checksums);
    }

    #[test]
    fn test_validator_options_from_config() {
        let config = ValidationConfig {
            max_depth: 8,
            strict_unknown_fields: true,
        };
        let options = ValidatorOptions::from(&config);
        assert_eq!(options.max_depth, 8);
        assert!(options.strict_unknown_fields);
    }
}
