//! Configuration management for schema construction
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (typegraph.toml)
//! - Environment variables (TYPEGRAPH__*)
//!
//! ## Example config file (typegraph.toml):
//! ```toml
//! [validation]
//! strict_references = true
//! check_names = false
//! warn_dangling_interfaces = true
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main configuration for [`SchemaBuilder`](crate::SchemaBuilder)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject unresolved and wrongly-kinded type references
    #[serde(default)]
    pub strict_references: bool,

    /// Reject names outside the GraphQL name grammar
    #[serde(default)]
    pub check_names: bool,

    /// Log a warning for object types implementing undeclared interfaces
    #[serde(default = "default_true")]
    pub warn_dangling_interfaces: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict_references: false,
            check_names: false,
            warn_dangling_interfaces: true,
        }
    }
}

impl BuilderConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "typegraph.toml",
            ".typegraph.toml",
            "config/typegraph.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(dirs) = directories::ProjectDirs::from("dev", "typegraph", "typegraph") {
            let xdg_config = dirs.config_dir().join("typegraph.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // TYPEGRAPH__VALIDATION__STRICT_REFERENCES=true
        builder = builder.add_source(
            Environment::with_prefix("TYPEGRAPH")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuilderConfig::default();
        assert!(!config.validation.strict_references);
        assert!(!config.validation.check_names);
        assert!(config.validation.warn_dangling_interfaces);
    }

    #[test]
    fn test_serialize_config() {
        let config = BuilderConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[validation]"));
        assert!(toml_str.contains("strict_references = false"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strict.toml");
        std::fs::write(&path, "[validation]\nstrict_references = true\n").unwrap();

        let config = BuilderConfig::load_from(path.to_str()).unwrap();
        assert!(config.validation.strict_references);
        assert!(config.validation.warn_dangling_interfaces);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = BuilderConfig::default();
        config.validation.check_names = true;
        config.validation.warn_dangling_interfaces = false;
        config.save(path.to_str().unwrap()).unwrap();

        let loaded = BuilderConfig::load_from(path.to_str()).unwrap();
        assert!(loaded.validation.check_names);
        assert!(!loaded.validation.warn_dangling_interfaces);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(BuilderConfig::load_from(path.to_str()).is_err());
    }
}
