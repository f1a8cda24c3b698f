//! Configuration for the converter
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (arrows-linkml.toml)
//! - Environment variables (ARROWS_LINKML__*)
//!
//! ## Example config file (arrows-linkml.toml):
//! ```toml
//! [export]
//! schema_name = "zoo"
//! spires_type = "re"
//!
//! [import]
//! use_builtin_ontologies = true
//!
//! [output]
//! format = "yaml"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::linkml::SpiresType;
use crate::model::Ontology;

/// Main configuration for the converter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Graph -> LinkML settings
    #[serde(default)]
    pub export: ExportConfig,

    /// LinkML -> Graph settings
    #[serde(default)]
    pub import: ImportConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Schema name used when the diagram has none
    #[serde(default = "default_schema_name")]
    pub schema_name: String,

    /// Root structure to generate (linkml, re or er)
    #[serde(default = "default_spires_type")]
    pub spires_type: String,
}

/// Import configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Resolve `id_prefixes` against the built-in ontology table
    #[serde(default = "default_true")]
    pub use_builtin_ontologies: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Schema output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

// Default value functions
fn default_schema_name() -> String {
    "schema".to_string()
}

fn default_spires_type() -> String {
    "re".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            schema_name: default_schema_name(),
            spires_type: default_spires_type(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            use_builtin_ontologies: true,
        }
    }
}

impl ConverterConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the default locations
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = [
            "arrows-linkml.toml",
            ".arrows-linkml.toml",
            "config/arrows-linkml.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(dirs) = directories::ProjectDirs::from("org", "arrows", "arrows-linkml") {
            let xdg_config = dirs.config_dir().join("arrows-linkml.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // ARROWS_LINKML__EXPORT__SCHEMA_NAME and friends
        builder = builder.add_source(
            Environment::with_prefix("ARROWS_LINKML")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// The configured generation mode
    pub fn spires_type(&self) -> Result<SpiresType> {
        self.export.spires_type.parse()
    }

    /// Ontologies to resolve imported `id_prefixes` against
    pub fn ontologies(&self) -> Vec<Ontology> {
        if self.import.use_builtin_ontologies {
            Ontology::builtin()
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LinkmlError;

    #[test]
    fn test_default_config() {
        let config = ConverterConfig::default();
        assert_eq!(config.export.schema_name, "schema");
        assert_eq!(config.spires_type().unwrap(), SpiresType::Re);
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert!(!config.ontologies().is_empty());
    }

    #[test]
    fn test_serialize_config() {
        let config = ConverterConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[export]"));
        assert!(toml_str.contains("[import]"));
        assert!(toml_str.contains("format = \"yaml\""));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[export]\nschema_name = \"zoo\"\nspires_type = \"er\"\n\n[import]\nuse_builtin_ontologies = false\n\n[output]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = ConverterConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.export.schema_name, "zoo");
        assert_eq!(config.spires_type().unwrap(), SpiresType::Er);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.ontologies().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = ConverterConfig::default();
        config.export.spires_type = "linkml".into();
        config.save(&path).unwrap();

        let loaded = ConverterConfig::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.spires_type().unwrap(), SpiresType::LinkMl);
    }

    #[test]
    fn test_bad_spires_type() {
        let mut config = ConverterConfig::default();
        config.export.spires_type = "graph".into();
        assert!(matches!(config.spires_type(), Err(LinkmlError::UnknownSpiresType(_))));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            ConverterConfig::load_from(Some(&missing)),
            Err(LinkmlError::Config(_))
        ));
    }
}
