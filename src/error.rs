//! Error types for the LinkML converter
//!
//! The graph/schema transformations themselves never fail: malformed
//! references are dropped. Errors only come from parsing, I/O and
//! configuration around them.

use thiserror::Error;

/// Result type for converter operations
pub type Result<T> = std::result::Result<T, LinkmlError>;

/// Converter errors
#[derive(Error, Debug)]
pub enum LinkmlError {
    #[error("Text is not a LinkML schema (no `linkml` prefix declared)")]
    NotLinkml,

    #[error("Unknown SPIRES type: {0} (expected linkml, re or er)")]
    UnknownSpiresType(String),

    #[error("Unknown prompt command: {0}")]
    UnknownCommand(String),

    #[error("Prompt command {command} needs at least one {missing}")]
    MissingPromptTarget {
        command: String,
        missing: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
