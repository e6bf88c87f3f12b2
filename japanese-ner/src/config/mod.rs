//! Configuration system.
//!
//! Configuration is layered: built-in defaults, then the first configuration
//! file found, then an explicitly given file, then `JNER_` environment
//! variables. Nested keys are separated by a double underscore, e.g.
//! `JNER_CHUNKING__OVERLAP_RATIO=0.2`.

mod builder;
mod loader;
mod models;
pub mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;

use std::path::PathBuf;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "japanese-ner.toml",
    "japanese-ner.yaml",
    "japanese-ner.yml",
    "japanese-ner.json",
    ".japanese-ner/config.toml",
    ".japanese-ner/config.yaml",
    ".japanese-ner/config.yml",
    ".japanese-ner/config.json",
];

/// Environment variable prefix
pub const ENV_PREFIX: &str = "JNER_";

/// Why a configuration could not be produced
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly given file does not exist
    #[error("Configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// The file extension is not one of toml, yaml, yml or json
    #[error("Unsupported configuration format (expected toml, yaml or json): {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A file or `JNER_` variable does not match the configuration shape
    #[error("Configuration parsing error: {0}")]
    Parse(Box<figment::Error>),

    /// A value is outside its allowed range
    #[error("Invalid {section} configuration: {message}")]
    Invalid {
        /// Section holding the value (`model`, `chunking`, ...)
        section: &'static str,
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(section: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            section,
            message: message.into(),
        }
    }

    /// The section of an out-of-range value
    pub fn section(&self) -> Option<&'static str> {
        match self {
            Self::Invalid { section, .. } => Some(section),
            _ => None,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Parse(Box::new(err))
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
