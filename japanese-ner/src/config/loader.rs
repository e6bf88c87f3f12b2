//! Configuration loader.
//!
//! This module provides functionality to load configuration from multiple sources.

use super::{ConfigError, DEFAULT_CONFIG_FILES, ENV_PREFIX, Result, models::*, validation};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader that handles loading from multiple sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    figment: Figment,
    loaded_files: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader with default values.
    pub fn new() -> Self {
        let figment = Figment::new().merge(Serialized::defaults(NerConfig::default()));
        Self {
            figment,
            loaded_files: Vec::new(),
        }
    }

    /// Load configuration from a file.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }

        let extension = path.extension().and_then(|ext| ext.to_str());
        if !matches!(extension, Some("toml" | "yaml" | "yml" | "json")) {
            return Err(ConfigError::UnsupportedFormat(path.to_path_buf()));
        }

        let figment = std::mem::take(&mut self.figment);
        self.figment = match extension {
            Some("toml") => figment.merge(Toml::file(path)),
            Some("json") => figment.merge(Json::file(path)),
            _ => figment.merge(Yaml::file(path)),
        };

        debug!("Loaded configuration file {}", path.display());
        self.loaded_files.push(path.to_path_buf());
        Ok(self)
    }

    /// Load the first configuration file found in the working directory,
    /// then the first one found in the platform configuration directory.
    pub fn load_default_files(&mut self) -> &mut Self {
        self.load_default_files_from(Path::new("."))
    }

    /// Like [`load_default_files`](Self::load_default_files), resolving the
    /// local candidates against `base`.
    pub fn load_default_files_from(&mut self, base: &Path) -> &mut Self {
        for file in DEFAULT_CONFIG_FILES {
            let path = base.join(file);
            if path.exists() && self.load_file(&path).is_ok() {
                break;
            }
        }

        if let Some(proj_dirs) = directories::ProjectDirs::from("org", "japanese-ner", "japanese-ner") {
            let config_dir = proj_dirs.config_dir();

            for ext in &["toml", "yaml", "yml", "json"] {
                let path = config_dir.join(format!("config.{}", ext));
                if path.exists() && self.load_file(&path).is_ok() {
                    break;
                }
            }
        }

        self
    }

    /// Load configuration from `JNER_` environment variables.
    pub fn load_env(&mut self) -> &mut Self {
        let figment = std::mem::take(&mut self.figment).merge(Env::prefixed(ENV_PREFIX).split("__"));
        self.figment = figment;
        self
    }

    /// Load configuration from a custom source.
    pub fn merge<T: figment::Provider>(&mut self, provider: T) -> &mut Self {
        let figment = std::mem::take(&mut self.figment).merge(provider);
        self.figment = figment;
        self
    }

    /// Files merged so far, in order
    pub fn loaded_files(&self) -> &[PathBuf] {
        &self.loaded_files
    }

    /// Extract and validate the configuration.
    pub fn extract(&self) -> Result<NerConfig> {
        let config: NerConfig = self.figment.extract()?;

        validation::validate_config(&config)?;

        Ok(config)
    }

    /// Defaults, default files, an optional explicit file, then environment.
    pub fn load(explicit: Option<&Path>) -> Result<NerConfig> {
        let mut loader = Self::new();
        loader.load_default_files();
        if let Some(path) = explicit {
            loader.load_file(path)?;
        }
        loader.load_env();
        loader.extract()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
