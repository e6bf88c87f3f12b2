//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use std::path::Path;
use std::time::Duration;

/// Builder for creating NerConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: NerConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: NerConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: NerConfig) -> Self {
        Self { config }
    }

    /// Set the model name.
    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.config.model.name = name.into();
        self
    }

    /// Set the inference endpoint base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.model.endpoint = endpoint.into();
        self
    }

    /// Set the API token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.config.model.api_token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.config.model.timeout = timeout;
        self
    }

    /// Use a `tokenizer.json` for token counts.
    pub fn with_tokenizer_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.model.tokenizer_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the model's hard input limit.
    pub fn with_max_input_tokens(mut self, tokens: usize) -> Self {
        self.config.chunking.max_input_tokens = tokens;
        self
    }

    /// Set the target window length.
    pub fn with_chunk_tokens(mut self, tokens: usize) -> Self {
        self.config.chunking.chunk_tokens = tokens;
        self
    }

    /// Set the window overlap ratio.
    pub fn with_overlap_ratio(mut self, ratio: f64) -> Self {
        self.config.chunking.overlap_ratio = ratio;
        self
    }

    /// Set the longest mention guaranteed to survive a window boundary.
    pub fn with_max_mention_chars(mut self, chars: usize) -> Self {
        self.config.chunking.max_mention_chars = chars;
        self
    }

    /// Set the merge overlap threshold.
    pub fn with_merge_threshold(mut self, threshold: f64) -> Self {
        self.config.merging.overlap_threshold = threshold;
        self
    }

    /// Set the minimum entity score.
    pub fn with_min_score(mut self, score: f64) -> Self {
        self.config.analysis.min_score = score;
        self
    }

    /// Set how many chunk requests may be in flight per document.
    pub fn with_max_concurrent_chunks(mut self, max: usize) -> Self {
        self.config.analysis.max_concurrent_chunks = max;
        self
    }

    /// Set how many documents are analyzed at the same time.
    pub fn with_max_concurrent_documents(mut self, max: usize) -> Self {
        self.config.batch.max_concurrent_documents = max;
        self
    }

    /// Set the per-document deadline.
    pub fn with_document_timeout(mut self, timeout: Duration) -> Self {
        self.config.batch.document_timeout = Some(timeout);
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Write daily rolling log files into `directory`.
    pub fn with_log_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.config.logging.directory = Some(directory.as_ref().to_path_buf());
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<NerConfig> {
        validation::validate_config(&self.config)?;
        Ok(self.config)
    }

    /// Build the configuration without validation.
    pub fn build_unchecked(self) -> NerConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
