use japanese_ner::batch::BatchAnalyzer;
use japanese_ner::config::{ConfigBuilder, ConfigLoader, LogLevel};
use japanese_ner::model::{HttpTokenClassifier, TokenClassifier};
use japanese_ner::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// Command-line values that take precedence over files and environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub min_score: Option<f64>,
    pub max_concurrent_documents: Option<usize>,
    pub log_level: Option<LogLevel>,
}

impl ConfigOverrides {
    /// Apply the overrides and validate the result
    pub fn apply(&self, config: NerConfig) -> Result<NerConfig> {
        let mut builder = ConfigBuilder::from_config(config);
        if let Some(model) = &self.model {
            builder = builder.with_model_name(model.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            builder = builder.with_endpoint(endpoint.clone());
        }
        if let Some(score) = self.min_score {
            builder = builder.with_min_score(score);
        }
        if let Some(max) = self.max_concurrent_documents {
            builder = builder.with_max_concurrent_documents(max);
        }
        if let Some(level) = self.log_level {
            builder = builder.with_log_level(level);
        }
        Ok(builder.build()?)
    }
}

/// Load configuration from files and environment, then apply `overrides`
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<NerConfig> {
    let config = ConfigLoader::load(path)?;
    overrides.apply(config)
}

pub struct NerCliContext {
    pub config: NerConfig,
    pub analyzer: Arc<Analyzer>,
}

impl NerCliContext {
    /// Build a context backed by the configured HTTP inference endpoint
    pub fn new(config: NerConfig) -> Result<Self> {
        let classifier = HttpTokenClassifier::from_config(&config.model)?;
        Self::with_classifier(config, Arc::new(classifier))
    }

    /// Build a context around any classifier
    pub fn with_classifier(config: NerConfig, classifier: Arc<dyn TokenClassifier>) -> Result<Self> {
        let analyzer = Analyzer::builder()
            .classifier(classifier)
            .config(&config)
            .build()?;

        Ok(Self {
            config,
            analyzer: Arc::new(analyzer),
        })
    }

    pub fn batch_analyzer(&self) -> BatchAnalyzer {
        BatchAnalyzer::new(self.analyzer.clone(), self.config.batch.clone())
    }
}
