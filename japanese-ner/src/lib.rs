//! # Japanese NER
//!
//! Named entity extraction for Japanese documents of any length, built around a
//! pretrained token-classification model that is consumed as a black box.
//!
//! The interesting part is not the model call but what happens around it: text
//! longer than the model's input limit is split into overlapping windows, each
//! window is classified, window-local character offsets are translated back to
//! document offsets, and mentions detected twice in an overlap region are merged
//! into one.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use japanese_ner::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ConfigBuilder::new()
//!         .with_model_name("tsmatz/xlm-roberta-ner-japanese")
//!         .build()?;
//!
//!     let classifier = HttpTokenClassifier::from_config(&config.model)?;
//!     let analyzer = Analyzer::builder()
//!         .classifier(Arc::new(classifier))
//!         .config(&config)
//!         .build()?;
//!
//!     for entity in analyzer.analyze("田中太郎は東京大学の教授です。").await? {
//!         println!("{} [{}] {}..{}", entity.word, entity.label, entity.start, entity.end);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **ner**: label vocabulary, chunker, span mapper, entity merger, analyzer
//! - **model**: the consumed capabilities (`TokenClassifier`, `TokenEstimator`)
//!   and their implementations
//! - **batch**: fan-out over many documents with failure collection
//! - **documents** / **report**: input reading and CSV / Markdown / JSON output

pub mod batch;
pub mod config;
pub mod documents;
pub mod logging;
pub mod model;
pub mod ner;
pub mod report;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{
        ChunkingConfig, ConfigBuilder, ConfigLoader, LogFormat, LogLevel, MergeConfig, NerConfig,
    };

    pub use crate::ner::{
        Analysis, AnalysisPlan, AnalysisStage, Analyzer, AnalyzerBuilder, Chunk, Chunker, Entity,
        EntityLabel, EntityMerger, SpanMapper,
    };

    pub use crate::model::{
        CharCountEstimator, HttpTokenClassifier, RawPrediction, TokenClassifier, TokenEstimator,
    };

    pub use crate::batch::{BatchAnalyzer, BatchOutcome, Document, DocumentAnalysis};

    pub use crate::{NerError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for NER operations
#[derive(Debug, thiserror::Error)]
pub enum NerError {
    /// A mapped entity span falls outside the document
    #[error("Invalid span [{start}, {end}) for a document of {len} characters")]
    InvalidSpan {
        start: usize,
        end: usize,
        len: usize,
    },

    /// The model produced a label outside the closed vocabulary
    #[error("Unsupported entity label: {0}")]
    UnsupportedLabel(String),

    /// A single model invocation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// Every chunk of a document failed inference
    #[error(
        "Inference unavailable: all {chunks} chunk(s) failed. Last error: {reason}. Check that the model endpoint is reachable"
    )]
    InferenceUnavailable { chunks: usize, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Input documents could not be read
    #[error("Document error: {0}")]
    Document(String),

    /// Report generation failed
    #[error("Report error: {0}")]
    Report(String),

    /// Per-document analysis exceeded its deadline
    #[error("Timeout error: {0}. Try increasing batch.document_timeout")]
    Timeout(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for NerError {
    fn from(err: crate::config::ConfigError) -> Self {
        NerError::Configuration(err.to_string())
    }
}

impl From<crate::model::ModelError> for NerError {
    fn from(err: crate::model::ModelError) -> Self {
        NerError::Inference(err.to_string())
    }
}

/// Result type for NER operations
pub type Result<T> = std::result::Result<T, NerError>;
