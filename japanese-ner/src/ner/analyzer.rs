//! Analyzer: decide, chunk, infer, map, merge.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{Instrument, debug, debug_span, info, warn};

use super::chunker::Chunker;
use super::label::ParsedTag;
use super::merger::{EntityMerger, sort_reading_order};
use super::span::SpanMapper;
use super::traits::{EntityPostProcessor, EntityValidator};
use super::validators::{BlankWordValidator, ConfidenceValidator};
use super::{Chunk, Entity, EntityLabel};
use crate::config::{AnalysisConfig, ChunkingConfig, MergeConfig, ModelConfig, NerConfig, validation};
use crate::model::{RawPrediction, TokenClassifier, TokenEstimator, estimator_from_config};
use crate::{NerError, Result};

/// How a document is fed to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisPlan {
    /// The whole text fits in one model call
    SinglePass,
    /// The text is split into overlapping windows
    Chunked,
}

/// Pipeline stages of one analysis call, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    NotChunked,
    Chunking,
    Inferring,
    Mapping,
    Merging,
    Done,
}

/// A chunk whose model call failed
#[derive(Debug, Clone, Serialize)]
pub struct ChunkFailure {
    pub index: usize,
    pub offset: usize,
    pub error: String,
}

/// Entities of one text plus what happened on the way
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Final entities in reading order
    pub entities: Vec<Entity>,
    pub plan: AnalysisPlan,
    /// Stages visited, in order
    pub stages: Vec<AnalysisStage>,
    /// Number of model calls issued
    pub chunk_count: usize,
    pub failed_chunks: Vec<ChunkFailure>,
    /// Predictions dropped for an out-of-range span
    pub dropped_spans: usize,
    /// Predictions dropped for a label outside the vocabulary
    pub dropped_labels: usize,
    /// Entities rejected by validators
    pub filtered: usize,
    /// Entities removed as duplicates by the merger
    pub merged: usize,
}

impl Analysis {
    fn new(plan: AnalysisPlan) -> Self {
        Self {
            entities: Vec::new(),
            plan,
            stages: Vec::new(),
            chunk_count: 0,
            failed_chunks: Vec::new(),
            dropped_spans: 0,
            dropped_labels: 0,
            filtered: 0,
            merged: 0,
        }
    }

    fn advance(&mut self, stage: AnalysisStage) {
        self.stages.push(stage);
    }

    /// The last stage reached
    pub fn stage(&self) -> Option<AnalysisStage> {
        self.stages.last().copied()
    }

    /// Whether some chunks failed but the analysis still produced a result
    pub fn is_partial(&self) -> bool {
        !self.failed_chunks.is_empty()
    }
}

/// Named entity analyzer for texts of any length.
///
/// Each call is independent: no state is carried from one text to the next.
pub struct Analyzer {
    classifier: Arc<dyn TokenClassifier>,
    chunker: Chunker,
    merger: EntityMerger,
    validators: Vec<Box<dyn EntityValidator>>,
    post_processors: Vec<Box<dyn EntityPostProcessor>>,
    max_concurrent_chunks: usize,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("classifier", &self.classifier.name())
            .field("chunker", &self.chunker)
            .field("merger", &self.merger)
            .field("validators", &self.validators.len())
            .field("post_processors", &self.post_processors.len())
            .field("max_concurrent_chunks", &self.max_concurrent_chunks)
            .finish()
    }
}

impl Analyzer {
    /// Create a new analyzer builder
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Name of the underlying model
    pub fn model_name(&self) -> &str {
        self.classifier.name()
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Labels this analyzer can emit
    pub fn supported_labels(&self) -> BTreeSet<&'static str> {
        EntityLabel::ALL.iter().map(EntityLabel::as_str).collect()
    }

    /// Decide whether `text` is analyzed in one call or in windows
    pub fn plan(&self, text: &str) -> AnalysisPlan {
        if self.chunker.needs_chunking(text) {
            AnalysisPlan::Chunked
        } else {
            AnalysisPlan::SinglePass
        }
    }

    /// Extract entities from `text`, in reading order
    pub async fn analyze(&self, text: &str) -> Result<Vec<Entity>> {
        Ok(self.analyze_detailed(text).await?.entities)
    }

    /// Extract entities and report how the analysis went.
    ///
    /// Empty or whitespace-only text yields no entities without calling the
    /// model. A chunk whose model call fails is skipped; the call fails with
    /// [`NerError::InferenceUnavailable`] only when every chunk failed.
    pub async fn analyze_detailed(&self, text: &str) -> Result<Analysis> {
        if text.trim().is_empty() {
            debug!("Empty input, nothing to analyze");
            let mut analysis = Analysis::new(AnalysisPlan::SinglePass);
            analysis.advance(AnalysisStage::Done);
            return Ok(analysis);
        }

        let plan = self.plan(text);
        let mut analysis = Analysis::new(plan);
        analysis.advance(match plan {
            AnalysisPlan::SinglePass => AnalysisStage::NotChunked,
            AnalysisPlan::Chunked => AnalysisStage::Chunking,
        });

        let chunks = self.chunker.split(text);
        analysis.chunk_count = chunks.len();
        debug!(
            plan = ?plan,
            chunks = chunks.len(),
            estimated_tokens = self.chunker.estimate(text),
            "Analysis planned"
        );

        analysis.advance(AnalysisStage::Inferring);
        let outputs = self.infer_chunks(&chunks).await;

        analysis.advance(AnalysisStage::Mapping);
        let mapper = SpanMapper::new(text);
        let mut entities = Vec::new();
        let mut last_error = None;
        for (chunk, output) in chunks.iter().zip(outputs) {
            match output {
                Ok(predictions) => {
                    self.map_predictions(&mapper, chunk, &predictions, &mut analysis, &mut entities);
                }
                Err(error) => {
                    warn!(
                        "Inference failed for chunk {} (offset {}), skipping it: {}",
                        chunk.index, chunk.offset, error
                    );
                    analysis.failed_chunks.push(ChunkFailure {
                        index: chunk.index,
                        offset: chunk.offset,
                        error: error.to_string(),
                    });
                    last_error = Some(error);
                }
            }
        }

        if analysis.failed_chunks.len() == chunks.len() {
            return Err(NerError::InferenceUnavailable {
                chunks: chunks.len(),
                reason: last_error
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "no chunks were produced".to_string()),
            });
        }

        // Validators run on merged entities, never on raw chunk detections
        analysis.advance(AnalysisStage::Merging);
        let before = entities.len();
        let mut entities = match plan {
            AnalysisPlan::Chunked => self.merger.merge(entities),
            AnalysisPlan::SinglePass => {
                sort_reading_order(&mut entities);
                entities
            }
        };
        analysis.merged = before - entities.len();

        let before = entities.len();
        entities.retain(|entity| {
            self.validators
                .iter()
                .all(|validator| validator.validate(entity, text))
        });
        analysis.filtered = before - entities.len();

        if !self.post_processors.is_empty() {
            entities = self
                .post_processors
                .iter()
                .fold(entities, |entities, processor| processor.process(entities));
            sort_reading_order(&mut entities);
        }

        analysis.entities = entities;
        analysis.advance(AnalysisStage::Done);

        info!(
            "Analyzed {} characters: {} entities from {} chunk(s), {} failed",
            mapper.document_len(),
            analysis.entities.len(),
            analysis.chunk_count,
            analysis.failed_chunks.len()
        );
        Ok(analysis)
    }

    /// Run the model over every chunk with bounded concurrency.
    ///
    /// Results come back in chunk order, whatever order the calls finish in.
    async fn infer_chunks(
        &self,
        chunks: &[Chunk<'_>],
    ) -> Vec<crate::model::Result<Vec<RawPrediction>>> {
        stream::iter(chunks.iter().map(|chunk| {
            let span = debug_span!(
                "chunk",
                index = chunk.index,
                offset = chunk.offset,
                chars = chunk.char_len()
            );
            self.classifier.classify(chunk.text).instrument(span)
        }))
        .buffered(self.max_concurrent_chunks.max(1))
        .collect()
        .await
    }

    fn map_predictions(
        &self,
        mapper: &SpanMapper<'_>,
        chunk: &Chunk<'_>,
        predictions: &[RawPrediction],
        analysis: &mut Analysis,
        entities: &mut Vec<Entity>,
    ) {
        for prediction in predictions {
            let label = match EntityLabel::parse_tag(&prediction.label) {
                Ok(ParsedTag::Entity(label)) => label,
                Ok(ParsedTag::Outside) => {
                    debug!("Skipping outside tag at {}..{}", prediction.start, prediction.end);
                    continue;
                }
                Err(error) => {
                    warn!("Dropping prediction in chunk {}: {}", chunk.index, error);
                    analysis.dropped_labels += 1;
                    continue;
                }
            };

            match mapper.to_entity(chunk.offset, prediction, label) {
                Ok(entity) => entities.push(entity),
                Err(error) => {
                    warn!("Dropping prediction in chunk {}: {}", chunk.index, error);
                    analysis.dropped_spans += 1;
                }
            }
        }
    }
}

/// Builder for creating analyzers
pub struct AnalyzerBuilder {
    classifier: Option<Arc<dyn TokenClassifier>>,
    estimator: Option<Arc<dyn TokenEstimator>>,
    model: ModelConfig,
    chunking: ChunkingConfig,
    merging: MergeConfig,
    analysis: AnalysisConfig,
    validators: Vec<Box<dyn EntityValidator>>,
    post_processors: Vec<Box<dyn EntityPostProcessor>>,
}

impl AnalyzerBuilder {
    /// Create a new analyzer builder with default settings
    pub fn new() -> Self {
        Self {
            classifier: None,
            estimator: None,
            model: ModelConfig::default(),
            chunking: ChunkingConfig::default(),
            merging: MergeConfig::default(),
            analysis: AnalysisConfig::default(),
            validators: Vec::new(),
            post_processors: Vec::new(),
        }
    }

    /// Set the token classification model
    pub fn classifier(mut self, classifier: Arc<dyn TokenClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Set the token count estimator (defaults to the one the model
    /// configuration describes)
    pub fn estimator(mut self, estimator: Arc<dyn TokenEstimator>) -> Self {
        self.estimator = Some(estimator);
        self
    }

    /// Take model, chunking, merging and analysis settings from a configuration
    pub fn config(mut self, config: &NerConfig) -> Self {
        self.model = config.model.clone();
        self.chunking = config.chunking.clone();
        self.merging = config.merging.clone();
        self.analysis = config.analysis.clone();
        self
    }

    pub fn chunking(mut self, chunking: ChunkingConfig) -> Self {
        self.chunking = chunking;
        self
    }

    pub fn merging(mut self, merging: MergeConfig) -> Self {
        self.merging = merging;
        self
    }

    /// Maximum number of chunk requests in flight for one document
    pub fn max_concurrent_chunks(mut self, max: usize) -> Self {
        self.analysis.max_concurrent_chunks = max;
        self
    }

    /// Add a validator to the pipeline
    pub fn validator(mut self, validator: Box<dyn EntityValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Add a post-processor, run after merging
    pub fn post_processor(mut self, post_processor: Box<dyn EntityPostProcessor>) -> Self {
        self.post_processors.push(post_processor);
        self
    }

    /// Build the analyzer
    pub fn build(self) -> Result<Analyzer> {
        let classifier = self
            .classifier
            .ok_or_else(|| NerError::Configuration("Analyzer requires a classifier".to_string()))?;

        validation::validate_chunking(&self.chunking)?;
        validation::validate_merging(&self.merging)?;
        validation::validate_analysis(&self.analysis)?;

        let estimator = match self.estimator {
            Some(estimator) => estimator,
            None => estimator_from_config(&self.model)
                .map_err(|e| NerError::Configuration(e.to_string()))?,
        };

        let mut validators = self.validators;
        validators.push(Box::new(BlankWordValidator));
        if self.analysis.min_score > 0.0 {
            validators.push(Box::new(ConfidenceValidator::new(self.analysis.min_score)));
        }

        Ok(Analyzer {
            classifier,
            chunker: Chunker::new(estimator, self.chunking),
            merger: EntityMerger::from_config(&self.merging),
            validators,
            post_processors: self.post_processors,
            max_concurrent_chunks: self.analysis.max_concurrent_chunks,
        })
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
