//! Batch analyzer that runs the analyzer over many documents.
//!
//! A document that fails is recorded and the batch moves on; nothing about
//! one document influences another.

use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::types::{BatchFailure, BatchOutcome, BatchProgress, Document, DocumentAnalysis};
use crate::config::BatchConfig;
use crate::documents::read_documents;
use crate::ner::Analyzer;
use crate::{NerError, Result};

/// Analyzer for batches of documents
#[derive(Debug, Clone)]
pub struct BatchAnalyzer {
    analyzer: Arc<Analyzer>,
    config: BatchConfig,
}

impl BatchAnalyzer {
    /// Create a new batch analyzer
    pub fn new(analyzer: Arc<Analyzer>, config: BatchConfig) -> Self {
        Self { analyzer, config }
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Analyze a single document, honouring the per-document timeout
    pub async fn analyze_document(&self, document: &Document) -> Result<DocumentAnalysis> {
        let started = Instant::now();
        let analysis = match self.config.document_timeout {
            Some(limit) => tokio::time::timeout(limit, self.analyzer.analyze_detailed(&document.content))
                .await
                .map_err(|_| {
                    NerError::Timeout(format!(
                        "Analysis of {} exceeded {:?}",
                        document.filename, limit
                    ))
                })??,
            None => self.analyzer.analyze_detailed(&document.content).await?,
        };

        Ok(DocumentAnalysis {
            filename: document.filename.clone(),
            content: document.content.clone(),
            entity_count: analysis.entities.len(),
            entities: analysis.entities,
            analysis_time: Utc::now(),
            elapsed_ms: started.elapsed().as_millis() as u64,
            plan: analysis.plan,
            chunk_count: analysis.chunk_count,
            failed_chunks: analysis.failed_chunks.len(),
        })
    }

    /// Analyze all documents, collecting failures instead of stopping
    pub async fn analyze_documents(&self, documents: Vec<Document>) -> BatchOutcome {
        self.analyze_documents_with_progress(documents, |_| {}).await
    }

    /// Analyze all documents, calling `progress` after each one finishes
    pub async fn analyze_documents_with_progress<F>(
        &self,
        documents: Vec<Document>,
        progress: F,
    ) -> BatchOutcome
    where
        F: Fn(BatchProgress),
    {
        let total = documents.len();
        let mut outcome = BatchOutcome::new(self.analyzer.model_name());
        info!("Starting batch analysis of {} documents", total);

        let mut results = std::pin::pin!(
            stream::iter(documents.iter().enumerate().map(|(i, document)| async move {
                info!("Processing document {}/{}: {}", i + 1, total, document.filename);
                (document, self.analyze_document(document).await)
            }))
            .buffered(self.config.max_concurrent_documents.max(1))
        );

        let mut completed = 0;
        while let Some((document, result)) = results.next().await {
            completed += 1;
            let succeeded = result.is_ok();
            match result {
                Ok(analysis) => {
                    info!(
                        "Extracted {} entities from {}",
                        analysis.entity_count, analysis.filename
                    );
                    outcome.results.push(analysis);
                }
                Err(error) => {
                    warn!("Analysis of {} failed: {}", document.filename, error);
                    outcome.failures.push(BatchFailure {
                        filename: document.filename.clone(),
                        error: error.to_string(),
                    });
                }
            }
            progress(BatchProgress {
                completed,
                total,
                filename: document.filename.clone(),
                succeeded,
            });
        }

        outcome.finished_at = Utc::now();
        info!(
            "Batch analysis complete. Processed {} documents with {} total entities ({} failed)",
            outcome.document_count(),
            outcome.total_entities(),
            outcome.failures.len()
        );
        outcome
    }

    /// Read documents from `path` and analyze them
    pub async fn analyze_path(&self, path: impl AsRef<Path>) -> Result<BatchOutcome> {
        let path = path.as_ref();
        info!("Reading documents from: {}", path.display());
        let documents = read_documents(path)?;
        info!("Found {} documents", documents.len());
        Ok(self.analyze_documents(documents).await)
    }
}
