//! Types for batch analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ner::{AnalysisPlan, Entity};

/// An input document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Display name, usually the file name
    pub filename: String,
    /// Raw text
    pub content: String,
}

impl Document {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// Result of analyzing one document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentAnalysis {
    pub filename: String,
    pub content: String,
    /// Entities in reading order
    pub entities: Vec<Entity>,
    pub entity_count: usize,
    /// When the analysis finished
    pub analysis_time: DateTime<Utc>,
    /// Wall-clock duration of the analysis in milliseconds
    pub elapsed_ms: u64,
    pub plan: AnalysisPlan,
    /// Model calls issued for this document
    pub chunk_count: usize,
    /// Chunks skipped because their model call failed
    pub failed_chunks: usize,
}

/// A document whose analysis failed entirely
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFailure {
    pub filename: String,
    pub error: String,
}

/// Progress notification, sent once per finished document
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Documents finished so far, this one included
    pub completed: usize,
    pub total: usize,
    pub filename: String,
    pub succeeded: bool,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    /// Unique identifier of this run
    pub run_id: Uuid,
    pub model: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Successful analyses, in input order
    pub results: Vec<DocumentAnalysis>,
    /// Failed documents, in input order
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// Create an empty outcome for a run starting now
    pub fn new(model: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            run_id: Uuid::new_v4(),
            model: model.into(),
            started_at: now,
            finished_at: now,
            results: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Number of documents processed, failed ones included
    pub fn document_count(&self) -> usize {
        self.results.len() + self.failures.len()
    }

    /// Entities across all successful documents
    pub fn total_entities(&self) -> usize {
        self.results.iter().map(|r| r.entity_count).sum()
    }

    /// Check if all documents were analyzed
    pub fn all_successful(&self) -> bool {
        self.failures.is_empty()
    }

    /// Check if any document failed
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
