//! Capabilities consumed by the analyzer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::Result;

/// One raw detection as reported by a token-classification model.
///
/// Offsets are character positions local to the text that was classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    /// Model tag (e.g. "PER", "ORG-P")
    pub label: String,
    /// Raw confidence score from the model (0.0 to 1.0)
    pub score: f64,
    /// Starting character position in the classified text
    pub start: usize,
    /// Ending character position (exclusive) in the classified text
    pub end: usize,
}

impl RawPrediction {
    /// Create a new raw prediction
    pub fn new(label: impl Into<String>, score: f64, start: usize, end: usize) -> Self {
        Self {
            label: label.into(),
            score,
            start,
            end,
        }
    }
}

/// Trait for token-classification models.
///
/// Implementations must be safe to call concurrently; the analyzer may classify
/// several chunks of one document at the same time.
#[async_trait]
pub trait TokenClassifier: Send + Sync {
    /// Classify `text`, returning aggregated entity predictions.
    async fn classify(&self, text: &str) -> Result<Vec<RawPrediction>>;

    /// Get the name of this classifier for identification purposes.
    fn name(&self) -> &str;
}

/// Estimates how many model tokens a text will occupy.
///
/// May be approximate, but must be monotonic: a longer substring never yields
/// a smaller estimate than a substring it contains.
pub trait TokenEstimator: Send + Sync {
    /// Estimated token count of `text`, excluding special tokens.
    fn estimate_token_count(&self, text: &str) -> usize;

    /// Get the name of this estimator
    fn name(&self) -> &str;
}
