//! Model capabilities consumed by the analyzer.
//!
//! The token-classification model is a black box: text in, aggregated
//! `(label, score, start, end)` predictions out. This module defines that
//! contract ([`TokenClassifier`]), the token-length contract used for chunking
//! decisions ([`TokenEstimator`]), and the implementations shipped with the crate:
//!
//! - [`HttpTokenClassifier`]: Hugging Face inference-style HTTP endpoint
//! - [`CharCountEstimator`]: character-count based token estimate
//! - `HfTokenizerEstimator` (feature `hf-tokenizer`): exact counts from `tokenizer.json`

pub mod error;
pub mod estimator;
pub mod http;
mod traits;

pub use error::{ModelError, Result};
pub use estimator::{CharCountEstimator, estimator_from_config};
#[cfg(feature = "hf-tokenizer")]
pub use estimator::HfTokenizerEstimator;
pub use http::{HttpTokenClassifier, RetryPolicy, parse_predictions};
pub use traits::{RawPrediction, TokenClassifier, TokenEstimator};
