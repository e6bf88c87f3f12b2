//! Token count estimators.

use std::sync::Arc;

use super::error::Result;
use super::traits::TokenEstimator;
use crate::config::ModelConfig;

/// Pick the estimator described by the model configuration.
///
/// A `tokenizer_path` selects exact counts, which needs the `hf-tokenizer`
/// feature; otherwise characters are counted with `tokens_per_char`.
pub fn estimator_from_config(config: &ModelConfig) -> Result<Arc<dyn TokenEstimator>> {
    match &config.tokenizer_path {
        #[cfg(feature = "hf-tokenizer")]
        Some(path) => Ok(Arc::new(HfTokenizerEstimator::from_file(path)?)),
        #[cfg(not(feature = "hf-tokenizer"))]
        Some(path) => Err(super::error::ModelError::configuration(format!(
            "tokenizer_path {} requires the hf-tokenizer feature",
            path.display()
        ))),
        None => Ok(Arc::new(CharCountEstimator::with_ratio(config.tokens_per_char))),
    }
}

/// Estimates tokens from the character count.
///
/// SentencePiece vocabularies for Japanese rarely produce more than one token
/// per character, so the default ratio of 1.0 errs on the safe side.
#[derive(Debug, Clone)]
pub struct CharCountEstimator {
    tokens_per_char: f64,
}

impl CharCountEstimator {
    /// Create an estimator with a ratio of one token per character
    pub fn new() -> Self {
        Self::with_ratio(1.0)
    }

    /// Create an estimator with a custom tokens-per-character ratio
    pub fn with_ratio(tokens_per_char: f64) -> Self {
        let tokens_per_char = if tokens_per_char.is_finite() && tokens_per_char > 0.0 {
            tokens_per_char
        } else {
            1.0
        };
        Self { tokens_per_char }
    }

    pub fn tokens_per_char(&self) -> f64 {
        self.tokens_per_char
    }
}

impl Default for CharCountEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenEstimator for CharCountEstimator {
    fn estimate_token_count(&self, text: &str) -> usize {
        let chars = text.chars().count();
        (chars as f64 * self.tokens_per_char).ceil() as usize
    }

    fn name(&self) -> &str {
        "char_count"
    }
}

#[cfg(feature = "hf-tokenizer")]
pub use hf::HfTokenizerEstimator;

#[cfg(feature = "hf-tokenizer")]
mod hf {
    use super::super::error::{ModelError, Result};
    use super::{CharCountEstimator, TokenEstimator};
    use std::path::Path;

    /// Exact token counts from a Hugging Face `tokenizer.json`.
    pub struct HfTokenizerEstimator {
        tokenizer: tokenizers::Tokenizer,
        fallback: CharCountEstimator,
    }

    impl std::fmt::Debug for HfTokenizerEstimator {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("HfTokenizerEstimator").finish_non_exhaustive()
        }
    }

    impl HfTokenizerEstimator {
        /// Load a tokenizer from a `tokenizer.json` file
        pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
            let path = path.as_ref();
            let tokenizer = tokenizers::Tokenizer::from_file(path).map_err(|e| {
                ModelError::tokenization(format!(
                    "Failed to load tokenizer from {}: {}",
                    path.display(),
                    e
                ))
            })?;
            Ok(Self {
                tokenizer,
                fallback: CharCountEstimator::new(),
            })
        }
    }

    impl TokenEstimator for HfTokenizerEstimator {
        fn estimate_token_count(&self, text: &str) -> usize {
            match self.tokenizer.encode(text, false) {
                Ok(encoding) => encoding.len(),
                Err(e) => {
                    tracing::warn!(error = %e, "Tokenizer failed, falling back to character count");
                    self.fallback.estimate_token_count(text)
                }
            }
        }

        fn name(&self) -> &str {
            "hf_tokenizer"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_count_estimate() {
        let estimator = CharCountEstimator::new();
        assert_eq!(estimator.estimate_token_count(""), 0);
        assert_eq!(estimator.estimate_token_count("東京大学"), 4);
        assert_eq!(estimator.estimate_token_count("abc"), 3);
    }

    #[test]
    fn test_ratio_rounds_up() {
        let estimator = CharCountEstimator::with_ratio(1.5);
        assert_eq!(estimator.estimate_token_count("東京大"), 5);
    }

    #[test]
    fn test_invalid_ratio_defaults() {
        assert_eq!(CharCountEstimator::with_ratio(0.0).tokens_per_char(), 1.0);
        assert_eq!(CharCountEstimator::with_ratio(f64::NAN).tokens_per_char(), 1.0);
    }

    #[test]
    fn test_estimator_from_config() {
        let config = ModelConfig {
            tokens_per_char: 2.0,
            ..ModelConfig::default()
        };
        let estimator = estimator_from_config(&config).unwrap();
        assert_eq!(estimator.name(), "char_count");
        assert_eq!(estimator.estimate_token_count("東京"), 4);
    }

    #[test]
    fn test_monotonic_in_length() {
        let estimator = CharCountEstimator::with_ratio(0.7);
        let text = "日本語の文章を少しずつ長くしていく。";
        let mut previous = 0;
        for (end, _) in text.char_indices().skip(1) {
            let estimate = estimator.estimate_token_count(&text[..end]);
            assert!(estimate >= previous);
            previous = estimate;
        }
    }
}
