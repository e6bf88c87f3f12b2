//! Error types for model backends

use std::fmt;
use thiserror::Error;

/// Error type for token-classification backends
#[derive(Debug, Error)]
pub enum ModelError {
    /// The backend could not be reached or refused the request
    #[error("Model unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with something that is not a prediction list
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    /// Error during tokenization
    #[error("Tokenization error: {0}")]
    Tokenization(String),

    /// Error related to backend configuration
    #[error("Model configuration error: {0}")]
    Configuration(String),

    /// IO error during model operations
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

impl ModelError {
    /// Create a new unavailable error
    pub fn unavailable(msg: impl fmt::Display) -> Self {
        Self::Unavailable(msg.to_string())
    }

    /// Create a new malformed output error
    pub fn malformed(msg: impl fmt::Display) -> Self {
        Self::MalformedOutput(msg.to_string())
    }

    /// Create a new tokenization error
    pub fn tokenization(msg: impl fmt::Display) -> Self {
        Self::Tokenization(msg.to_string())
    }

    /// Create a new configuration error
    pub fn configuration(msg: impl fmt::Display) -> Self {
        Self::Configuration(msg.to_string())
    }
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let error = ModelError::Unavailable("connection refused".to_string());
        assert_eq!(error.to_string(), "Model unavailable: connection refused");

        let error = ModelError::MalformedOutput("expected array".to_string());
        assert_eq!(error.to_string(), "Malformed model output: expected array");
    }

    #[test]
    fn test_error_factory_methods() {
        assert!(matches!(ModelError::unavailable("x"), ModelError::Unavailable(_)));
        assert!(matches!(ModelError::malformed("x"), ModelError::MalformedOutput(_)));
        assert!(matches!(ModelError::tokenization("x"), ModelError::Tokenization(_)));
        assert!(matches!(ModelError::configuration("x"), ModelError::Configuration(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "tokenizer.json not found");
        let model_error = ModelError::from(io_error);
        assert!(matches!(model_error, ModelError::IO(_)));
    }

    #[test]
    fn test_converts_into_ner_error() {
        let err: crate::NerError = ModelError::unavailable("503").into();
        assert!(matches!(err, crate::NerError::Inference(ref s) if s.contains("503")));
    }
}
