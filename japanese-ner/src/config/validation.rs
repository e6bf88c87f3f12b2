//! Configuration validation utilities.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &NerConfig) -> Result<(), ConfigError> {
    validate_model(&config.model)?;
    validate_chunking(&config.chunking)?;
    validate_merging(&config.merging)?;
    validate_analysis(&config.analysis)?;
    validate_batch(&config.batch)?;
    Ok(())
}

/// Validate model configuration.
pub fn validate_model(config: &ModelConfig) -> Result<(), ConfigError> {
    if config.name.trim().is_empty() {
        return Err(ConfigError::invalid("model", "name cannot be empty"));
    }

    if config.endpoint.trim().is_empty() {
        return Err(ConfigError::invalid("model", "endpoint cannot be empty"));
    }

    if config.timeout.is_zero() {
        return Err(ConfigError::invalid(
            "model",
            "timeout must be greater than zero",
        ));
    }

    if !(config.tokens_per_char.is_finite() && config.tokens_per_char > 0.0) {
        return Err(ConfigError::invalid(
            "model",
            format!(
                "tokens_per_char must be positive, got {}",
                config.tokens_per_char
            ),
        ));
    }

    Ok(())
}

/// Validate chunking configuration.
///
/// A window must fit the model with room to spare for the overlap, and the
/// overlap must leave progress, otherwise chunking could not terminate.
pub fn validate_chunking(config: &ChunkingConfig) -> Result<(), ConfigError> {
    let limit = config.effective_limit();
    if limit == 0 {
        return Err(ConfigError::invalid(
            "chunking",
            format!(
                "special_tokens_reserve ({}) leaves no room in max_input_tokens ({})",
                config.special_tokens_reserve, config.max_input_tokens
            ),
        ));
    }

    if config.chunk_tokens == 0 || config.chunk_tokens > limit {
        return Err(ConfigError::invalid(
            "chunking",
            format!(
                "chunk_tokens must be between 1 and {} (max_input_tokens - special_tokens_reserve), got {}",
                limit, config.chunk_tokens
            ),
        ));
    }

    if !(config.overlap_ratio > 0.0 && config.overlap_ratio < 0.5) {
        return Err(ConfigError::invalid(
            "chunking",
            format!("overlap_ratio must be in (0, 0.5), got {}", config.overlap_ratio),
        ));
    }

    if config.max_mention_chars.saturating_mul(2) >= config.chunk_tokens {
        return Err(ConfigError::invalid(
            "chunking",
            format!(
                "max_mention_chars ({}) must be less than half of chunk_tokens ({})",
                config.max_mention_chars, config.chunk_tokens
            ),
        ));
    }

    Ok(())
}

/// Validate merge configuration.
pub fn validate_merging(config: &MergeConfig) -> Result<(), ConfigError> {
    if !(config.overlap_threshold >= 0.0 && config.overlap_threshold < 1.0) {
        return Err(ConfigError::invalid(
            "merging",
            format!(
                "overlap_threshold must be in [0, 1), got {}",
                config.overlap_threshold
            ),
        ));
    }
    Ok(())
}

/// Validate analysis configuration.
pub fn validate_analysis(config: &AnalysisConfig) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&config.min_score) {
        return Err(ConfigError::invalid(
            "analysis",
            format!("min_score must be in [0, 1], got {}", config.min_score),
        ));
    }

    if config.max_concurrent_chunks == 0 {
        return Err(ConfigError::invalid(
            "analysis",
            "max_concurrent_chunks must be greater than zero",
        ));
    }

    Ok(())
}

/// Validate batch configuration.
pub fn validate_batch(config: &BatchConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_documents == 0 {
        return Err(ConfigError::invalid(
            "batch",
            "max_concurrent_documents must be greater than zero",
        ));
    }

    if config.document_timeout.is_some_and(|t| t.is_zero()) {
        return Err(ConfigError::invalid(
            "batch",
            "document_timeout must be greater than zero when set",
        ));
    }

    Ok(())
}
