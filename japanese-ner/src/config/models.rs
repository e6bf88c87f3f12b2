//! Configuration model definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NerConfig {
    /// Model endpoint and request settings
    pub model: ModelConfig,

    /// How long documents are split
    pub chunking: ChunkingConfig,

    /// How overlap duplicates are collapsed
    pub merging: MergeConfig,

    /// Per-document analysis settings
    pub analysis: AnalysisConfig,

    /// Batch settings
    pub batch: BatchConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Token-classification model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier, appended to the endpoint
    pub name: String,

    /// Inference endpoint base URL
    pub endpoint: String,

    /// API token; takes precedence over `api_token_env`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Environment variable holding the API token
    pub api_token_env: String,

    /// Aggregation strategy requested from the endpoint
    pub aggregation_strategy: String,

    /// Request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Retries after a failed request
    pub max_retries: u32,

    /// Delay before the first retry
    #[serde(with = "humantime_serde")]
    pub initial_backoff: Duration,

    /// Tokens per character used by the character-count estimator
    pub tokens_per_char: f64,

    /// Optional `tokenizer.json` for exact token counts
    pub tokenizer_path: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "tsmatz/xlm-roberta-ner-japanese".to_string(),
            endpoint: "https://api-inference.huggingface.co/models".to_string(),
            api_token: None,
            api_token_env: "HF_API_TOKEN".to_string(),
            aggregation_strategy: "simple".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            tokens_per_char: 1.0,
            tokenizer_path: None,
        }
    }
}

/// Chunking configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Hard input limit of the model, special tokens included
    pub max_input_tokens: usize,

    /// Tokens reserved for special tokens such as `<s>` and `</s>`
    pub special_tokens_reserve: usize,

    /// Target window length in characters
    pub chunk_tokens: usize,

    /// Fraction of the window shared with the next window
    pub overlap_ratio: f64,

    /// Longest mention that must survive a window boundary uncut
    pub max_mention_chars: usize,

    /// End windows after a sentence terminator when one is close to the end
    pub prefer_sentence_boundaries: bool,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_input_tokens: 512,
            special_tokens_reserve: 2,
            chunk_tokens: 400,
            overlap_ratio: 0.125,
            max_mention_chars: 32,
            prefer_sentence_boundaries: true,
        }
    }
}

impl ChunkingConfig {
    /// Token budget left for text in one model call
    pub fn effective_limit(&self) -> usize {
        self.max_input_tokens
            .saturating_sub(self.special_tokens_reserve)
    }
}

/// Entity merge configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MergeConfig {
    /// Minimum shared fraction of the shorter span for two entities to merge
    pub overlap_threshold: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            overlap_threshold: 0.5,
        }
    }
}

/// Per-document analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Entities scored below this are dropped (0.0 keeps everything)
    pub min_score: f64,

    /// Chunk requests in flight for one document
    pub max_concurrent_chunks: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_score: 0.0,
            max_concurrent_chunks: 4,
        }
    }
}

/// Batch configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    /// Documents analyzed at the same time
    pub max_concurrent_documents: usize,

    /// Deadline for one document (none by default)
    #[serde(with = "humantime_serde")]
    pub document_timeout: Option<Duration>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_documents: 1,
            document_timeout: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// Directory for daily rolling log files (if any)
    pub directory: Option<PathBuf>,

    /// Log file name prefix
    pub file_prefix: String,

    /// Whether to log to stderr
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Default,
            directory: None,
            file_prefix: "ner_analysis".to_string(),
            console: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,

    /// Debug level
    Debug,

    /// Info level
    Info,

    /// Warn level
    Warn,

    /// Error level
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Time, level and message on one line
    Default,

    /// JSON format
    Json,

    /// Compact format
    Compact,

    /// Pretty format
    Pretty,
}
