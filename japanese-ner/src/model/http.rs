//! HTTP token-classification backend.
//!
//! Talks to a Hugging Face inference-style endpoint:
//!
//! ```text
//! POST {endpoint}/{model}
//! {"inputs": "...", "parameters": {"aggregation_strategy": "simple"}}
//!
//! [{"entity_group": "PER", "score": 0.99, "word": "田中", "start": 0, "end": 2}, ...]
//! ```
//!
//! Requests are retried with exponential backoff on network errors, `429` and
//! `5xx` responses (including the "model is loading" `503`).

use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

use super::error::{ModelError, Result};
use super::traits::{RawPrediction, TokenClassifier};
use crate::config::ModelConfig;

/// Retry policy for inference requests
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Initial backoff duration
    pub initial_backoff: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f32,
    /// Maximum backoff duration
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            backoff_multiplier: 2.0,
            max_backoff: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Calculate backoff duration for a given attempt number
    fn backoff_duration(&self, attempt: u32) -> Duration {
        let backoff_ms = (self.initial_backoff.as_millis() as f32
            * self.backoff_multiplier.powi(attempt as i32)) as u64;
        Duration::from_millis(backoff_ms).min(self.max_backoff)
    }
}

/// A failed attempt and whether it is worth repeating.
struct AttemptError {
    error: ModelError,
    retryable: bool,
}

impl AttemptError {
    fn retryable(error: ModelError) -> Self {
        Self {
            error,
            retryable: true,
        }
    }

    fn fatal(error: ModelError) -> Self {
        Self {
            error,
            retryable: false,
        }
    }
}

/// Token classifier backed by an HTTP inference endpoint
#[derive(Debug, Clone)]
pub struct HttpTokenClassifier {
    client: reqwest::Client,
    url: String,
    model_name: String,
    api_token: Option<String>,
    aggregation_strategy: String,
    retry_policy: RetryPolicy,
}

impl HttpTokenClassifier {
    /// Create a classifier for `model_name` served under `endpoint`
    pub fn new(endpoint: &str, model_name: &str, timeout: Duration) -> Result<Self> {
        if model_name.trim().is_empty() {
            return Err(ModelError::configuration("Model name cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: format!("{}/{}", endpoint.trim_end_matches('/'), model_name),
            model_name: model_name.to_string(),
            api_token: None,
            aggregation_strategy: "simple".to_string(),
            retry_policy: RetryPolicy::default(),
        })
    }

    /// Create a classifier from the model section of the configuration.
    ///
    /// The API token comes from `api_token`, or else from the environment
    /// variable named by `api_token_env`.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let token = config
            .api_token
            .clone()
            .or_else(|| std::env::var(&config.api_token_env).ok())
            .filter(|t| !t.is_empty());

        let mut classifier = Self::new(&config.endpoint, &config.name, config.timeout)?
            .with_aggregation_strategy(config.aggregation_strategy.clone())
            .with_retry_policy(RetryPolicy {
                max_retries: config.max_retries,
                initial_backoff: config.initial_backoff,
                ..RetryPolicy::default()
            });
        classifier.api_token = token;
        Ok(classifier)
    }

    /// Set the bearer token
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the aggregation strategy sent to the endpoint
    pub fn with_aggregation_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.aggregation_strategy = strategy.into();
        self
    }

    /// Set the retry policy
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// The full request URL
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send_request(&self, text: &str) -> std::result::Result<Vec<RawPrediction>, AttemptError> {
        let payload = json!({
            "inputs": text,
            "parameters": { "aggregation_strategy": self.aggregation_strategy },
        });

        let mut request = self
            .client
            .post(&self.url)
            .json(&payload)
            .header("User-Agent", concat!("japanese-ner/", env!("CARGO_PKG_VERSION")));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            AttemptError::retryable(ModelError::unavailable(format!("Request failed: {}", e)))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AttemptError::retryable(ModelError::unavailable(format!(
                "Failed to read response body: {}",
                e
            )))
        })?;

        if !status.is_success() {
            let error = ModelError::unavailable(format!("HTTP {}: {}", status, truncate(&body, 200)));
            return Err(if status.is_server_error() || status.as_u16() == 429 {
                AttemptError::retryable(error)
            } else {
                AttemptError::fatal(error)
            });
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| AttemptError::fatal(ModelError::malformed(format!("Invalid JSON: {}", e))))?;

        parse_predictions(&value).map_err(|error| {
            let retryable = matches!(error, ModelError::Unavailable(_));
            AttemptError { error, retryable }
        })
    }
}

#[async_trait]
impl TokenClassifier for HttpTokenClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<RawPrediction>> {
        let mut last_error: Option<ModelError> = None;

        for attempt in 0..=self.retry_policy.max_retries {
            match self.send_request(text).await {
                Ok(predictions) => {
                    debug!(
                        model = %self.model_name,
                        predictions = predictions.len(),
                        attempts = attempt + 1,
                        "Inference request succeeded"
                    );
                    return Ok(predictions);
                }
                Err(AttemptError { error, retryable }) => {
                    if !retryable || attempt == self.retry_policy.max_retries {
                        return Err(error);
                    }
                    let backoff = self.retry_policy.backoff_duration(attempt);
                    warn!(
                        "Inference request failed (model: {}, attempt: {}/{}), retrying in {:?}: {}",
                        self.model_name,
                        attempt + 1,
                        self.retry_policy.max_retries + 1,
                        backoff,
                        error
                    );
                    last_error = Some(error);
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ModelError::unavailable("Unknown error")))
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

/// Parse an inference response into raw predictions.
///
/// Accepts a flat prediction list or a single-element batch (`[[...]]`). An
/// object carrying an `error` key is reported as the model being unavailable.
pub fn parse_predictions(value: &Value) -> Result<Vec<RawPrediction>> {
    if let Some(message) = value.get("error") {
        let message = message.as_str().map(str::to_string).unwrap_or_else(|| message.to_string());
        return Err(ModelError::unavailable(message));
    }

    let items = match value.as_array() {
        Some(items) => items,
        None => return Err(ModelError::malformed("Expected a JSON array of predictions")),
    };

    let items = match items.as_slice() {
        [Value::Array(inner)] => inner,
        _ => items,
    };

    items.iter().map(parse_prediction).collect()
}

fn parse_prediction(item: &Value) -> Result<RawPrediction> {
    let label = item
        .get("entity_group")
        .or_else(|| item.get("entity"))
        .and_then(Value::as_str)
        .ok_or_else(|| ModelError::malformed(format!("Prediction without a label: {}", item)))?;
    let score = item
        .get("score")
        .and_then(Value::as_f64)
        .ok_or_else(|| ModelError::malformed(format!("Prediction without a score: {}", item)))?;
    let start = item
        .get("start")
        .and_then(Value::as_u64)
        .ok_or_else(|| ModelError::malformed(format!("Prediction without a start offset: {}", item)))?;
    let end = item
        .get("end")
        .and_then(Value::as_u64)
        .ok_or_else(|| ModelError::malformed(format!("Prediction without an end offset: {}", item)))?;

    Ok(RawPrediction::new(label, score, start as usize, end as usize))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte, _)) => format!("{}...", &text[..byte]),
        None => text.to_string(),
    }
}
