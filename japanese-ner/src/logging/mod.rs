//! Structured logging infrastructure.
//!
//! Built on `tracing-subscriber`: one console layer on stderr in the configured
//! format, plus an optional daily rolling log file written through a
//! non-blocking `tracing-appender` worker. `RUST_LOG` overrides the configured
//! level when set.

mod formatters;
#[cfg(test)]
mod tests;

pub use formatters::ConsoleFormatter;

use crate::config::{LogFormat, LogLevel, LoggingConfig};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Error type for logging operations
#[derive(Debug)]
pub enum LogError {
    /// IO error occurred
    IoError(std::io::Error),

    /// Error parsing log level
    InvalidLogLevel(String),

    /// Error in subscriber setup
    SubscriberError(Box<dyn std::error::Error + Send + Sync>),
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::IoError(err)
    }
}

impl std::fmt::Display for LogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogError::IoError(e) => write!(f, "IO error: {}", e),
            LogError::SubscriberError(e) => write!(f, "Subscriber error: {}", e),
            LogError::InvalidLogLevel(s) => write!(f, "Invalid log level: {}", s),
        }
    }
}

impl std::error::Error for LogError {}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Keeps the log file writer alive; logs are flushed when it is dropped.
#[derive(Debug)]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
    installed: bool,
}

impl LoggingGuard {
    /// Whether this call installed the global subscriber
    pub fn installed(&self) -> bool {
        self.installed
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize the logging system with the given configuration.
///
/// Calling this when a global subscriber already exists is not an error: the
/// existing subscriber is kept and the returned guard reports
/// `installed() == false`.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    if tracing::dispatcher::has_been_set() {
        return Ok(LoggingGuard {
            _file_guard: None,
            installed: false,
        });
    }

    let (subscriber, file_guard) = build_subscriber(config)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LogError::SubscriberError(Box::new(e)))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
        installed: true,
    })
}

/// Build the subscriber described by `config` without installing it.
pub fn build_subscriber(
    config: &LoggingConfig,
) -> Result<(impl tracing::Subscriber + Send + Sync + 'static, Option<WorkerGuard>)> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.console {
        layers.push(console_layer(config.format));
    }

    let mut file_guard = None;
    if let Some(directory) = &config.directory {
        std::fs::create_dir_all(directory)?;
        let appender = tracing_appender::rolling::daily(directory, &config.file_prefix);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        file_guard = Some(guard);

        let layer = match config.format {
            LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
            _ => fmt::layer()
                .event_format(ConsoleFormatter::new(false))
                .with_writer(writer)
                .boxed(),
        };
        layers.push(layer);
    }

    let subscriber = tracing_subscriber::registry().with(layers).with(filter);
    Ok((subscriber, file_guard))
}

fn console_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Default => {
            let ansi = std::io::IsTerminal::is_terminal(&std::io::stderr());
            fmt::layer()
                .event_format(ConsoleFormatter::new(ansi))
                .with_writer(std::io::stderr)
                .boxed()
        }
    }
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level
        .parse::<LogLevel>()
        .map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}
