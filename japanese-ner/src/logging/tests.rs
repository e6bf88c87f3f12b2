use crate::config::{LogFormat, LogLevel, LoggingConfig};
use crate::logging::{ConsoleFormatter, build_subscriber, level_to_log_level, parse_log_level};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_level_conversion() {
    assert_eq!(parse_log_level("trace").unwrap(), LogLevel::Trace);
    assert_eq!(parse_log_level("DEBUG").unwrap(), LogLevel::Debug);
    assert_eq!(parse_log_level("info").unwrap(), LogLevel::Info);
    assert_eq!(parse_log_level("warning").unwrap(), LogLevel::Warn);
    assert_eq!(parse_log_level("error").unwrap(), LogLevel::Error);
    assert!(parse_log_level("invalid").is_err());

    assert_eq!(level_to_log_level(tracing::Level::TRACE), LogLevel::Trace);
    assert_eq!(level_to_log_level(tracing::Level::DEBUG), LogLevel::Debug);
    assert_eq!(level_to_log_level(tracing::Level::INFO), LogLevel::Info);
    assert_eq!(level_to_log_level(tracing::Level::WARN), LogLevel::Warn);
    assert_eq!(level_to_log_level(tracing::Level::ERROR), LogLevel::Error);
}

#[test]
fn test_console_formatter_output() {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .event_format(ConsoleFormatter::new(false))
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let span = tracing::info_span!("document");
        let _entered = span.enter();
        tracing::info!(entities = 2, "Analyzed 東京大学");
    });

    let output = buffer.contents();
    let line = output.lines().next().unwrap();
    let (time, rest) = line.split_once(' ').unwrap();
    assert_eq!(time.len(), 8);
    assert_eq!(time.matches(':').count(), 2);
    assert!(rest.starts_with("INFO  document: Analyzed 東京大学"));
    assert!(rest.contains("entities=2"));
    assert!(!rest.contains('\x1b'));
}

#[test]
fn test_file_logging_writes_daily_file() {
    let dir = tempdir().unwrap();
    let config = LoggingConfig {
        level: LogLevel::Debug,
        format: LogFormat::Default,
        directory: Some(dir.path().join("logs")),
        file_prefix: "ner_analysis".to_string(),
        console: false,
    };

    let (subscriber, guard) = build_subscriber(&config).unwrap();
    assert!(guard.is_some());
    tracing::subscriber::with_default(subscriber, || {
        tracing::debug!("written to the log file");
    });
    drop(guard);

    let entries: Vec<_> = std::fs::read_dir(dir.path().join("logs"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("ner_analysis"));
    let contents = std::fs::read_to_string(&entries[0]).unwrap();
    assert!(contents.contains("written to the log file"));
}

#[test]
fn test_console_only_has_no_file_guard() {
    let config = LoggingConfig::default();
    let (_subscriber, guard) = build_subscriber(&config).unwrap();
    assert!(guard.is_none());
}
