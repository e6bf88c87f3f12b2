//! Integration tests for the Japanese NER CLI
//!
//! These exercise argument parsing, configuration overrides and the
//! analyze/report path with an in-process classifier instead of a live
//! inference endpoint.

use async_trait::async_trait;
use clap::{CommandFactory, Parser};
use japanese_ner::config::{LogLevel, NerConfig};
use japanese_ner::documents::read_documents;
use japanese_ner::model::{RawPrediction, TokenClassifier};
use japanese_ner::ner::EntityLabel;
use japanese_ner::report::generate_full_report;
use japanese_ner_cli::args::{Cli, OutputFormat};
use japanese_ner_cli::commands::Commands;
use japanese_ner_cli::context::{ConfigOverrides, NerCliContext};
use japanese_ner_cli::output::label_infos;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Finds every occurrence of a few known names
struct DictionaryClassifier {
    words: Vec<(&'static str, &'static str)>,
}

impl DictionaryClassifier {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            words: vec![("田中太郎", "PER"), ("東京", "LOC"), ("大阪", "LOC")],
        })
    }
}

#[async_trait]
impl TokenClassifier for DictionaryClassifier {
    async fn classify(&self, text: &str) -> japanese_ner::model::Result<Vec<RawPrediction>> {
        let chars: Vec<char> = text.chars().collect();
        let mut predictions = Vec::new();
        for (word, tag) in &self.words {
            let needle: Vec<char> = word.chars().collect();
            for start in 0..chars.len().saturating_sub(needle.len() - 1) {
                if chars[start..start + needle.len()] == needle[..] {
                    predictions.push(RawPrediction::new(*tag, 0.9, start, start + needle.len()));
                }
            }
        }
        Ok(predictions)
    }

    fn name(&self) -> &str {
        "dictionary"
    }
}

fn test_context(config: NerConfig) -> NerCliContext {
    NerCliContext::with_classifier(config, DictionaryClassifier::new())
        .expect("Failed to build context")
}

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_analyze_command() {
    let cli = Cli::try_parse_from([
        "japanese-ner",
        "--model",
        "custom/model",
        "analyze",
        "docs",
        "-o",
        "reports",
        "--min-score",
        "0.5",
    ])
    .unwrap();

    assert_eq!(cli.model.as_deref(), Some("custom/model"));
    match cli.command {
        Commands::Analyze(args) => {
            assert_eq!(args.input, PathBuf::from("docs"));
            assert_eq!(args.output_dir, PathBuf::from("reports"));
            assert_eq!(args.min_score, Some(0.5));
        }
        _ => panic!("expected analyze command"),
    }
}

#[test]
fn test_machine_flag_forces_json() {
    let cli = Cli::try_parse_from(["japanese-ner", "--machine", "labels"]).unwrap();
    assert_eq!(cli.output_format(), OutputFormat::Json);
    assert!(cli.is_quiet());
}

#[test]
fn test_unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["japanese-ner", "summarize"]).is_err());
    assert!(Cli::try_parse_from(["japanese-ner", "--output", "xml", "labels"]).is_err());
}

#[test]
fn test_overrides_apply() {
    let overrides = ConfigOverrides {
        model: Some("custom/model".to_string()),
        endpoint: Some("http://localhost:9000".to_string()),
        min_score: Some(0.7),
        max_concurrent_documents: Some(3),
        log_level: Some(LogLevel::Debug),
    };

    let config = overrides.apply(NerConfig::default()).unwrap();
    assert_eq!(config.model.name, "custom/model");
    assert_eq!(config.model.endpoint, "http://localhost:9000");
    assert_eq!(config.analysis.min_score, 0.7);
    assert_eq!(config.batch.max_concurrent_documents, 3);
    assert_eq!(config.logging.level, LogLevel::Debug);
}

#[test]
fn test_invalid_override_is_rejected() {
    let overrides = ConfigOverrides {
        min_score: Some(1.5),
        ..ConfigOverrides::default()
    };
    assert!(overrides.apply(NerConfig::default()).is_err());
}

#[test]
fn test_label_infos_cover_vocabulary() {
    let infos = label_infos();
    assert_eq!(infos.len(), EntityLabel::ALL.len());
    assert!(infos.iter().any(|i| i.tag == "PER" && i.name == "person"));
}

#[tokio::test]
async fn test_text_analysis_with_context() {
    let ctx = test_context(NerConfig::default());
    let text = "田中太郎は東京に住んでいます。";

    let entities = ctx.analyzer.analyze(text).await.unwrap();
    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].word, "田中太郎");
    assert_eq!(entities[0].label, EntityLabel::Person);
    assert_eq!(entities[1].word, "東京");
    assert_eq!((entities[1].start, entities[1].end), (5, 7));
}

#[tokio::test]
async fn test_analyze_directory_writes_reports() {
    let input = TempDir::new().expect("Failed to create temp directory");
    let output = TempDir::new().expect("Failed to create temp directory");
    fs::write(input.path().join("a.txt"), "田中太郎は東京へ行った。").unwrap();
    fs::write(input.path().join("b.txt"), "大阪は晴れです。").unwrap();

    let ctx = test_context(NerConfig::default());
    let documents = read_documents(input.path()).unwrap();
    let outcome = ctx.batch_analyzer().analyze_documents(documents).await;

    assert!(outcome.all_successful());
    assert_eq!(outcome.document_count(), 2);
    assert_eq!(outcome.total_entities(), 3);

    let paths = generate_full_report(&outcome, output.path()).unwrap();
    let csv = fs::read_to_string(&paths.csv).unwrap();
    assert!(csv.contains("田中太郎"));
    assert!(csv.contains("大阪"));
    assert!(paths.markdown.exists());

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths.json).unwrap()).unwrap();
    assert_eq!(json["results"].as_array().map(|r| r.len()), Some(2));
}

#[tokio::test]
async fn test_long_document_through_context() {
    let mut config = NerConfig::default();
    config.chunking.max_input_tokens = 42;
    config.chunking.chunk_tokens = 32;
    config.chunking.max_mention_chars = 8;
    let ctx = test_context(config);

    let text = "今日は田中太郎が東京で講演した。".repeat(6);
    let analysis = ctx.analyzer.analyze_detailed(&text).await.unwrap();

    assert!(analysis.chunk_count > 1);
    let persons = analysis
        .entities
        .iter()
        .filter(|e| e.label == EntityLabel::Person)
        .count();
    assert_eq!(persons, 6);
    for entity in &analysis.entities {
        let word: String = text
            .chars()
            .skip(entity.start)
            .take(entity.end - entity.start)
            .collect();
        assert_eq!(word, entity.word);
    }
}
