use colored::*;
use japanese_ner::batch::BatchOutcome;
use japanese_ner::ner::{Analysis, Entity, EntityLabel};
use japanese_ner::report::ReportPaths;
use serde::Serialize;
use serde_json::json;

use crate::args::OutputFormat;

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn person() -> Color {
        Color::TrueColor {
            r: 236,
            g: 72,
            b: 153,
        }
    }

    pub fn organization() -> Color {
        Color::TrueColor {
            r: 168,
            g: 85,
            b: 247,
        }
    }

    pub fn location() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn entity() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }
}

pub fn format_success(msg: &str) -> String {
    format!(
        "{} {}",
        "✓".color(CliColors::success()).bold(),
        msg.color(CliColors::success())
    )
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

pub fn format_label(label: EntityLabel) -> ColoredString {
    let tag = label.tag();
    match label {
        EntityLabel::Person => tag.color(CliColors::person()).bold(),
        EntityLabel::Organization
        | EntityLabel::PoliticalOrganization
        | EntityLabel::OtherOrganization => tag.color(CliColors::organization()),
        EntityLabel::Location => tag.color(CliColors::location()),
        EntityLabel::Institution | EntityLabel::Product | EntityLabel::Event => {
            tag.color(CliColors::entity())
        }
    }
}

/// Print an error; JSON mode writes a structured object to stdout
pub fn output_error(error: &japanese_ner::NerError, format: OutputFormat) {
    if format.is_json() {
        let error_response = json!({
            "error": true,
            "code": error_code(error),
            "message": error.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("{}", format_error(&error.to_string()));
    }
}

fn error_code(error: &japanese_ner::NerError) -> &'static str {
    use japanese_ner::NerError;
    match error {
        NerError::InvalidSpan { .. } => "INVALID_SPAN",
        NerError::UnsupportedLabel(_) => "UNSUPPORTED_LABEL",
        NerError::Inference(_) => "INFERENCE_ERROR",
        NerError::InferenceUnavailable { .. } => "INFERENCE_UNAVAILABLE",
        NerError::Configuration(_) => "CONFIGURATION_ERROR",
        NerError::Logging(_) => "LOGGING_ERROR",
        NerError::Document(_) => "DOCUMENT_ERROR",
        NerError::Report(_) => "REPORT_ERROR",
        NerError::Timeout(_) => "TIMEOUT",
        NerError::Io(_) => "IO_ERROR",
        NerError::Other(_) => "ERROR",
    }
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn print_entity_table(entities: &[Entity]) {
    if entities.is_empty() {
        println!("{}", "No entities found.".color(CliColors::muted()));
        return;
    }

    println!(
        "{}",
        format!("━━━ Entities ({}) ━━━", entities.len())
            .color(CliColors::accent())
            .bold()
    );
    for entity in entities {
        println!(
            "  {:<6} {}  {} {}",
            format_label(entity.label),
            entity.word.bold(),
            format!("[{}..{})", entity.start, entity.end).color(CliColors::muted()),
            format!("{:.3}", entity.score).color(CliColors::muted())
        );
    }
}

pub fn print_analysis_details(analysis: &Analysis) {
    println!(
        "{}: {:?}  {}: {}",
        "Plan".color(CliColors::muted()),
        analysis.plan,
        "Chunks".color(CliColors::muted()),
        analysis.chunk_count
    );
    if analysis.merged > 0 || analysis.filtered > 0 {
        println!(
            "{}: {}  {}: {}",
            "Merged".color(CliColors::muted()),
            analysis.merged,
            "Filtered".color(CliColors::muted()),
            analysis.filtered
        );
    }
    for failure in &analysis.failed_chunks {
        println!(
            "{}",
            format_warning(&format!(
                "Chunk {} (offset {}) skipped: {}",
                failure.index, failure.offset, failure.error
            ))
        );
    }
}

#[derive(Debug, Serialize)]
pub struct LabelInfo {
    pub name: &'static str,
    pub tag: &'static str,
    pub description: &'static str,
    pub english: &'static str,
}

pub fn label_infos() -> Vec<LabelInfo> {
    EntityLabel::ALL
        .iter()
        .map(|label| LabelInfo {
            name: label.as_str(),
            tag: label.tag(),
            description: label.description(),
            english: label.english_description(),
        })
        .collect()
}

pub fn print_label_list() {
    println!("{}", "━━━ Entity Labels ━━━".color(CliColors::accent()).bold());
    for label in EntityLabel::ALL {
        println!(
            "  {:<6} {:<24} {} {}",
            format_label(label),
            label.as_str(),
            label.description(),
            format!("({})", label.english_description()).color(CliColors::muted())
        );
    }
}

pub fn print_batch_summary(outcome: &BatchOutcome, paths: &ReportPaths) {
    println!(
        "{}",
        format_success(&format!(
            "Analyzed {} document(s), {} entities",
            outcome.results.len(),
            outcome.total_entities()
        ))
    );

    if outcome.has_failures() {
        println!(
            "{}",
            format_warning(&format!("{} document(s) failed:", outcome.failures.len()))
        );
        for failure in &outcome.failures {
            println!(
                "  {}: {}",
                failure.filename.color(CliColors::error()),
                failure.error.color(CliColors::error())
            );
        }
    }

    println!("\n{}", "Reports:".bold());
    for path in [&paths.csv, &paths.markdown, &paths.json] {
        println!("  {}", path.display().to_string().color(CliColors::accent()));
    }
}
