//! Statistics and report files for a batch run.
//!
//! A full report is three files in one directory: `ner_results.csv` (one row
//! per entity), `analysis_report.md` (statistics in Japanese) and
//! `ner_results.json` (the whole batch outcome).

mod csv_report;
mod markdown;
mod statistics;

pub use csv_report::{save_csv_report, write_csv};
pub use markdown::{render_markdown_report, save_markdown_report};
pub use statistics::{DocumentStats, Statistics, TOP_WORDS, calculate_statistics};

use std::path::{Path, PathBuf};
use tracing::info;

use crate::batch::BatchOutcome;
use crate::documents::ensure_output_directory;
use crate::{NerError, Result};

pub const CSV_REPORT_FILE: &str = "ner_results.csv";
pub const MARKDOWN_REPORT_FILE: &str = "analysis_report.md";
pub const JSON_REPORT_FILE: &str = "ner_results.json";

/// Paths of the files written by [`generate_full_report`]
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub csv: PathBuf,
    pub markdown: PathBuf,
    pub json: PathBuf,
}

/// Save the whole outcome as pretty-printed JSON
pub fn save_json_report(outcome: &BatchOutcome, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome)
        .map_err(|e| NerError::Report(format!("Failed to serialize results: {}", e)))?;
    std::fs::write(path.as_ref(), json)?;
    Ok(())
}

/// Write the CSV, Markdown and JSON reports into `output_dir`
pub fn generate_full_report(outcome: &BatchOutcome, output_dir: impl AsRef<Path>) -> Result<ReportPaths> {
    let output_dir = ensure_output_directory(output_dir)?;
    let paths = ReportPaths {
        csv: output_dir.join(CSV_REPORT_FILE),
        markdown: output_dir.join(MARKDOWN_REPORT_FILE),
        json: output_dir.join(JSON_REPORT_FILE),
    };

    info!("Generating statistics...");
    let stats = calculate_statistics(&outcome.results);

    info!("Saving CSV report to {}", paths.csv.display());
    save_csv_report(&outcome.results, &paths.csv)?;

    info!("Saving markdown report to {}", paths.markdown.display());
    save_markdown_report(&stats, &outcome.failures, &outcome.model, &paths.markdown)?;

    info!("Saving JSON results to {}", paths.json.display());
    save_json_report(outcome, &paths.json)?;

    info!("Analysis complete! Results saved to: {}", output_dir.display());
    Ok(paths)
}
