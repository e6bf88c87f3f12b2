use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use japanese_ner::documents::read_documents;
use japanese_ner::report::generate_full_report;
use japanese_ner::{NerError, Result};
use serde_json::json;
use tracing::info;

use crate::args::{AnalyzeArgs, OutputFormat};
use crate::context::NerCliContext;
use crate::output::{format_info, print_batch_summary, print_json};

pub async fn handle_analyze_command(
    args: AnalyzeArgs,
    ctx: &NerCliContext,
    format: OutputFormat,
) -> Result<()> {
    let documents = read_documents(&args.input)?;
    if documents.is_empty() {
        return Err(NerError::Document(format!(
            "No documents found in {}",
            args.input.display()
        )));
    }

    if !format.is_json() {
        println!(
            "{}",
            format_info(&format!(
                "Analyzing {} document(s) with {}",
                documents.len(),
                ctx.analyzer.model_name()
            ))
        );
    }

    // Progress bar only for interactive, human-readable output
    let pb = if std::io::stdout().is_terminal() && !format.is_json() && documents.len() > 1 {
        let pb = ProgressBar::new(documents.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let outcome = ctx
        .batch_analyzer()
        .analyze_documents_with_progress(documents, |progress| {
            if let Some(pb) = &pb {
                pb.set_message(progress.filename);
                pb.set_position(progress.completed as u64);
            }
        })
        .await;

    if let Some(pb) = &pb {
        pb.finish_with_message(format!("Completed {} documents", outcome.document_count()));
    }

    if outcome.results.is_empty() {
        let reason = outcome
            .failures
            .last()
            .map(|f| f.error.clone())
            .unwrap_or_default();
        return Err(NerError::Other(format!(
            "All {} document(s) failed. Last error: {}",
            outcome.failures.len(),
            reason
        )));
    }

    let paths = generate_full_report(&outcome, &args.output_dir)?;
    info!("Reports written to {}", args.output_dir.display());

    if format.is_json() {
        print_json(&json!({
            "run_id": outcome.run_id,
            "model": outcome.model,
            "documents": outcome.document_count(),
            "entities": outcome.total_entities(),
            "failures": outcome.failures,
            "reports": {
                "csv": paths.csv,
                "markdown": paths.markdown,
                "json": paths.json,
            }
        }));
    } else {
        print_batch_summary(&outcome, &paths);
    }

    Ok(())
}
