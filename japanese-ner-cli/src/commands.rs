//! Command enum definitions

use crate::args::*;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze documents and write CSV, Markdown and JSON reports
    #[command(
        alias = "batch",
        long_about = r#"
Analyze one or more documents and write a full report.

INPUT FORMATS:
  • file.txt - one document
  • file.json - an array of texts (one document per item) or a single value
  • directory - every .txt file directly inside it, in file name order

Documents longer than the model's input limit are split into overlapping
chunks; mentions found twice in an overlap are merged into one.

OUTPUT FILES:
  • ner_results.csv - one row per entity
  • analysis_report.md - statistics report
  • ner_results.json - complete results

EXAMPLES:
  japanese-ner analyze news.txt
  japanese-ner analyze articles/ --output-dir reports
  japanese-ner analyze data.json --min-score 0.8 --concurrency 4
"#
    )]
    Analyze(AnalyzeArgs),

    /// Analyze a single piece of text and print its entities
    #[command(alias = "extract")]
    Text(TextArgs),

    /// List the entity labels the model can emit
    Labels,

    /// Print the effective configuration
    Config,

    /// Display version information
    Version,

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}
