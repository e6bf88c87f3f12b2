//! Command argument structures
//!
//! Global flags live on [`Cli`]; each subcommand has its own args struct.

use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

use crate::commands::Commands;

#[derive(Parser)]
#[command(name = "japanese-ner")]
#[command(about = "Named entity extraction for Japanese documents", long_about = None)]
#[command(version = japanese_ner::VERSION)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Model name, overriding the configuration
    #[arg(long, short, global = true)]
    pub model: Option<String>,

    /// Inference endpoint base URL, overriding the configuration
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub output: OutputFormat,

    /// Machine-readable mode: JSON output and errors-only logging
    #[arg(long, global = true)]
    pub machine: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective output format: `--machine` wins, then `JNER_OUTPUT`, then `--output`
    pub fn output_format(&self) -> OutputFormat {
        if self.machine {
            return OutputFormat::Json;
        }
        std::env::var("JNER_OUTPUT")
            .ok()
            .and_then(|value| OutputFormat::from_str(&value, true).ok())
            .unwrap_or(self.output)
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
            || self.machine
            || std::env::var("JNER_QUIET")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// A .txt file, a .json file, or a directory of .txt files
    pub input: PathBuf,

    /// Directory for the CSV, Markdown and JSON reports
    #[arg(long, short, default_value = "output")]
    pub output_dir: PathBuf,

    /// Documents analyzed at the same time
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Drop entities scoring below this value
    #[arg(long)]
    pub min_score: Option<f64>,
}

#[derive(Args)]
pub struct TextArgs {
    /// Text to analyze
    pub text: String,

    /// Drop entities scoring below this value
    #[arg(long)]
    pub min_score: Option<f64>,

    /// Also print the analysis plan and chunk counts
    #[arg(long)]
    pub details: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[clap(name = "powershell")]
    Power,
    Elvish,
}

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::Power => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
