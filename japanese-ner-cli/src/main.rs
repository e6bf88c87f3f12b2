use clap::{CommandFactory, Parser};
use japanese_ner::config::LogLevel;
use japanese_ner::logging;
use japanese_ner_cli::args::{Cli, OutputFormat};
use japanese_ner_cli::commands::Commands;
use japanese_ner_cli::context::{ConfigOverrides, NerCliContext, load_config};
use japanese_ner_cli::handlers::*;
use japanese_ner_cli::output::output_error;
use std::process::ExitCode;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = cli.output_format();

    match run(cli, format).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output_error(&e, format);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, format: OutputFormat) -> japanese_ner::Result<()> {
    // Machine mode implies quiet so stdout stays clean JSON
    let log_level = if cli.is_quiet() {
        LogLevel::Error
    } else if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };

    let mut overrides = ConfigOverrides {
        model: cli.model.clone(),
        endpoint: cli.endpoint.clone(),
        log_level: Some(log_level),
        ..ConfigOverrides::default()
    };

    match cli.command {
        Commands::Version => {
            println!("Japanese NER CLI v{}", japanese_ner::VERSION);
        }

        Commands::Labels => handle_labels_command(format),

        Commands::Completions(args) => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(
                clap_complete::Shell::from(args.shell),
                &mut command,
                name,
                &mut std::io::stdout(),
            );
        }

        Commands::Config => {
            let config = load_config(cli.config.as_deref(), &overrides)?;
            handle_config_command(&config);
        }

        Commands::Analyze(args) => {
            overrides.min_score = args.min_score;
            overrides.max_concurrent_documents = args.concurrency;
            let config = load_config(cli.config.as_deref(), &overrides)?;
            let _guard = logging::init(&config.logging)?;
            debug!("Effective model: {} at {}", config.model.name, config.model.endpoint);

            let ctx = NerCliContext::new(config)?;
            handle_analyze_command(args, &ctx, format).await?;
        }

        Commands::Text(args) => {
            overrides.min_score = args.min_score;
            let config = load_config(cli.config.as_deref(), &overrides)?;
            let _guard = logging::init(&config.logging)?;

            let ctx = NerCliContext::new(config)?;
            handle_text_command(args, &ctx, format).await?;
        }
    }

    Ok(())
}
