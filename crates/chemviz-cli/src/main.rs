//! ChemViz CLI - Main entry point

use chemviz_cli::commands;
use chemviz_cli::output::OutputFormat;
use chemviz_cli::{Cli, Commands};
use chemviz_common::logging::{init_logging, ConsoleStream, LogConfig, LogLevel, LogOutput};
use clap::Parser;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Verbose mode logs debug; otherwise only warnings and errors. Logs go to
    // stderr so stdout carries only command output.
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .console_stream(ConsoleStream::Stderr)
        .log_file_prefix("chemviz-cli")
        .build();

    // Merge with environment variables (they take precedence)
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // Initialize logging (ignore errors as CLI should work without logging)
    let _log_guard = init_logging(&log_config).ok();

    // Execute command
    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> chemviz_cli::Result<()> {
    let format = OutputFormat::from_flag(cli.json);
    let service = commands::open_service(&cli.data_dir).await?;

    match &cli.command {
        Commands::Upload { file, name } => {
            commands::upload::run(&service, file, name.clone(), format).await?;
        },
        Commands::Latest => {
            commands::latest::run(&service, format).await?;
        },
        Commands::History { limit } => {
            commands::history::run(&service, *limit, format).await?;
        },
        Commands::Show { id } => {
            commands::show::run(&service, id, format).await?;
        },
        Commands::Report { id, output } => {
            commands::report::run(&service, id.as_deref(), output.as_deref(), format).await?;
        },
    }

    Ok(())
}
