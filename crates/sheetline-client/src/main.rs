//! sheetline CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use sheetline_client::cli::{Cli, Command, ConfigAction};
use sheetline_client::commands;
use sheetline_client::config::ClientConfig;
use sheetline_client::error::ClientResult;
use sheetline_core::tracing::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    // Run the command
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    // Load configuration
    let (config, config_path) = match cli.config {
        Some(ref path) => (ClientConfig::load_from(path)?, path.clone()),
        None => (ClientConfig::load()?, ClientConfig::default_path()),
    };
    let pretty = cli.pretty(config.output.pretty);

    match cli.command {
        Command::Build { ref url } => commands::build::run(url, &config, pretty).await,
        Command::Convert { ref input } => commands::convert::run(input, pretty).await,
        Command::Locate { ref url } => commands::locate::run(url, &config),
        Command::Config { ref action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Path => commands::config::path(&config_path),
        },
    }
}
