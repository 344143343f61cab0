//! Inventory CLI - Main entry point

use clap::Parser;
use inventory_cli::{Cli, Commands, Config, ConfigCommand};
use inventory_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Warn };
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("inventory")
        .build();

    // Environment variables take precedence over the defaults above
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging
    let _guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = execute_command(cli) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn execute_command(cli: Cli) -> inventory_cli::Result<()> {
    let config = Config::from_env()?.with_overrides(cli.db, cli.auth, cli.verbose);

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => inventory_cli::commands::session::run(&config),
        Commands::Init(args) => inventory_cli::commands::init::run(&config, args),
        Commands::Config { command } => match command {
            ConfigCommand::Show { json } => inventory_cli::commands::config::show(&config, json),
        },
    }
}
