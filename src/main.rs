// study-inspector - Orthanc study inspection tool
// Copyright (c) 2025 Study Inspector Contributors
// Licensed under the MIT License

use clap::Parser;
use std::path::Path;
use std::process;
use study_inspector::cli::{interrupted, Cli, Commands};
use study_inspector::config::{load_config, LoggingConfig};
use study_inspector::logging::init_logging;

#[tokio::main]
async fn main() {
    // Optional: a missing .env file is ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging and the default level come from the config when it loads;
    // commands report configuration errors themselves.
    let (config_level, logging_config) = if Path::new(&cli.config).exists() {
        match load_config(&cli.config) {
            Ok(c) => (Some(c.application.log_level), c.logging),
            Err(_) => (None, LoggingConfig::default()),
        }
    } else {
        (None, LoggingConfig::default())
    };
    let log_level = cli
        .log_level
        .clone()
        .or(config_level)
        .unwrap_or_else(|| "info".to_string());

    let _guard = match init_logging(&log_level, &logging_config) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "study-inspector - Orthanc study inspection tool"
    );

    if cli.command.requires_config() && !Path::new(&cli.config).exists() {
        eprintln!("❌ Configuration file not found: {}", cli.config);
        eprintln!("   Run 'study-inspector init' to create one");
        process::exit(2);
    }

    let exit_code = tokio::select! {
        result = execute_command(&cli) => match result {
            Ok(code) => code,
            Err(e) => {
                tracing::error!(error = %e, "Command execution failed");
                eprintln!("Error: {e}");
                5
            }
        },
        code = interrupted(tokio::signal::ctrl_c()) => code,
    };

    drop(_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Inspect(args) => args.execute(&cli.config).await,
        Commands::Modify(args) => args.execute(&cli.config).await,
        Commands::Grade(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Status(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
