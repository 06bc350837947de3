//! Command-line entry point for Reviewline.
//!
//! `reviewline aggregate` folds a review document (manuscript metadata plus an
//! unordered `events` array) into revisions and reviewers and prints the
//! result. `reviewline serve` exposes the same aggregation over HTTP.
//!
//! # Configuration precedence
//!
//! ```text
//! defaults < reviewline.yaml < REVIEWLINE_* env vars < command-line flags
//! ```
//!
//! Logs go to stderr so stdout carries only the aggregated document.

mod cli;
mod commands;
mod config;
mod error;
mod render;

use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Command};
use crate::config::{ConfigError, LoggingConfig, ReviewlineConfig};
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("reviewline: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ReviewlineConfig::load(cli.config.as_deref())?;
    init_tracing(&config.logging)?;

    match cli.command {
        Command::Aggregate(args) => commands::aggregate(&args, &config),
        Command::Serve(args) => {
            info!(
                host = args.host.as_deref().unwrap_or(&config.server.host),
                port = args.port.unwrap_or(config.server.port),
                policy = %config.aggregation.policy,
                "reviewline serve starting"
            );
            commands::serve(&args, &config).await
        }
    }
}

/// Structured logging to stderr. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.filter()?)
        .with_writer(std::io::stderr)
        .with_target(true);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
