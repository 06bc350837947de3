//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use reviewline_types::FoldPolicy;

/// Top-level arguments.
#[derive(Debug, Parser)]
#[command(name = "reviewline")]
#[command(version)]
#[command(about = "Reconstruct peer-review timelines from lifecycle events")]
pub struct Cli {
    /// Path to a YAML config file (default: ./reviewline.yaml when present)
    #[arg(long, global = true, env = "REVIEWLINE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Aggregate a review document into revisions and reviewers
    Aggregate(AggregateArgs),
    /// Serve the aggregation HTTP API
    Serve(ServeArgs),
}

/// Arguments for `reviewline aggregate`.
#[derive(Debug, Clone, Args)]
pub struct AggregateArgs {
    /// Input document, or `-` for stdin
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Fold policy (input-order or latest-timestamp); overrides config
    #[arg(long)]
    pub policy: Option<FoldPolicy>,

    /// Check ordering and uniqueness invariants of the result
    #[arg(long)]
    pub verify: bool,
}

/// Arguments for `reviewline serve`.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to bind; overrides config
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on; overrides config
    #[arg(long, short)]
    pub port: Option<u16>,
}

/// How `aggregate` prints its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    #[default]
    Json,
    /// Indented JSON
    Pretty,
    /// Human-readable revision/reviewer tree
    Summary,
}
