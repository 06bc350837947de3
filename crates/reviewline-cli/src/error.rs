//! Error types for the `reviewline` binary.
//!
//! [`CliError`] is the top-level error type that wraps all possible
//! failure modes during startup and command execution.

use std::path::PathBuf;

/// Top-level error for the `reviewline` binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `run` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// The review document was rejected.
    #[error(transparent)]
    Aggregate(#[from] reviewline_aggregator::AggregateError),

    /// Reading the input document failed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The input path (`-` for stdin).
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),

    /// Serializing the result failed.
    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),

    /// `--verify` found broken invariants in the result.
    #[error("result failed verification: {0}")]
    Verification(String),

    /// The API server failed to start or stopped with an error.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: reviewline_api::ServerError,
    },
}
