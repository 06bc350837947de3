//! Configuration loading and typed config structures for `reviewline`.
//!
//! Configuration lives in an optional `reviewline.yaml`. Every field has a
//! default, so an absent file or a partial file is valid. Environment
//! variables override the file, and command-line flags override both.

use std::path::Path;

use reviewline_types::FoldPolicy;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid value for {name}: {reason}")]
    Env {
        /// The environment variable.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// `logging.level` is not a usable level or filter directive.
    #[error("invalid logging level {level:?}: {reason}")]
    LogLevel {
        /// The configured value.
        level: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReviewlineConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// HTTP API settings for `reviewline serve`.
    #[serde(default)]
    pub server: ServerSection,

    /// Aggregation defaults.
    #[serde(default)]
    pub aggregation: AggregationConfig,
}

impl ReviewlineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `REVIEWLINE_LOG` overrides `logging.level`
    /// - `REVIEWLINE_HOST` overrides `server.host`
    /// - `REVIEWLINE_PORT` overrides `server.port`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load from `path` if given, else from `reviewline.yaml` in the working
    /// directory if it exists, else defaults with environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        match path {
            Some(path) => Self::from_file(path),
            None if default_path.exists() => Self::from_file(default_path),
            None => {
                let mut config = Self::default();
                config.apply_env_overrides(|name| std::env::var(name).ok())?;
                Ok(config)
            }
        }
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(level) = lookup("REVIEWLINE_LOG") {
            self.logging.level = level;
        }
        if let Some(host) = lookup("REVIEWLINE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("REVIEWLINE_PORT") {
            self.server.port = port.trim().parse().map_err(|e| ConfigError::Env {
                name: "REVIEWLINE_PORT",
                reason: format!("{e}"),
            })?;
        }
        Ok(())
    }
}

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "reviewline.yaml";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// The log filter: `RUST_LOG` when set and valid, else `level`.
    pub fn filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_from_default_env().or_else(|_| self.level_filter())
    }

    /// Build a filter from `level` alone.
    ///
    /// A bare word must be a level name; `EnvFilter` would otherwise read a
    /// typo such as `inof` as a target and log nothing.
    pub fn level_filter(&self) -> Result<EnvFilter, ConfigError> {
        let level = self.level.trim();
        let invalid = |reason: String| ConfigError::LogLevel {
            level: self.level.clone(),
            reason,
        };
        if !level.contains(['=', ',', '[']) {
            level
                .parse::<LevelFilter>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        EnvFilter::try_new(level).map_err(|e| invalid(e.to_string()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// HTTP API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Aggregation defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct AggregationConfig {
    /// Fold policy used unless overridden per call.
    #[serde(default)]
    pub policy: FoldPolicy,

    /// Check result invariants after every CLI aggregation.
    #[serde(default)]
    pub verify: bool,
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

const fn default_port() -> u16 {
    8080
}
