//! Error types for oracle clients and consumer configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by oracle clients.
///
/// Only [`BinaryNotFound`](OracleError::BinaryNotFound) is fatal, and only
/// at setup time. The runtime variants are per-line failures: the pipeline
/// logs `Unavailable` and treats `MalformedResponse` as an unresolved
/// vector; neither aborts annotation of sibling lines.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Oracle executable path did not resolve at construction time.
    #[error("oracle binary not found: {0}")]
    BinaryNotFound(PathBuf),

    /// Oracle process could not be reached: spawn failure, timeout, crash,
    /// or non-zero exit. The process is restarted on the next call.
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    /// Oracle responded, but the payload failed JSON parsing or shape
    /// validation. Treated as an unresolved vector by callers (fail closed).
    #[error("malformed oracle response: {0}")]
    MalformedResponse(String),

    /// I/O failure talking to the process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading or applying consumer configuration.
///
/// All of these are structural and surface immediately at initialization.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file failed YAML parsing.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A configured oracle path does not exist.
    #[error("oracle path for '{name}' does not resolve: {path}")]
    MissingOraclePath { name: String, path: PathBuf },

    /// A configured base URL failed parsing.
    #[error("invalid base URL for '{name}': {source}")]
    InvalidBaseUrl {
        name: String,
        #[source]
        source: url::ParseError,
    },

    /// Watcher parameters are out of range.
    #[error("invalid watch configuration: {0}")]
    InvalidWatch(String),
}
