//! Error types for the CLI.

use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O error
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid page URL
    #[error("invalid URL: {0}")]
    Url(#[from] browser_env::UrlError),

    /// Scenario or configuration file did not parse
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// Interactive shell error
    #[error("shell error: {0}")]
    Shell(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
