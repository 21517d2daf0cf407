//! Application-level errors for the two drivers.
//!
//! Library code reports [`crate::bundler::Error`]; the CLI layer wraps it, adds
//! argument and recipe failures, and `main` turns the result into an exit code.

use thiserror::Error;

/// Result type alias for driver operations
pub type Result<T> = std::result::Result<T, DriverError>;

/// Main error type for both binaries
#[derive(Error, Debug)]
pub enum DriverError {
    /// CLI argument errors
    #[error("{0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Deployment, packaging or build tool errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}
