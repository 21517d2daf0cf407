//! Error types for deployment and installer operations.
//!
//! All fallible bundler functions return [`Result`]. Filesystem failures carry
//! the path and the action being attempted via [`ErrorExt::fs_context`];
//! external tool failures carry the command line and its captured output.

use std::{fmt::Display, io, path::PathBuf};
use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while staging, signing and packaging.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem operation failed on a known path.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being attempted
        context: &'static str,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying error
        #[source]
        error: io::Error,
    },

    /// A required external tool is not on `PATH`.
    #[error("{tool} not found in PATH. {hint}")]
    ToolNotFound {
        /// Tool executable name
        tool: String,
        /// Installation hint
        hint: &'static str,
    },

    /// The tool could not be started at all.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command line that was attempted
        command: String,
        /// Spawn error
        #[source]
        error: io::Error,
    },

    /// The tool ran and exited non-zero.
    #[error("Process {command}\n\texited with status {}\n{output}", exit_status(.status))]
    ToolFailed {
        /// Command line that was run
        command: String,
        /// Exit code, `None` when terminated by a signal
        status: Option<i32>,
        /// Combined stdout and stderr
        output: String,
    },

    /// A DLL from the deploy list was not found on the search path.
    #[error("Unable to locate {0}")]
    DllNotFound(String),

    /// `--deploy-vc-redist` was given but holds no matching installer.
    #[error("Cannot find vcredist2013 installer in {}", .0.display())]
    VcRedistNotFound(PathBuf),

    /// Deployment configuration is unusable.
    #[error("{0}")]
    InvalidConfig(String),

    /// Glob pattern could not be compiled.
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Glob iteration hit an unreadable entry.
    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// Directory walk failed.
    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

fn exit_status(status: &Option<i32>) -> String {
    status.map_or_else(|| "<signal>".to_string(), |code| code.to_string())
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wrap the error with the attempted action and path.
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Attach a message to an `Option`.
pub trait Context<T> {
    /// Convert to [`Result`], using `msg` as the error text.
    fn context<C: Display + Send + Sync + 'static>(self, msg: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display + Send + Sync + 'static>(self, msg: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
