//! Packaging drivers for Charm.
//!
//! - [`package`] configures, builds, installs and tests a CMake source tree.
//! - [`bundler`] stages a Windows deployment image (Qt runtime, plugins,
//!   OpenSSL, VC++ redistributable), optionally signs it and wraps it into an
//!   NSIS installer.
//!
//! Both are driven from the command line by [`cli`], and usable as a library.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;
pub mod package;
pub mod source;

// Re-export commonly used types
pub use error::{CliError, DriverError, Result};
