//! Installer pipeline orchestration.
//!
//! This module provides the [`InstallerPipeline`] that drives one run through
//! its stages and the [`InstallerReport`] describing the result.
//!
//! # Example
//!
//! ```no_run
//! use charm_deploy::bundler::{InstallerPipeline, SettingsBuilder, SystemRunner};
//!
//! # async fn example() -> charm_deploy::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .build_dir("build")
//!     .application_file_name("charm.exe")
//!     .plugin_folders(["plugins"])
//!     .build()?;
//!
//! let report = InstallerPipeline::new(&settings, &SystemRunner).run().await?;
//! println!("Generated package file: {}", report.installer.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for the installer
//! - [`orchestrator`] - [`InstallerPipeline`] and its [`Stage`]s

mod checksum;
mod orchestrator;

pub use checksum::calculate_sha256;
pub use orchestrator::{InstallerPipeline, InstallerReport, Stage};
