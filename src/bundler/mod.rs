//! Windows deployment and installer generation.
//!
//! Stages a Qt application with its runtime into an image directory,
//! optionally signs it, and compiles an NSIS installer from the image.
//!
//! # Module Organization
//!
//! - [`settings`] - run configuration and its builder
//! - [`tools`] - external tool invocation ([`ToolRunner`])
//! - [`platform`] - staging, Qt deployment, signing and NSIS
//! - [`builder`] - the staged [`InstallerPipeline`]
//! - [`utils`] - filesystem helpers

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod tools;
pub mod utils;

pub use builder::{InstallerPipeline, InstallerReport, Stage};
pub use error::{Error, Result};
pub use platform::windows::{DeployHelper, DeployOutcome, StagingImage};
pub use settings::{
    Arch, BuildType, DEFAULT_IMAGE_DIR, DEFAULT_TIMESTAMP_URL, ProductSettings, Settings,
    SettingsBuilder, WindowsSettings,
};
pub use tools::{SystemRunner, ToolCommand, ToolOutput, ToolRunner};
