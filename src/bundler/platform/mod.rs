//! Platform-specific deployment.

pub mod windows;
