//! Configuration for one deployment run.
//!
//! [`Settings`] is assembled once through [`SettingsBuilder`] and stays
//! immutable for the rest of the run.

mod arch;
mod builder;
mod core;
mod product;
mod windows;

pub use arch::{Arch, BuildType};
pub use builder::{DEFAULT_IMAGE_DIR, SettingsBuilder};
pub use core::Settings;
pub use product::ProductSettings;
pub use windows::{DEFAULT_TIMESTAMP_URL, WindowsSettings};
