//! Source tree resolution

use crate::error::{CliError, DriverError, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// A CMake project root.
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
}

impl SourceTree {
    /// Resolve `path` to an absolute CMake project root.
    ///
    /// The directory must exist and contain `CMakeLists.txt`.
    pub fn resolve(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(DriverError::Cli(CliError::InvalidArguments {
                reason: format!("Source directory does not exist: {}", path.display()),
            }));
        }

        let cmake_lists = path.join("CMakeLists.txt");
        if !cmake_lists.is_file() {
            return Err(DriverError::Cli(CliError::InvalidArguments {
                reason: format!("CMakeLists.txt not found at {}", cmake_lists.display()),
            }));
        }

        Ok(Self {
            root: path.absolutize()?.into_owned(),
        })
    }

    /// Absolute project root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
