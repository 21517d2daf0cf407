//! External tool lookup.
//!
//! Every tool is resolved through `PATH` with the `which` crate right before
//! it is used, so a missing tool surfaces as [`Error::ToolNotFound`] naming the
//! package to install instead of an opaque spawn error.

use crate::bundler::error::{Error, Result};
use std::path::PathBuf;

/// Installation hint for a tool the drivers invoke.
fn install_hint(tool: &str) -> &'static str {
    match tool {
        "windeployqt" => "Add the Qt bin directory (e.g. C:\\Qt\\5.15.2\\msvc2019_64\\bin) to PATH.",
        "signtool" => "Install the Windows SDK and add its bin directory to PATH.",
        "makensis" => "Please install NSIS (e.g., choco install nsis or apt-get install nsis).",
        "cmake" => "Please install CMake (https://cmake.org/download/).",
        _ => "Make sure it is installed and on PATH.",
    }
}

/// Resolve `tool` to an absolute executable path.
pub fn resolve_tool(tool: &str) -> Result<PathBuf> {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", tool, e);
            Err(Error::ToolNotFound {
                tool: tool.to_string(),
                hint: install_hint(tool),
            })
        }
    }
}
