//! DLL lookup across the staging image, `PATH` and extra directories.
//!
//! The candidate extensions are an explicit argument. Nothing here reads or
//! writes `PATHEXT`.

use crate::bundler::error::{Error, Result};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

/// Extensions a deployable library may carry.
pub const DLL_EXTENSIONS: &[&str] = &[".dll"];

/// Ordered search path for DLL lookup: the staging image, every entry of
/// `system_path` (a `PATH`-style list), then `extra_dirs`.
pub fn dll_search_path(image: &Path, system_path: Option<&OsStr>, extra_dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs = vec![image.to_path_buf()];
    if let Some(path) = system_path {
        dirs.extend(std::env::split_paths(path).filter(|p| !p.as_os_str().is_empty()));
    }
    dirs.extend(extra_dirs.iter().cloned());
    dirs
}

/// File names tried for `name` in each directory.
///
/// A name already ending in an allowed extension is tried as-is; otherwise each
/// allowed extension is appended in turn.
fn candidate_names(name: &str, extensions: &[&str]) -> Vec<String> {
    let lower = name.to_ascii_lowercase();
    if extensions.iter().any(|ext| lower.ends_with(&ext.to_ascii_lowercase())) {
        vec![name.to_string()]
    } else {
        extensions.iter().map(|ext| format!("{name}{ext}")).collect()
    }
}

/// First existing file for `name` in `search_path`, trying only `extensions`.
pub fn locate_dll(name: &str, search_path: &[PathBuf], extensions: &[&str]) -> Result<PathBuf> {
    let candidates = candidate_names(name, extensions);
    for dir in search_path {
        for candidate in &candidates {
            let path = dir.join(candidate);
            if path.is_file() {
                log::debug!("Located {} at {}", name, path.display());
                return Ok(path);
            }
        }
    }
    Err(Error::DllNotFound(name.to_string()))
}
