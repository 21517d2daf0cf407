//! OpenSSL and VC++ runtime payloads.

use crate::bundler::{
    error::{Error, Result},
    utils::fs::glob_files,
};
use std::path::{Path, PathBuf};

/// OpenSSL 1.0 DLLs, relative to its installation root.
pub const OPENSSL_1_0_DLLS: [&str; 3] = ["libeay32.dll", "libssl32.dll", "ssleay32.dll"];

/// OpenSSL 1.1 DLLs, relative to its installation root.
pub const OPENSSL_1_1_DLLS: [&str; 2] = ["bin/libcrypto-1_1-x64.dll", "bin/libssl-1_1-x64.dll"];

/// Installer name pattern of the VC++ 2013 x64 redistributable.
pub const VCREDIST_2013_X64_PATTERN: &str = "vcredist_x64-2013*.exe";

/// Absolute paths of `names` below `root`.
pub fn files_below(root: &Path, names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|name| root.join(name)).collect()
}

/// First VC++ 2013 x64 redistributable directly inside `root`.
pub fn find_vcredist_2013(root: &Path) -> Result<PathBuf> {
    glob_files(root, VCREDIST_2013_X64_PATTERN)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::VcRedistNotFound(root.to_path_buf()))
}
