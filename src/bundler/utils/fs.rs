//! File system utilities for staging.
//!
//! Provides directory recreation, copy-into-directory with same-file
//! detection, and recursive file discovery by glob or extension.

use crate::bundler::error::{Error, ErrorExt, Result};
use glob::{MatchOptions, Pattern};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Result of copying a file into a directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CopyOutcome {
    /// The file was written to this destination.
    Copied(PathBuf),
    /// Source and destination are the same file; nothing was written.
    SameFile(PathBuf),
}

impl CopyOutcome {
    /// Destination path in either case.
    pub fn destination(&self) -> &Path {
        match self {
            CopyOutcome::Copied(p) | CopyOutcome::SameFile(p) => p,
        }
    }
}

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        // Try removal, ignore NotFound (idempotent)
        match fs::remove_dir_all(path).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e).fs_context("removing directory", path),
        }
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Whether `a` and `b` resolve to the same existing file.
async fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a).await, fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copies a regular file into `dest_dir`, keeping its file name.
///
/// Fails if the source is missing or not a file. Copying a file onto itself
/// is reported as [`CopyOutcome::SameFile`] instead of truncating it.
pub async fn copy_file_into(from: &Path, dest_dir: &Path) -> Result<CopyOutcome> {
    let metadata = fs::metadata(from).await.fs_context("copying", from)?;
    if !metadata.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    let file_name = from
        .file_name()
        .ok_or_else(|| Error::GenericError(format!("{from:?} has no file name")))?;
    let to = dest_dir.join(file_name);

    if is_same_file(from, &to).await {
        return Ok(CopyOutcome::SameFile(to));
    }

    fs::create_dir_all(dest_dir)
        .await
        .fs_context("creating destination directory", dest_dir)?;
    fs::copy(from, &to).await.fs_context("copying to", &to)?;
    Ok(CopyOutcome::Copied(to))
}

/// Files below `base` matching the glob `pattern` (e.g. `**/*.dll`), sorted.
///
/// `base` is escaped so glob metacharacters in directory names are taken
/// literally. Matching ignores case, as Windows does, and skips hidden
/// (dot-prefixed) entries. A missing `base` yields no matches.
pub fn glob_files(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = format!(
        "{}/{}",
        Pattern::escape(&base.to_string_lossy()),
        pattern
    );
    let options = MatchOptions {
        case_sensitive: false,
        require_literal_separator: false,
        require_literal_leading_dot: true,
    };

    let mut files = Vec::new();
    for entry in glob::glob_with(&full, options)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Files below `root` (recursive) whose extension equals `extension`,
/// compared case-insensitively, in walk order sorted by path.
pub fn find_files_with_extension(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
