//! Staging image lifecycle.

use crate::bundler::{
    error::{ErrorExt, Result},
    utils::fs::{self, CopyOutcome},
};
use std::path::{Path, PathBuf};

/// The directory NSIS packages, recreated at the start of every run.
#[derive(Clone, Debug)]
pub struct StagingImage {
    root: PathBuf,
}

impl StagingImage {
    /// Wrap an (absolute) staging directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Staging root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Remove the image recursively if present, then create it empty.
    pub async fn clean(&self) -> Result<()> {
        log::info!("Cleaning {}", self.root.display());
        fs::create_dir_all(&self.root, true).await
    }

    /// Subdirectory `name` of the image, created if absent.
    pub async fn subdir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.root.join(name);
        tokio::fs::create_dir_all(&dir)
            .await
            .fs_context("creating staging subdirectory", &dir)?;
        Ok(dir)
    }

    /// Copy `src` into `dest_dir` (the image root when `None`).
    ///
    /// Copying a file onto itself happens when a DLL is found inside the image
    /// because an earlier `windeployqt` pass already put it there; that is
    /// logged and treated as done.
    pub async fn copy_in(&self, src: &Path, dest_dir: Option<&Path>) -> Result<CopyOutcome> {
        let dest_dir = dest_dir.unwrap_or(&self.root);
        log::info!("Copy {} to {}", src.display(), dest_dir.display());
        let outcome = fs::copy_file_into(src, dest_dir).await?;
        if let CopyOutcome::SameFile(dest) = &outcome {
            log::info!("Same file: {} and {} -- ignoring", src.display(), dest.display());
        }
        Ok(outcome)
    }
}
