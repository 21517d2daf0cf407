//! Authenticode signing with `signtool`.

use crate::bundler::{
    error::Result,
    settings::Settings,
    tools::{self, ToolCommand, ToolRunner},
    utils::fs::find_files_with_extension,
};
use std::path::{Path, PathBuf};

/// Whether signing was requested for this run.
pub fn should_sign(settings: &Settings) -> bool {
    settings.windows().sign
}

/// `signtool sign -t <timestamp> -fd SHA256 -v <file>`
pub fn signtool_command(settings: &Settings, file: &Path) -> ToolCommand {
    ToolCommand::new("signtool")
        .args(["sign", "-t"])
        .arg(settings.windows().timestamp_url.as_str())
        .args(["-fd", "SHA256", "-v"])
        .path_arg(file)
}

/// Sign one file in place.
pub async fn sign_file<R: ToolRunner>(runner: &R, settings: &Settings, file: &Path) -> Result<()> {
    tools::run_checked(runner, &signtool_command(settings, file)).await?;
    Ok(())
}

/// Every `.exe`, then every `.dll`, below `root`.
pub fn signable_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = find_files_with_extension(root, "exe")?;
    files.extend(find_files_with_extension(root, "dll")?);
    Ok(files)
}

/// Sign every executable and library below `root`; returns what was signed.
pub async fn sign_tree<R: ToolRunner>(runner: &R, settings: &Settings, root: &Path) -> Result<Vec<PathBuf>> {
    let files = signable_files(root)?;
    for file in &files {
        sign_file(runner, settings, file).await?;
    }
    Ok(files)
}
