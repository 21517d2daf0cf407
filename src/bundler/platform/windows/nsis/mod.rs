//! Windows NSIS installer creation.
//!
//! Turns a populated staging image into a setup executable by passing a fixed
//! set of `/D` definitions to `makensis`.
//!
//! # Module Organization
//!
//! - `defines` - substitution table built from settings
//! - `template` - built-in NSI script
//! - `build` - makensis execution
//! - `utils` - program files mapping, licence directive, BOM writing

mod build;
mod defines;
mod template;
mod utils;

pub use build::makensis_command;
pub use defines::{Defines, NO_VCREDIST};
pub use template::NSI_TEMPLATE;
pub use utils::{licence_directive, program_files_dir};

use crate::bundler::{
    error::{ErrorExt, Result},
    settings::Settings,
    tools::ToolRunner,
};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// File name of the generated built-in script.
const GENERATED_SCRIPT_NAME: &str = "NullsoftInstaller.nsi";

/// NSI script handed to makensis.
enum InstallerScript {
    /// `--nsis-script`, used as is.
    Configured(PathBuf),
    /// Built-in template written into a scratch directory that is removed on drop.
    Generated { _dir: TempDir, path: PathBuf },
}

impl InstallerScript {
    /// The configured script, or the built-in template written to a fresh
    /// temporary directory so no existing file is ever overwritten.
    async fn prepare(settings: &Settings) -> Result<Self> {
        if let Some(script) = &settings.windows().nsis_script {
            return Ok(Self::Configured(script.clone()));
        }

        let dir = tempfile::Builder::new()
            .prefix("charm-nsis")
            .tempdir()
            .fs_context("creating NSI script directory", std::env::temp_dir())?;
        let path = dir.path().join(GENERATED_SCRIPT_NAME);
        utils::write_utf8_bom(&path, NSI_TEMPLATE).await?;
        Ok(Self::Generated { _dir: dir, path })
    }

    fn path(&self) -> &Path {
        match self {
            Self::Configured(path) | Self::Generated { path, .. } => path,
        }
    }
}

/// Absolute path makensis writes the installer to.
pub fn installer_path(settings: &Settings) -> Result<PathBuf> {
    let name = Path::new(&settings.product().installer_name);
    Ok(name
        .absolutize()
        .fs_context("resolving installer path", name)?
        .into_owned())
}

/// Compile the installer for a populated image.
///
/// # Returns
///
/// Absolute path of the generated installer.
pub async fn make_installer<R: ToolRunner>(
    runner: &R,
    settings: &Settings,
    vcredist_2013: Option<&str>,
) -> Result<PathBuf> {
    log::info!("Building NSIS installer for {}", settings.product().product_name);

    let defines = Defines::for_installer(settings, vcredist_2013);
    let script = InstallerScript::prepare(settings).await?;
    build::run_makensis(runner, &defines, script.path()).await?;
    drop(script);

    let installer = installer_path(settings)?;
    if !installer.is_file() {
        crate::bail!("makensis succeeded but {} was not created", installer.display());
    }
    Ok(installer)
}
