//! NSIS installer build execution.
//!
//! Compiles NSI scripts into Windows installer executables using makensis.

use super::defines::Defines;
use crate::bundler::{
    error::Result,
    tools::{self, ToolCommand, ToolRunner},
};
use std::path::Path;

/// `makensis /NOCD /D<k>=<v>... <script>`
///
/// `/NOCD` keeps the working directory, so relative `OutFile` names land
/// where the driver was started.
pub fn makensis_command(defines: &Defines, nsi_path: &Path) -> ToolCommand {
    ToolCommand::new("makensis")
        .arg("/NOCD")
        .args(defines.to_args())
        .path_arg(nsi_path)
}

/// Run makensis to compile NSI script into installer executable.
pub async fn run_makensis<R: ToolRunner>(runner: &R, defines: &Defines, nsi_path: &Path) -> Result<()> {
    log::info!("Running makensis...");
    tools::run_checked(runner, &makensis_command(defines, nsi_path)).await?;
    Ok(())
}
