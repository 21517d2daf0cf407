//! `windeployqt` invocations.

use crate::bundler::{
    error::Result,
    settings::Settings,
    tools::{self, ToolCommand, ToolRunner},
};
use std::path::Path;

/// Diagnostic `windeployqt` prints for binaries that do not link Qt.
const NOT_A_QT_EXECUTABLE: &str = "does not seem to be a Qt executable.";

/// Whether a failed `windeployqt` run only complained that its target is not a
/// Qt binary. Such failures are expected for third-party DLLs.
pub fn is_non_fatal_qt_deploy_warning(output: &str) -> bool {
    output.contains(NOT_A_QT_EXECUTABLE)
}

/// How a best-effort dependency pass ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DependencyPass {
    /// windeployqt succeeded.
    Deployed,
    /// The target does not link Qt; nothing was deployed for it.
    NotQt,
}

/// `windeployqt --<type> [--compiler-runtime] --dir <image> --qmldir <qml> <target>`
pub fn windeployqt_command(settings: &Settings, target: &Path, compiler_runtime: bool) -> ToolCommand {
    let mut cmd = ToolCommand::new("windeployqt").arg(settings.build_type().windeployqt_flag());
    if compiler_runtime {
        cmd = cmd.arg("--compiler-runtime");
    }
    cmd.arg("--dir")
        .path_arg(settings.image_dir())
        .arg("--qmldir")
        .path_arg(settings.qml_dir())
        .path_arg(target)
}

/// Deploy the Qt runtime for the main application. Any failure is fatal.
pub async fn deploy_application<R: ToolRunner>(runner: &R, settings: &Settings, app: &Path) -> Result<()> {
    tools::run_checked(runner, &windeployqt_command(settings, app, true)).await?;
    Ok(())
}

/// Deploy Qt dependencies of a library or plugin, tolerating non-Qt targets.
pub async fn deploy_dependencies<R: ToolRunner>(
    runner: &R,
    settings: &Settings,
    target: &Path,
) -> Result<DependencyPass> {
    let command = windeployqt_command(settings, target, false);
    log::info!("{}", command);
    let output = runner.run(&command).await?;

    if output.success() {
        tools::log_output(&output);
        return Ok(DependencyPass::Deployed);
    }
    if is_non_fatal_qt_deploy_warning(&output.output) {
        log::info!("{}", output.output.trim());
        return Ok(DependencyPass::NotQt);
    }
    output.into_checked(&command).map(|_| DependencyPass::Deployed)
}
