//! CMake command lines.

use crate::bundler::{BuildType, ToolCommand};
use std::{collections::BTreeMap, path::Path};

/// Environment that makes CTest print the output of failing tests.
pub const CTEST_OUTPUT_ON_FAILURE: (&str, &str) = ("CTEST_OUTPUT_ON_FAILURE", "1");

/// Options shared by every CMake invocation of one build.
#[derive(Debug, Clone)]
pub struct CMakeOptions<'a> {
    /// Build tree; every command runs inside it.
    pub build_dir: &'a Path,
    /// Build configuration.
    pub build_type: BuildType,
    /// Generator name (`-G`), CMake's default when `None`.
    pub generator: Option<&'a str>,
    /// `CMAKE_INSTALL_PREFIX`, CMake's default when `None`.
    pub install_prefix: Option<&'a Path>,
}

/// `cmake <source> [-G ..] -DCMAKE_BUILD_TYPE=.. [-DCMAKE_INSTALL_PREFIX=..] -D<k>=<v>...`
pub fn configure(options: &CMakeOptions<'_>, source: &Path, definitions: &BTreeMap<String, String>) -> ToolCommand {
    let mut cmd = ToolCommand::new("cmake")
        .current_dir(options.build_dir)
        .path_arg(source);
    if let Some(generator) = options.generator {
        cmd = cmd.arg("-G").arg(generator);
    }
    cmd = cmd.arg(format!("-DCMAKE_BUILD_TYPE={}", options.build_type.cmake_name()));
    if let Some(prefix) = options.install_prefix {
        cmd = cmd.arg(format!("-DCMAKE_INSTALL_PREFIX={}", prefix.display()));
    }
    cmd.args(definitions.iter().map(|(k, v)| format!("-D{k}={v}")))
}

/// `cmake --build . --config <type> [--target <target>]`
fn build_target(options: &CMakeOptions<'_>, target: Option<&str>) -> ToolCommand {
    let cmd = ToolCommand::new("cmake")
        .current_dir(options.build_dir)
        .args(["--build", ".", "--config", options.build_type.cmake_name()]);
    match target {
        Some(target) => cmd.args(["--target", target]),
        None => cmd,
    }
}

/// Compile everything with `jobs` parallel jobs.
pub fn build(options: &CMakeOptions<'_>, jobs: usize) -> ToolCommand {
    build_target(options, None).args(["--parallel".to_string(), jobs.to_string()])
}

/// Run the `install` target.
pub fn install(options: &CMakeOptions<'_>) -> ToolCommand {
    build_target(options, Some("install"))
}

/// Whether `generator` produces a multi-configuration build tree.
fn is_multi_config(generator: Option<&str>) -> bool {
    generator.is_some_and(|g| g.starts_with("Visual Studio") || g == "Xcode")
}

/// CTest target name: `RUN_TESTS` for Visual Studio and Xcode, `test` otherwise.
pub fn test_target(generator: Option<&str>) -> &'static str {
    if is_multi_config(generator) {
        "RUN_TESTS"
    } else {
        "test"
    }
}

/// Run the CTest target.
pub fn test(options: &CMakeOptions<'_>) -> ToolCommand {
    let (key, value) = CTEST_OUTPUT_ON_FAILURE;
    build_target(options, Some(test_target(options.generator))).env(key, value)
}
