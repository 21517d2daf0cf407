//! Target architecture and build configuration types.

use clap::ValueEnum;

/// CPU architecture of the deployed application.
///
/// Only the bitness matters to the installer: 64-bit targets install below
/// `$PROGRAMFILES64`, 32-bit ones below `$PROGRAMFILES`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum Arch {
    /// x86_64 / AMD64
    #[default]
    #[value(name = "x64", alias = "amd64", alias = "x86_64")]
    X86_64,
    /// 32-bit x86
    #[value(name = "x86", alias = "i686")]
    X86,
    /// ARM64
    #[value(name = "arm64", alias = "aarch64")]
    AArch64,
}

impl Arch {
    /// Whether binaries for this architecture are 64-bit.
    pub fn is_64_bit(self) -> bool {
        matches!(self, Arch::X86_64 | Arch::AArch64)
    }
}

/// Qt/CMake build configuration of the binaries being deployed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum BuildType {
    /// Optimized build, deploys release Qt libraries
    #[default]
    #[value(alias = "Release")]
    Release,
    /// Debug build, deploys debug Qt libraries
    #[value(alias = "Debug")]
    Debug,
}

impl BuildType {
    /// Flag understood by `windeployqt` (`--release` / `--debug`).
    pub fn windeployqt_flag(self) -> &'static str {
        match self {
            BuildType::Release => "--release",
            BuildType::Debug => "--debug",
        }
    }

    /// Value for `CMAKE_BUILD_TYPE` and `cmake --build --config`.
    pub fn cmake_name(self) -> &'static str {
        match self {
            BuildType::Release => "Release",
            BuildType::Debug => "Debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitness() {
        assert!(Arch::X86_64.is_64_bit());
        assert!(Arch::AArch64.is_64_bit());
        assert!(!Arch::X86.is_64_bit());
    }

    #[test]
    fn parses_original_spellings() {
        assert_eq!(Arch::from_str("x64", true).unwrap(), Arch::X86_64);
        assert_eq!(Arch::from_str("x86", true).unwrap(), Arch::X86);
        assert_eq!(BuildType::from_str("release", true).unwrap(), BuildType::Release);
        assert_eq!(BuildType::from_str("debug", true).unwrap(), BuildType::Debug);
    }

    #[test]
    fn build_type_flags() {
        assert_eq!(BuildType::Release.windeployqt_flag(), "--release");
        assert_eq!(BuildType::Debug.cmake_name(), "Debug");
    }
}
