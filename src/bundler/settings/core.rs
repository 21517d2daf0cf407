//! Core Settings struct and implementations.

use super::{Arch, BuildType, ProductSettings, WindowsSettings};
use std::path::{Path, PathBuf};

/// Complete configuration of one deployment run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder), which checks that
/// the build directory exists and resolves the staging directory to an
/// absolute path.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Target architecture.
    arch: Arch,

    /// Build configuration of the deployed binaries.
    build_type: BuildType,

    /// Product metadata.
    product: ProductSettings,

    /// CMake build tree holding the application and plugins.
    build_dir: PathBuf,

    /// Application executable, relative to `build_dir`.
    application_file_name: PathBuf,

    /// Directory `windeployqt` scans for QML imports.
    qml_dir: PathBuf,

    /// Absolute path of the staging image.
    image_dir: PathBuf,

    /// Plugin folders copied flat into the image root.
    plugin_folders: Vec<String>,

    /// Plugin folders copied into a subfolder named after the folder.
    extra_plugin_folders: Vec<String>,

    /// DLLs located on the search path and copied into the image.
    deploy_dlls: Vec<String>,

    /// Directories searched for `deploy_dlls` after `PATH`.
    extra_search_dirs: Vec<PathBuf>,

    /// Runtime extras and signing.
    windows: WindowsSettings,
}

impl Settings {
    /// Returns the target architecture.
    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// Returns the build configuration.
    pub fn build_type(&self) -> BuildType {
        self.build_type
    }

    /// Returns the product metadata.
    pub fn product(&self) -> &ProductSettings {
        &self.product
    }

    /// Returns the build directory.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Returns the application path as given (relative to the build directory).
    pub fn application_file_name(&self) -> &Path {
        &self.application_file_name
    }

    /// Returns the full path of the built application.
    pub fn application_path(&self) -> PathBuf {
        self.build_dir.join(&self.application_file_name)
    }

    /// Returns the QML import scan directory.
    pub fn qml_dir(&self) -> &Path {
        &self.qml_dir
    }

    /// Returns the staging image directory.
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Returns the flat plugin folders.
    pub fn plugin_folders(&self) -> &[String] {
        &self.plugin_folders
    }

    /// Returns the namespaced plugin folders.
    pub fn extra_plugin_folders(&self) -> &[String] {
        &self.extra_plugin_folders
    }

    /// Returns the DLLs to locate and deploy.
    pub fn deploy_dlls(&self) -> &[String] {
        &self.deploy_dlls
    }

    /// Returns the extra DLL search directories.
    pub fn extra_search_dirs(&self) -> &[PathBuf] {
        &self.extra_search_dirs
    }

    /// Returns the Windows extras.
    pub fn windows(&self) -> &WindowsSettings {
        &self.windows
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        arch: Arch,
        build_type: BuildType,
        product: ProductSettings,
        build_dir: PathBuf,
        application_file_name: PathBuf,
        qml_dir: PathBuf,
        image_dir: PathBuf,
        plugin_folders: Vec<String>,
        extra_plugin_folders: Vec<String>,
        deploy_dlls: Vec<String>,
        extra_search_dirs: Vec<PathBuf>,
        windows: WindowsSettings,
    ) -> Self {
        Self {
            arch,
            build_type,
            product,
            build_dir,
            application_file_name,
            qml_dir,
            image_dir,
            plugin_folders,
            extra_plugin_folders,
            deploy_dlls,
            extra_search_dirs,
            windows,
        }
    }
}
