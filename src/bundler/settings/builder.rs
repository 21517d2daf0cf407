//! Builder for constructing Settings.

use super::{Arch, BuildType, ProductSettings, Settings, WindowsSettings};
use crate::bundler::error::{Error, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Default staging directory, relative to the working directory.
pub const DEFAULT_IMAGE_DIR: &str = "deployImage";

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use charm_deploy::bundler::{SettingsBuilder, ProductSettings};
///
/// # fn example() -> charm_deploy::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .build_dir("build")
///     .application_file_name("charm.exe")
///     .plugin_folders(["plugins"])
///     .product(ProductSettings {
///         product_name: "Charm".into(),
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    arch: Arch,
    build_type: BuildType,
    product: ProductSettings,
    build_dir: Option<PathBuf>,
    application_file_name: Option<PathBuf>,
    qml_dir: Option<PathBuf>,
    image_dir: Option<PathBuf>,
    plugin_folders: Vec<String>,
    extra_plugin_folders: Vec<String>,
    deploy_dlls: Vec<String>,
    extra_search_dirs: Vec<PathBuf>,
    windows: WindowsSettings,
}

/// Drops blank entries, which `;`-joined lists produce for empty input or
/// trailing separators.
fn non_empty<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items
        .into_iter()
        .map(Into::into)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the target architecture. Default: x64
    pub fn arch(mut self, arch: Arch) -> Self {
        self.arch = arch;
        self
    }

    /// Sets the build configuration. Default: release
    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Sets product metadata.
    pub fn product(mut self, product: ProductSettings) -> Self {
        self.product = product;
        self
    }

    /// Sets the build directory.
    ///
    /// # Required
    ///
    /// Must exist when [`build`](Self::build) is called.
    pub fn build_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the application executable, relative to the build directory.
    ///
    /// # Required
    pub fn application_file_name<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.application_file_name = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the QML scan directory. Default: working directory
    pub fn qml_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.qml_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the staging directory. Default: `./deployImage`
    pub fn image_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.image_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the flat plugin folders (relative to the build directory).
    pub fn plugin_folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plugin_folders = non_empty(folders);
        self
    }

    /// Sets the namespaced plugin folders (relative to the build directory).
    pub fn extra_plugin_folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_plugin_folders = non_empty(folders);
        self
    }

    /// Sets the DLLs to locate and copy.
    pub fn deploy_dlls<I, S>(mut self, dlls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deploy_dlls = non_empty(dlls);
        self
    }

    /// Sets extra DLL search directories.
    pub fn extra_search_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_search_dirs = non_empty(dirs).into_iter().map(PathBuf::from).collect();
        self
    }

    /// Sets runtime extras and signing.
    pub fn windows(mut self, windows: WindowsSettings) -> Self {
        self.windows = windows;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// - the build directory is unset or does not exist
    /// - the application file name is unset
    pub fn build(self) -> Result<Settings> {
        let build_dir = self
            .build_dir
            .ok_or_else(|| Error::InvalidConfig("--build-dir is required".into()))?;
        if !build_dir.exists() {
            return Err(Error::InvalidConfig(format!(
                "Build dir {} does not exist",
                build_dir.display()
            )));
        }

        let application_file_name = self
            .application_file_name
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| Error::InvalidConfig("--application-file-name is required".into()))?;

        let image_dir = self
            .image_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_DIR));
        let image_dir = image_dir
            .absolutize()
            .fs_context("resolving staging directory", &image_dir)?
            .into_owned();

        let qml_dir = self.qml_dir.unwrap_or_else(|| PathBuf::from("."));
        let qml_dir = qml_dir
            .absolutize()
            .fs_context("resolving QML directory", &qml_dir)?
            .into_owned();

        Ok(Settings::new(
            self.arch,
            self.build_type,
            self.product,
            build_dir,
            application_file_name,
            qml_dir,
            image_dir,
            self.plugin_folders,
            self.extra_plugin_folders,
            self.deploy_dlls,
            self.extra_search_dirs,
            self.windows,
        ))
    }
}
