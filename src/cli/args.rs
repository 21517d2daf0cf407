//! Command line argument parsing and validation.
//!
//! Both binaries parse with clap derive. Installer flags are kebab-case and
//! also accept the camelCase spellings older build scripts pass.

use crate::{
    bundler::{
        Arch, BuildType, DEFAULT_IMAGE_DIR, DEFAULT_TIMESTAMP_URL, ProductSettings, Settings,
        SettingsBuilder, WindowsSettings,
    },
    error::Result,
    metadata::{self, Recipe},
};
use clap::Parser;
use std::path::PathBuf;

/// Windows installer builder for Charm
#[derive(Parser, Debug)]
#[command(
    name = "charm_installer",
    version,
    about = "Stage a Windows deployment image and build an NSIS installer",
    long_about = "Copies the application, its DLLs, Qt runtime, plugins, OpenSSL and the VC++ \
redistributable into a staging image, optionally signs every binary, and runs makensis.

Usage:
  charm_installer --build-dir build --application-file-name Charm.exe \\
      --plugin-folders plugins --deploy-dlls \"qtkeychain.dll\" --sign

List arguments take ';'-separated values.

Exit code 0 = installer guaranteed to exist at the reported path."
)]
pub struct Args {
    /// Target architecture
    #[arg(long, value_enum, default_value_t = Arch::X86_64)]
    pub architecture: Arch,

    /// Build configuration of the deployed binaries
    #[arg(long, alias = "buildType", value_enum, env = "CHARM_BUILD_TYPE", default_value_t = BuildType::Release)]
    pub build_type: BuildType,

    /// Installer file to produce
    #[arg(long, alias = "installerName", default_value = "setup.exe")]
    pub installer_name: String,

    /// Application executable, relative to the build directory
    #[arg(long, alias = "applicationFileName", value_name = "FILE")]
    pub application_file_name: Option<PathBuf>,

    /// Installer and shortcut icon
    #[arg(long, alias = "applicationIcon", value_name = "ICO")]
    pub application_icon: Option<PathBuf>,

    /// CMake build directory holding the application and plugins
    #[arg(long, alias = "buildDir", value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Plugin folders whose DLLs go to the image root
    #[arg(long, alias = "pluginFolders", value_delimiter = ';')]
    pub plugin_folders: Vec<String>,

    /// Plugin folders whose DLLs go to a same-named image subdirectory
    #[arg(long, alias = "extraPluginFolders", value_delimiter = ';')]
    pub extra_plugin_folders: Vec<String>,

    /// Product name shown by the installer
    #[arg(long, alias = "productName", default_value = "My Product")]
    pub product_name: String,

    /// Publisher name
    #[arg(long, alias = "companyName", default_value = "My Company")]
    pub company_name: String,

    /// Product version
    #[arg(long, alias = "productVersion", default_value = "0.1")]
    pub product_version: String,

    /// Licence file shown on the licence page
    #[arg(long, alias = "productLicence", value_name = "FILE")]
    pub product_licence: Option<PathBuf>,

    /// Additional directories searched for --deploy-dlls
    #[arg(long, alias = "extraSearchDirs", value_delimiter = ';')]
    pub extra_search_dirs: Vec<String>,

    /// DLLs to locate and deploy
    #[arg(long, alias = "deployDlls", value_delimiter = ';')]
    pub deploy_dlls: Vec<String>,

    /// OpenSSL 1.0 installation root
    #[arg(long = "deploy-open-ssl1", alias = "deployOpenSSL1", value_name = "DIR")]
    pub deploy_openssl_1_0: Option<PathBuf>,

    /// OpenSSL 1.1 installation root
    #[arg(long = "deploy-open-ssl1-1", alias = "deployOpenSSL1_1", value_name = "DIR")]
    pub deploy_openssl_1_1: Option<PathBuf>,

    /// Directory holding vcredist_x64-2013*.exe
    #[arg(long, alias = "deployVCRedist", value_name = "DIR")]
    pub deploy_vc_redist: Option<PathBuf>,

    /// Sign every binary and the installer with signtool
    #[arg(long, env = "CHARM_SIGN")]
    pub sign: bool,

    /// Timestamp server used when signing
    #[arg(long, default_value = DEFAULT_TIMESTAMP_URL, value_name = "URL")]
    pub timestamp_url: String,

    /// QML sources scanned by windeployqt
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub qml_dir: PathBuf,

    /// Staging directory (recreated on every run)
    #[arg(long, default_value = DEFAULT_IMAGE_DIR, value_name = "DIR")]
    pub image_dir: PathBuf,

    /// NSIS script to use instead of the built-in one
    #[arg(long, value_name = "FILE")]
    pub nsis_script: Option<PathBuf>,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate and convert into deployment settings.
    pub fn into_settings(self) -> Result<Settings> {
        let product = ProductSettings {
            product_name: self.product_name,
            company_name: self.company_name,
            version: self.product_version,
            licence: self.product_licence,
            installer_name: self.installer_name,
            application_icon: self.application_icon,
        };
        let windows = WindowsSettings {
            openssl_1_0: self.deploy_openssl_1_0,
            openssl_1_1: self.deploy_openssl_1_1,
            vc_redist: self.deploy_vc_redist,
            sign: self.sign,
            timestamp_url: self.timestamp_url,
            nsis_script: self.nsis_script,
        };

        let mut builder = SettingsBuilder::new()
            .arch(self.architecture)
            .build_type(self.build_type)
            .product(product)
            .qml_dir(&self.qml_dir)
            .image_dir(&self.image_dir)
            .plugin_folders(self.plugin_folders)
            .extra_plugin_folders(self.extra_plugin_folders)
            .deploy_dlls(self.deploy_dlls)
            .extra_search_dirs(self.extra_search_dirs)
            .windows(windows);
        if let Some(dir) = &self.build_dir {
            builder = builder.build_dir(dir);
        }
        if let Some(app) = &self.application_file_name {
            builder = builder.application_file_name(app);
        }

        Ok(builder.build()?)
    }
}

/// CMake package builder for Charm
#[derive(Parser, Debug)]
#[command(
    name = "charm_package",
    version,
    about = "Configure, build, install and test Charm with CMake"
)]
pub struct PackageArgs {
    /// Source tree containing CMakeLists.txt
    #[arg(short = 's', long, default_value = ".", value_name = "DIR")]
    pub source: PathBuf,

    /// Build directory (created if missing)
    #[arg(short = 'b', long, default_value = "build", value_name = "DIR")]
    pub build_dir: PathBuf,

    /// Build configuration
    #[arg(long, value_enum, env = "CHARM_BUILD_TYPE", default_value_t = BuildType::Release)]
    pub build_type: BuildType,

    /// CMake generator
    #[arg(short = 'G', long, value_name = "NAME")]
    pub generator: Option<String>,

    /// CMAKE_INSTALL_PREFIX
    #[arg(long, value_name = "DIR")]
    pub install_prefix: Option<PathBuf>,

    /// Parallel compile jobs (default: logical CPU count)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// TOML recipe overriding package metadata and definitions
    #[arg(long, value_name = "FILE")]
    pub recipe: Option<PathBuf>,

    /// Update feed URL compiled into the application
    #[arg(long, value_name = "URL")]
    pub update_check_url: Option<String>,

    /// Configure with CHARM_PREPARE_DEPLOY=OFF
    #[arg(long)]
    pub no_prepare_deploy: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl PackageArgs {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Built-in recipe, or the --recipe file, with flag overrides applied.
    pub fn recipe(&self) -> Result<Recipe> {
        let mut recipe = match &self.recipe {
            Some(path) => metadata::load_recipe(path)?,
            None => Recipe::default(),
        };
        if let Some(url) = &self.update_check_url {
            recipe.set_update_check_url(url)?;
        }
        if self.no_prepare_deploy {
            recipe.set_prepare_deploy(false);
        }
        Ok(recipe)
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Output config for the given quiet flag.
    pub fn new(quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(quiet),
        }
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) {
        self.output.success(message)
    }

    /// Print warning message, even in quiet mode
    pub fn warn(&self, message: &str) {
        self.output.warn(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        self.output.indent(message)
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.quiet)
    }
}

impl From<&PackageArgs> for RuntimeConfig {
    fn from(args: &PackageArgs) -> Self {
        Self::new(args.quiet)
    }
}
