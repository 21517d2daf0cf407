//! Product metadata shown by the installer.

use std::path::PathBuf;

/// Product metadata and installer naming.
///
/// Every field ends up in the NSIS substitution table.
///
/// # Examples
///
/// ```no_run
/// use charm_deploy::bundler::ProductSettings;
///
/// let product = ProductSettings {
///     product_name: "Charm".into(),
///     company_name: "KDAB".into(),
///     version: "1.13.0".into(),
///     installer_name: "Charm-1.13.0-setup.exe".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProductSettings {
    /// Human-readable product name.
    pub product_name: String,

    /// Publisher shown in the installer and in Add/Remove Programs.
    pub company_name: String,

    /// Free-form version string, passed through untouched.
    pub version: String,

    /// Licence text shown on an extra wizard page.
    ///
    /// Default: None (no licence page)
    pub licence: Option<PathBuf>,

    /// File name of the generated installer, relative to the working directory.
    pub installer_name: String,

    /// Icon used for the installer and shortcuts.
    pub application_icon: Option<PathBuf>,
}

impl Default for ProductSettings {
    fn default() -> Self {
        Self {
            product_name: "My Product".into(),
            company_name: "My Company".into(),
            version: "0.1".into(),
            licence: None,
            installer_name: "setup.exe".into(),
            application_icon: None,
        }
    }
}
