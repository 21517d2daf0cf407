//! Substitution table handed to `makensis` as `/Dname=value` definitions.

use super::utils;
use crate::bundler::settings::Settings;
use std::path::Path;

/// Value of `vcredist2013` when no redistributable was staged.
pub const NO_VCREDIST: &str = "none";

/// Ordered `name → value` definitions for the installer script.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Defines {
    entries: Vec<(&'static str, String)>,
}

impl Defines {
    /// Build the table for `settings` and the redistributable staged by deploy.
    pub fn for_installer(settings: &Settings, vcredist_2013: Option<&str>) -> Self {
        let product = settings.product();
        let application_file_name = settings
            .application_file_name()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut defines = Self::default();
        defines.insert("productName", &product.product_name);
        defines.insert("companyName", &product.company_name);
        defines.insert("productVersion", &product.version);
        defines.insert("setupname", &product.installer_name);
        defines.insert("applicationFileName", application_file_name);
        defines.insert("applicationIcon", display_or_empty(product.application_icon.as_deref()));
        defines.insert("programFilesDir", utils::program_files_dir(settings.arch()));
        defines.insert("deployDir", settings.image_dir().to_string_lossy());
        defines.insert("productLicence", utils::licence_directive(product.licence.as_deref()));
        defines.insert("vcredist2013", vcredist_2013.unwrap_or(NO_VCREDIST));
        defines
    }

    fn insert(&mut self, name: &'static str, value: impl Into<String>) {
        self.entries.push((name, value.into()));
    }

    /// Value of `name`, if defined.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Definitions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `/Dname=value` arguments in insertion order.
    pub fn to_args(&self) -> Vec<String> {
        self.iter().map(|(k, v)| format!("/D{k}={v}")).collect()
    }
}

fn display_or_empty(path: Option<&Path>) -> String {
    path.map(|p| p.to_string_lossy().into_owned()).unwrap_or_default()
}
