//! Build recipe metadata.
//!
//! The recipe names the package and the extra CMake definitions the build
//! driver passes at configure time. The built-in recipe describes Charm; a TOML
//! file can override any part of it:
//!
//! ```toml
//! [package]
//! version = "1.14.0"
//!
//! [build.definitions]
//! UPDATE_CHECK_URL = "https://example.com/charm/updates.xml"
//! ```

use crate::error::{CliError, DriverError, Result};
use anyhow::Context;
use serde::Deserialize;
use std::{collections::BTreeMap, path::Path};
use url::Url;

/// CMake switch enabling deployment preparation in Charm's build.
pub const PREPARE_DEPLOY_DEFINITION: &str = "CHARM_PREPARE_DEPLOY";

/// CMake variable holding the update feed URL.
pub const UPDATE_CHECK_URL_DEFINITION: &str = "UPDATE_CHECK_URL";

/// Update feed baked into release builds.
pub const DEFAULT_UPDATE_CHECK_URL: &str = "https://updates.kdab.com/charm/updates.xml";

/// Package metadata from the `[package]` table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PackageMetadata {
    /// Package name
    pub name: String,
    /// Package version (e.g., "1.13.0")
    pub version: String,
    /// Licence identifier
    pub license: String,
    /// Author and contact
    pub author: String,
    /// Source repository URL
    pub url: Option<String>,
    /// One-line description
    pub description: String,
    /// Search keywords
    pub topics: Vec<String>,
    /// Build requirements, informational only
    pub requires: Vec<String>,
}

impl Default for PackageMetadata {
    fn default() -> Self {
        Self {
            name: "charm".into(),
            version: "1.13.0".into(),
            license: "GPLv2".into(),
            author: "KDAB <info@kdab.com>".into(),
            url: None,
            description: "The Cross-Platform Time Tracker".into(),
            topics: vec!["qt".into(), "timetracker".into()],
            requires: vec!["qtkeychain/[>=0.10.0]".into()],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BuildSection {
    definitions: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecipeFile {
    package: PackageMetadata,
    build: BuildSection,
}

/// Complete recipe: metadata plus configure definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Package metadata ([package] section)
    pub metadata: PackageMetadata,

    /// `-D<name>=<value>` pairs passed to the CMake configure step.
    pub definitions: BTreeMap<String, String>,
}

impl Default for Recipe {
    fn default() -> Self {
        let definitions = BTreeMap::from([
            (PREPARE_DEPLOY_DEFINITION.to_string(), "ON".to_string()),
            (
                UPDATE_CHECK_URL_DEFINITION.to_string(),
                DEFAULT_UPDATE_CHECK_URL.to_string(),
            ),
        ]);
        Self {
            metadata: PackageMetadata::default(),
            definitions,
        }
    }
}

impl Recipe {
    /// Parse a recipe from TOML text, layered over the built-in recipe.
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: RecipeFile = toml::from_str(text)?;
        let mut recipe = Recipe::default();
        recipe.metadata = file.package;
        recipe.definitions.extend(file.build.definitions);
        Ok(recipe)
    }

    /// Replace the update feed URL after validating it.
    pub fn set_update_check_url(&mut self, raw: &str) -> Result<()> {
        let url = validate_update_check_url(raw)?;
        self.definitions
            .insert(UPDATE_CHECK_URL_DEFINITION.to_string(), url.to_string());
        Ok(())
    }

    /// Toggle `CHARM_PREPARE_DEPLOY`.
    pub fn set_prepare_deploy(&mut self, enabled: bool) {
        self.definitions.insert(
            PREPARE_DEPLOY_DEFINITION.to_string(),
            if enabled { "ON" } else { "OFF" }.to_string(),
        );
    }
}

/// Load a recipe file (single read + parse).
pub fn load_recipe(path: &Path) -> Result<Recipe> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read recipe {}", path.display()))?;
    Recipe::from_toml(&text)
}

/// The update feed must be an absolute http(s) URL.
pub fn validate_update_check_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DriverError::Cli(CliError::InvalidArguments {
            reason: format!("Update check URL must use http or https, got {other}: {raw}"),
        })),
    }
}
