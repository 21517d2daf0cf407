//! NSIS utility functions.
//!
//! Helper functions for architecture mapping, licence page rendering and
//! script file writing.

use crate::bundler::{
    error::{ErrorExt, Result},
    settings::Arch,
};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Map architecture to the NSIS program files constant.
pub fn program_files_dir(arch: Arch) -> &'static str {
    if arch.is_64_bit() {
        "$PROGRAMFILES64"
    } else {
        "$PROGRAMFILES"
    }
}

/// Modern UI licence page directive, empty without a licence file.
pub fn licence_directive(licence: Option<&Path>) -> String {
    match licence {
        Some(path) => format!("!insertmacro MUI_PAGE_LICENSE \"{}\"", path.display()),
        None => String::new(),
    }
}

/// Write file with UTF-8 BOM (required by NSIS).
///
/// NSIS requires installer scripts to be encoded with UTF-8 BOM (byte order mark).
/// This function writes the BOM (EF BB BF) followed by the content.
pub async fn write_utf8_bom(path: &Path, content: &str) -> Result<()> {
    let mut file = tokio::fs::File::create(path)
        .await
        .fs_context("creating NSI script file", path)?;

    // Write UTF-8 BOM: EF BB BF
    file.write_all(&[0xEF, 0xBB, 0xBF])
        .await
        .fs_context("writing UTF-8 BOM", path)?;
    file.write_all(content.as_bytes())
        .await
        .fs_context("writing NSI content", path)?;
    file.flush().await.fs_context("flushing NSI file", path)?;

    Ok(())
}
