//! Windows runtime extras and signing configuration.

use std::path::PathBuf;

/// Timestamp server used for every Authenticode signature.
pub const DEFAULT_TIMESTAMP_URL: &str = "http://timestamp.globalsign.com/scripts/timestamp.dll";

/// Optional runtime payloads and Authenticode signing.
#[derive(Clone, Debug)]
pub struct WindowsSettings {
    /// OpenSSL 1.0 installation root (`libeay32.dll`, `libssl32.dll`, `ssleay32.dll`).
    pub openssl_1_0: Option<PathBuf>,

    /// OpenSSL 1.1 installation root (DLLs live in its `bin` folder).
    pub openssl_1_1: Option<PathBuf>,

    /// Directory holding the VC++ redistributable installers.
    pub vc_redist: Option<PathBuf>,

    /// Sign staged binaries and the installer with `signtool`.
    pub sign: bool,

    /// Timestamp server passed to `signtool -t`.
    pub timestamp_url: String,

    /// NSIS definitions script. None means the built-in template.
    pub nsis_script: Option<PathBuf>,
}

impl Default for WindowsSettings {
    fn default() -> Self {
        Self {
            openssl_1_0: None,
            openssl_1_1: None,
            vc_redist: None,
            sign: false,
            timestamp_url: DEFAULT_TIMESTAMP_URL.to_string(),
            nsis_script: None,
        }
    }
}
