//! Keystore location parsing
//!
//! Server TLS settings express the keystore as a URI-like string. `file:`
//! locations (and bare paths) resolve to the local filesystem and are the
//! only kind provisioning can act on; any other scheme is carried through
//! opaquely for a downstream layer to interpret.

use std::fmt;
use std::path::{Path, PathBuf};

/// Where a keystore lives.
///
/// Supports two formats:
/// - `file:/path/to/keystore.p12` or `file:///path/to/keystore.p12` - local file
/// - a bare path (`/etc/tls/keystore.p12`, `tls/keystore.p12`) - local file
///
/// Anything with an unrecognized scheme (`classpath:…`, `vault:…`) is kept
/// verbatim as [`KeystoreLocation::Opaque`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeystoreLocation {
    /// Local filesystem path.
    File(PathBuf),
    /// Unrecognized scheme, passed through unchanged.
    Opaque(String),
}

impl KeystoreLocation {
    pub fn parse(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix("file://") {
            // file:///abs/path keeps the leading slash of the path
            return Self::File(PathBuf::from(rest));
        }
        if let Some(rest) = raw.strip_prefix("file:") {
            return Self::File(PathBuf::from(rest));
        }
        if let Some((scheme, _)) = raw.split_once(':') {
            // Single letters are Windows drive prefixes, not schemes
            if scheme.len() > 1 && scheme.chars().all(|c| c.is_ascii_alphabetic()) {
                return Self::Opaque(raw.to_string());
            }
        }
        Self::File(PathBuf::from(raw))
    }

    /// Filesystem path for `file:` locations, `None` for opaque ones.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Opaque(_) => None,
        }
    }
}

impl From<&str> for KeystoreLocation {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for KeystoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file:{}", path.display()),
            Self::Opaque(raw) => f.write_str(raw),
        }
    }
}
