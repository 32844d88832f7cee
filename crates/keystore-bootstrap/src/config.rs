//! Keystore configuration types and parsing
//!
//! Configuration values support environment variable expansion via `${VAR}`
//! syntax, which is the usual way keystore passwords reach the process.

use crate::env_expand::{expand_env_vars, EnvExpandError};
use crate::location::KeystoreLocation;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during keystore configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse the configuration file
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Environment variable expansion failed
    #[error("failed to expand environment variable: {0}")]
    EnvExpand(#[from] EnvExpandError),

    /// Missing required configuration field
    #[error("missing required field: {0}")]
    MissingField(String),
}

/// On-disk keystore container format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum KeystoreType {
    /// PKCS#12 / PFX container
    #[default]
    #[serde(rename = "PKCS12", alias = "pkcs12")]
    Pkcs12,
    /// Java keystore format. Accepted in configuration for compatibility,
    /// but no placeholder can be materialized for it.
    #[serde(rename = "JKS", alias = "jks")]
    Jks,
}

impl KeystoreType {
    /// Bytes of a minimal valid empty container of this type, if one can be
    /// produced.
    pub fn placeholder_bytes(&self) -> Option<&'static [u8]> {
        match self {
            Self::Pkcs12 => Some(&crate::pkcs12::EMPTY_PFX),
            Self::Jks => None,
        }
    }
}

impl fmt::Display for KeystoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pkcs12 => f.write_str("PKCS12"),
            Self::Jks => f.write_str("JKS"),
        }
    }
}

/// TLS keystore settings, supplied once at startup and immutable thereafter.
///
/// # Example Configuration
///
/// ```toml
/// location = "file:/var/lib/myserver/tls/keystore.p12"
/// password = "${KEYSTORE_PASSWORD}"
/// key_alias = "server"
/// store_type = "PKCS12"
/// create_keystore_dir_if_missing = true
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeystoreConfig {
    /// Keystore location: a `file:` URI or a bare filesystem path.
    pub location: String,

    /// Keystore password. Typically provided via environment variable:
    /// `${KEYSTORE_PASSWORD}`.
    pub password: String,

    /// Alias of the server key entry inside the store.
    #[serde(default = "default_key_alias")]
    pub key_alias: String,

    /// On-disk container format.
    pub store_type: KeystoreType,

    /// Whether provisioning may create missing parent directories of the
    /// keystore path. When disabled, a missing directory aborts startup with
    /// a diagnostic instead of cascading into a TLS initialization failure.
    #[serde(default = "default_create_dir")]
    pub create_keystore_dir_if_missing: bool,
}

fn default_key_alias() -> String {
    "server".to_string()
}

fn default_create_dir() -> bool {
    true
}

impl Default for KeystoreConfig {
    fn default() -> Self {
        Self {
            location: String::new(),
            password: String::new(),
            key_alias: default_key_alias(),
            store_type: KeystoreType::Pkcs12,
            create_keystore_dir_if_missing: default_create_dir(),
        }
    }
}

impl KeystoreConfig {
    /// Load settings from a TOML file and run [`Self::validate_and_expand`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: KeystoreConfig = toml::from_str(&content)?;
        config.validate_and_expand()?;
        Ok(config)
    }

    /// Validate the configuration and expand environment variables.
    ///
    /// This should be called after deserializing to:
    /// 1. Expand `${VAR}` patterns in the location and password fields
    /// 2. Validate that a keystore location is present
    pub fn validate_and_expand(&mut self) -> Result<(), ConfigError> {
        self.location = expand_env_vars(&self.location)?;
        self.password = expand_env_vars(&self.password)?;

        if self.location.is_empty() {
            return Err(ConfigError::MissingField("location".to_string()));
        }

        Ok(())
    }

    /// The parsed keystore location.
    pub fn location(&self) -> KeystoreLocation {
        KeystoreLocation::parse(&self.location)
    }
}
