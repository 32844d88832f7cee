//! Startup-time TLS keystore provisioning
//!
//! Before a server binds its TLS listener, the configured keystore file must
//! exist on disk, or TLS initialization fails with an error far removed from
//! the actual misconfiguration. This crate closes that gap: given a keystore
//! location and an auto-create policy, it ensures the parent directory and a
//! minimal placeholder keystore exist, or fails fast with a diagnostic the
//! operator can act on.
//!
//! # Example
//!
//! ```no_run
//! use keystore_bootstrap::{ensure_keystore_exists, KeystoreLocation, KeystoreType};
//!
//! let location = KeystoreLocation::parse("file:/var/lib/myserver/tls/keystore.p12");
//! ensure_keystore_exists(&location, true, KeystoreType::Pkcs12)?;
//! // The TLS listener can now bind against the keystore path.
//! # Ok::<(), keystore_bootstrap::ProvisioningError>(())
//! ```
//!
//! Locations with a non-`file:` scheme are passed through untouched; the
//! provisioning step only owns local filesystem paths.

pub mod config;
pub mod env_expand;
pub mod location;
pub mod pkcs12;
pub mod provision;

pub use config::{ConfigError, KeystoreConfig, KeystoreType};
pub use env_expand::{expand_env_vars, EnvExpandError};
pub use location::KeystoreLocation;
pub use provision::{
    ensure_keystore_exists, ensure_keystore_exists_async, provision, Provisioned,
    ProvisioningError,
};
