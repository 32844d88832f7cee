//! Startup-time keystore provisioning
//!
//! A server configured for TLS needs its keystore file present before the
//! listener binds. This module decides whether to materialize the missing
//! pieces (parent directory, placeholder store) or to abort startup with a
//! diagnostic the operator can act on.
//!
//! # Atomic Writes
//!
//! The placeholder keystore is written atomically:
//! 1. Write to a temporary file with `.tmp` suffix
//! 2. Sync to disk with fsync
//! 3. Rename to the final path (atomic on POSIX systems)
//!
//! An existing keystore file is never overwritten; the whole operation is
//! idempotent and a second call is a no-op.

use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{KeystoreConfig, KeystoreType};
use crate::location::KeystoreLocation;

/// Errors that can occur during keystore provisioning
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// The parent directory is absent and auto-create is disabled.
    ///
    /// This is a configuration error, not a transient one: startup stops
    /// here with a path-specific message rather than failing later inside
    /// TLS initialization.
    #[error("Keystore parent directory does not exist: {path} (set create_keystore_dir_if_missing = true or create the directory before starting)")]
    ParentDirectoryMissing { path: String },

    /// No placeholder container can be produced for the configured type.
    #[error("cannot create a placeholder keystore of type {store_type} at {path}")]
    UnsupportedType { store_type: String, path: String },

    /// Filesystem-level failure (permissions, disk full). Not retried;
    /// provisioning is a one-shot startup gate.
    #[error("keystore provisioning failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a provisioning run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    /// `file:` location checked; the parent directory and keystore file now
    /// exist. The flags record what this call actually created.
    Ready {
        created_dirs: bool,
        created_store: bool,
    },
    /// Non-filesystem location, passed through untouched.
    Skipped,
}

/// Ensure the keystore file and its parent directory exist.
///
/// Behavior for `file:` locations:
/// 1. If the parent directory is missing, create it (and any missing
///    ancestors) when `auto_create` is set, otherwise fail with
///    [`ProvisioningError::ParentDirectoryMissing`] without touching the
///    filesystem.
/// 2. If no file exists at the keystore path, atomically write a minimal
///    valid empty container of `store_type`. An existing file is left
///    untouched.
///
/// Non-`file:` locations are outside this function's reach and return
/// [`Provisioned::Skipped`].
///
/// The call is idempotent and safe against concurrent directory creation:
/// `create_dir_all` treats already-existing directories as success.
pub fn ensure_keystore_exists(
    location: &KeystoreLocation,
    auto_create: bool,
    store_type: KeystoreType,
) -> Result<Provisioned, ProvisioningError> {
    let Some(path) = location.as_path() else {
        debug!(location = %location, "Keystore location is not a file path, skipping provisioning");
        return Ok(Provisioned::Skipped);
    };

    let mut created_dirs = false;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            if !auto_create {
                return Err(ProvisioningError::ParentDirectoryMissing {
                    path: parent.display().to_string(),
                });
            }
            std::fs::create_dir_all(parent).map_err(|e| ProvisioningError::Io {
                path: parent.display().to_string(),
                source: e,
            })?;
            debug!(path = %parent.display(), "Created keystore parent directory");
            created_dirs = true;
        }
    }

    let mut created_store = false;
    if !path.exists() {
        let bytes =
            store_type
                .placeholder_bytes()
                .ok_or_else(|| ProvisioningError::UnsupportedType {
                    store_type: store_type.to_string(),
                    path: path.display().to_string(),
                })?;
        write_file_atomic(path, bytes)?;
        debug!(path = %path.display(), %store_type, "Created empty keystore");
        created_store = true;
    }

    info!(
        path = %path.display(),
        created_dirs,
        created_store,
        "Keystore ready"
    );

    Ok(Provisioned::Ready {
        created_dirs,
        created_store,
    })
}

/// Ensure the keystore exists (async wrapper)
///
/// Runs the blocking filesystem work of [`ensure_keystore_exists`] on the
/// Tokio blocking pool, for servers that bootstrap inside an async runtime.
pub async fn ensure_keystore_exists_async(
    location: KeystoreLocation,
    auto_create: bool,
    store_type: KeystoreType,
) -> Result<Provisioned, ProvisioningError> {
    let shown = location.to_string();
    tokio::task::spawn_blocking(move || ensure_keystore_exists(&location, auto_create, store_type))
        .await
        .map_err(|e| ProvisioningError::Io {
            path: shown,
            source: std::io::Error::other(e.to_string()),
        })?
}

/// Provision from a full [`KeystoreConfig`], the usual entry point from
/// server bootstrap code.
pub fn provision(config: &KeystoreConfig) -> Result<Provisioned, ProvisioningError> {
    ensure_keystore_exists(
        &config.location(),
        config.create_keystore_dir_if_missing,
        config.store_type,
    )
}

/// Write a file atomically with owner-only permissions.
///
/// The keystore will eventually hold private key material, so the file is
/// created 0600 on Unix before the rename makes it visible.
fn write_file_atomic(target: &Path, content: &[u8]) -> Result<(), ProvisioningError> {
    let io_err = |e: std::io::Error| ProvisioningError::Io {
        path: target.display().to_string(),
        source: e,
    };

    let temp_path = target.with_extension("tmp");

    let mut file = std::fs::File::create(&temp_path).map_err(io_err)?;
    file.write_all(content).map_err(io_err)?;
    file.sync_all().map_err(io_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
            .map_err(io_err)?;
    }

    std::fs::rename(&temp_path, target).map_err(io_err)?;

    Ok(())
}
