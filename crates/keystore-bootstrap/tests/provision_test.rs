//! End-to-end tests for the keystore startup gate
//!
//! These exercise the path a server takes at boot: load keystore settings
//! from TOML, expand environment references, then provision the keystore
//! before the TLS listener would bind.

use keystore_bootstrap::{provision, KeystoreConfig, Provisioned, ProvisioningError};
use std::path::Path;
use tempfile::TempDir;

fn load_config(dir: &Path, contents: &str) -> KeystoreConfig {
    let config_path = dir.join("keystore.toml");
    std::fs::write(&config_path, contents).unwrap();
    KeystoreConfig::from_file(&config_path).unwrap()
}

#[test]
fn boot_with_auto_create_provisions_nested_directories() {
    let temp_dir = TempDir::new().unwrap();
    let keystore = temp_dir.path().join("tls/nested/keystore.p12");

    let config = load_config(
        temp_dir.path(),
        &format!(
            r#"
            location = "file:{}"
            password = "changeit"
            key_alias = "alias"
            store_type = "PKCS12"
            create_keystore_dir_if_missing = true
            "#,
            keystore.display()
        ),
    );

    let result = provision(&config).unwrap();
    assert_eq!(
        result,
        Provisioned::Ready {
            created_dirs: true,
            created_store: true,
        }
    );
    assert!(temp_dir.path().join("tls/nested").is_dir());
    assert!(keystore.is_file());

    // A restart with identical settings changes nothing
    let again = provision(&config).unwrap();
    assert_eq!(
        again,
        Provisioned::Ready {
            created_dirs: false,
            created_store: false,
        }
    );
}

#[test]
fn boot_without_auto_create_aborts_with_diagnostic() {
    let temp_dir = TempDir::new().unwrap();
    let keystore = temp_dir.path().join("tls/nested-no-create/keystore.p12");

    let config = load_config(
        temp_dir.path(),
        &format!(
            r#"
            location = "file:{}"
            password = "changeit"
            key_alias = "alias"
            store_type = "PKCS12"
            create_keystore_dir_if_missing = false
            "#,
            keystore.display()
        ),
    );

    let err = provision(&config).unwrap_err();
    assert!(matches!(
        err,
        ProvisioningError::ParentDirectoryMissing { .. }
    ));
    assert!(err
        .to_string()
        .contains("Keystore parent directory does not exist"));
    assert!(err.to_string().contains("nested-no-create"));

    // Startup aborted before any filesystem mutation
    assert!(!temp_dir.path().join("tls/nested-no-create").exists());
    assert!(!keystore.exists());
}

#[test]
fn password_comes_from_the_environment() {
    let temp_dir = TempDir::new().unwrap();
    let keystore = temp_dir.path().join("keystore.p12");

    std::env::set_var("KSB_E2E_PASSWORD", "s3cret");
    let config = load_config(
        temp_dir.path(),
        &format!(
            r#"
            location = "file:{}"
            password = "${{KSB_E2E_PASSWORD}}"
            "#,
            keystore.display()
        ),
    );
    std::env::remove_var("KSB_E2E_PASSWORD");

    assert_eq!(config.password, "s3cret");
    provision(&config).unwrap();
    assert!(keystore.is_file());
}

#[test]
fn placeholder_keystore_is_a_parseable_pfx() {
    let temp_dir = TempDir::new().unwrap();
    let keystore = temp_dir.path().join("keystore.p12");

    let config = load_config(
        temp_dir.path(),
        &format!(
            r#"
            location = "file:{}"
            password = "changeit"
            "#,
            keystore.display()
        ),
    );
    provision(&config).unwrap();

    let bytes = std::fs::read(&keystore).unwrap();
    // DER SEQUENCE header followed by PFX version 3
    assert_eq!(bytes[0], 0x30);
    assert_eq!(bytes[1] as usize, bytes.len() - 2);
    assert_eq!(&bytes[2..5], &[0x02, 0x01, 0x03]);
}
