//! Tests for the startup-time support pieces: logging initialisation and
//! the first discovery scan.

use modshell::core::logging::init_logging;
use modshell::module::api::{scan_once, DiscoveryConfig, SharedModuleRegistry};
use serial_test::serial;

#[test]
#[serial]
fn logging_initialises_once_per_process() {
    let first = init_logging(Some("debug"), false);
    let second = init_logging(Some("info"), false);
    assert!(first.is_ok());
    // The global logger is already installed; a second init is rejected
    assert!(second.is_err());
}

#[tokio::test]
async fn scan_creates_the_primary_modules_directory() {
    let dir = tempfile::tempdir().unwrap();
    let primary = dir.path().join("modules");
    assert!(!primary.exists());

    let registry = SharedModuleRegistry::new();
    let config = DiscoveryConfig::with_paths(vec![primary.clone()]);
    let registered = scan_once(&config, &registry).await;

    assert_eq!(registered, 0);
    assert!(primary.is_dir());
}
