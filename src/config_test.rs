#![allow(clippy::float_cmp)]

use super::*;

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: u64 = env_parse("__VORTEX_TEST_NONEXISTENT_KEY__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__VORTEX_TEST_EP_VALID__", " 99 ") };
    let val: u64 = env_parse("__VORTEX_TEST_EP_VALID__", 0);
    assert_eq!(val, 99);
    unsafe { std::env::remove_var("__VORTEX_TEST_EP_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__VORTEX_TEST_EP_INVALID__", "notanumber") };
    let val: f64 = env_parse("__VORTEX_TEST_EP_INVALID__", 7.5);
    assert_eq!(val, 7.5);
    unsafe { std::env::remove_var("__VORTEX_TEST_EP_INVALID__") };
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn defaults_match_constants() {
    let config = Config::default();
    assert_eq!(config.data_dir, PathBuf::from(".vortex"));
    assert_eq!(config.viewport_debounce_ms, 500);
    assert_eq!(config.click_threshold_px, 5.0);
    assert_eq!(config.storage_quota_bytes, 0);
    assert_eq!(config.locale, Locale::Es);
}

#[test]
fn file_storage_uses_data_dir() {
    let config = Config { data_dir: PathBuf::from("/tmp/vortex-config-test"), ..Config::default() };
    assert_eq!(config.file_storage().dir(), std::path::Path::new("/tmp/vortex-config-test"));
}

#[test]
fn locale_parses_case_insensitively() {
    assert_eq!("EN".parse::<Locale>(), Ok(Locale::En));
    assert_eq!("es".parse::<Locale>(), Ok(Locale::Es));
    assert!("fr".parse::<Locale>().is_err());
}

#[test]
fn memory_storage_applies_quota() {
    use crate::storage::{Storage, StorageError};

    let unlimited = Config::default().memory_storage();
    assert!(unlimited.set_item("vortex-planets", &"x".repeat(10_000)).is_ok());

    let capped = Config { storage_quota_bytes: 32, ..Config::default() }.memory_storage();
    assert!(capped.set_item("k", "small").is_ok());
    assert!(matches!(
        capped.set_item("vortex-planets", &"x".repeat(64)),
        Err(StorageError::QuotaExceeded)
    ));
    assert_eq!(capped.get_item("vortex-planets").unwrap(), None);
}
