//! Tests for LocaleCache
//!
//! Scenarios:
//! - Directory layout under the storage path
//! - Missing vs malformed language files
//! - Hash marker round trip

use std::fs;

use mc_locale::locale::{compute_sha1, CacheError};
use mc_locale::LocaleCache;
use tempfile::TempDir;

#[test]
fn test_cache_new_creates_locales_directory() {
    let temp = TempDir::new().unwrap();
    let cache = LocaleCache::new(temp.path()).unwrap();

    assert!(temp.path().join("locales").is_dir());
    assert_eq!(cache.locale_path("de_de"), temp.path().join("locales/de_de.json"));
    assert_eq!(cache.marker_path(), temp.path().join("locales/en_us.hash"));
}

#[test]
fn test_read_missing_locale_is_none() {
    let temp = TempDir::new().unwrap();
    let cache = LocaleCache::new(temp.path()).unwrap();

    assert!(cache.read_locale("de_de").unwrap().is_none());
    assert!(!cache.has_locale("de_de"));
}

#[test]
fn test_read_malformed_locale_is_error() {
    let temp = TempDir::new().unwrap();
    let cache = LocaleCache::new(temp.path()).unwrap();
    fs::write(cache.locale_path("de_de"), "{\"a\": ").unwrap();

    assert!(matches!(cache.read_locale("de_de"), Err(CacheError::Json(_))));
}

#[test]
fn test_save_and_read_locale() {
    let temp = TempDir::new().unwrap();
    let cache = LocaleCache::new(temp.path()).unwrap();
    let data = br#"{"a.b": "Hello"}"#;

    cache.save_locale("fr_fr", data).unwrap();

    let strings = cache.read_locale("fr_fr").unwrap().unwrap();
    assert_eq!(strings["a.b"], "Hello");
    assert_eq!(cache.locale_sha1("fr_fr").unwrap(), compute_sha1(data));
}

#[test]
fn test_marker_round_trip() {
    let temp = TempDir::new().unwrap();
    let cache = LocaleCache::new(temp.path()).unwrap();

    cache.write_marker("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap();

    assert_eq!(
        cache.read_marker().as_deref(),
        Some("da39a3ee5e6b4b0d3255bfef95601890afd80709")
    );
}
