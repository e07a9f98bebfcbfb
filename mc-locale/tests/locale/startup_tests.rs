//! Tests for background startup

use std::sync::Arc;

use mc_locale::LocaleManager;
use tempfile::TempDir;

use super::fixtures::{config, Upstream, CLIENT_URL, MANIFEST_URL};

#[tokio::test(flavor = "multi_thread")]
async fn test_start_resolves_then_loads_default_locale() {
    let temp = TempDir::new().unwrap();
    let source = Upstream::new().publish();
    let manager = Arc::new(LocaleManager::new(config(&temp), source.clone()).unwrap());
    manager.init();

    // Lookups are safe before resolution completes
    assert_eq!(manager.translate("menu.quit", "en_us"), "menu.quit");

    manager.start().await.unwrap();

    assert!(manager.is_resolved());
    assert_eq!(source.hits(CLIENT_URL), 1);
    assert_eq!(manager.translate("menu.quit", "de_de"), "Quit Game");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_start_survives_unreachable_upstream() {
    let temp = TempDir::new().unwrap();
    let source = Upstream::new().publish();
    source.remove(MANIFEST_URL);
    let manager = Arc::new(LocaleManager::new(config(&temp), source.clone()).unwrap());

    manager.start().await.unwrap();

    assert!(manager.is_resolved());
    assert!(manager.loaded_locales().is_empty());
    assert_eq!(manager.translate("menu.quit", "en_us"), "menu.quit");
}
