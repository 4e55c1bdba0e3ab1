//! Preferences backed by a real file store.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;
use weatherdash_store::{DarkMode, FileStore, KeyValueStore, RecentSearches, DARK_MODE_KEY};

#[test]
fn test_preferences_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));
        let mut recent = RecentSearches::load(store.clone(), 5);
        recent.record("Lisbon").unwrap();
        recent.record("Porto").unwrap();

        let mut dark = DarkMode::load(store, false);
        dark.set(true).unwrap();
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));
    let recent = RecentSearches::load(store.clone(), 5);
    let dark = DarkMode::load(store, false);

    assert_eq!(recent.most_recent(), Some("Porto"));
    assert_eq!(recent.entries(), ["Porto", "Lisbon"]);
    assert!(dark.enabled());
}

#[test]
fn test_corrupt_file_uses_fallbacks() {
    let dir = tempfile::tempdir().unwrap();
    let file_store = FileStore::new(dir.path());
    std::fs::write(file_store.path(), "definitely not json").unwrap();

    let store: Arc<dyn KeyValueStore> = Arc::new(file_store);
    assert!(RecentSearches::load(store.clone(), 5).is_empty());
    assert!(DarkMode::load(store.clone(), true).enabled());

    // The next write recovers the file
    let mut dark = DarkMode::load(store.clone(), true);
    dark.toggle().unwrap();
    assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
}

#[test]
fn test_history_size_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));

    let mut recent = RecentSearches::load(store.clone(), 2);
    for city in ["Kyiv", "Lviv", "Odesa"] {
        recent.record(city).unwrap();
    }
    assert_eq!(recent.entries(), ["Odesa", "Lviv"]);

    // A smaller limit on reload trims the stored list
    assert_eq!(RecentSearches::load(store, 1).entries(), ["Odesa"]);
}
