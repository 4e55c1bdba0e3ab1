//! Recent-search history and dark-mode preference.

use std::sync::Arc;
use weatherdash_core::StoreError;

use crate::kv::KeyValueStore;

/// Key holding the JSON array of recent cities, newest first
pub const RECENT_SEARCHES_KEY: &str = "weather:recentSearches";

/// Key holding `"true"` / `"false"`
pub const DARK_MODE_KEY: &str = "weather:darkMode";

/// Most-recent-first list of searched cities.
///
/// Cities are compared case-insensitively; recording a city again moves it
/// to the front instead of duplicating it.
pub struct RecentSearches {
    store: Arc<dyn KeyValueStore>,
    max_entries: usize,
    entries: Vec<String>,
}

impl RecentSearches {
    /// Load the history, falling back to an empty list when nothing is
    /// stored or the stored value can't be read.
    pub fn load(store: Arc<dyn KeyValueStore>, max_entries: usize) -> Self {
        let entries = match store.get(RECENT_SEARCHES_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<String>>(&json) {
                Ok(mut entries) => {
                    entries.truncate(max_entries);
                    entries
                }
                Err(e) => {
                    tracing::warn!("Ignoring unreadable recent searches: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read recent searches: {}", e);
                Vec::new()
            }
        };

        Self {
            store,
            max_entries,
            entries,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last city searched, used to restore the previous session.
    pub fn most_recent(&self) -> Option<&str> {
        self.entries.first().map(String::as_str)
    }

    /// Move `city` to the front of the history and persist it.
    ///
    /// The in-memory history is updated even if persisting fails.
    pub fn record(&mut self, city: &str) -> Result<(), StoreError> {
        let city = city.trim();
        if city.is_empty() {
            return Ok(());
        }

        let lowered = city.to_lowercase();
        self.entries.retain(|c| c.to_lowercase() != lowered);
        self.entries.insert(0, city.to_string());
        self.entries.truncate(self.max_entries);

        let json = serde_json::to_string(&self.entries)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(RECENT_SEARCHES_KEY, &json)
    }
}

/// Dark-mode preference.
pub struct DarkMode {
    store: Arc<dyn KeyValueStore>,
    enabled: bool,
}

impl DarkMode {
    /// Load the stored preference, or use `fallback` when none is stored or
    /// the stored value can't be read.
    pub fn load(store: Arc<dyn KeyValueStore>, fallback: bool) -> Self {
        let enabled = match store.get(DARK_MODE_KEY) {
            Ok(Some(value)) => match value.trim() {
                "true" => true,
                "false" => false,
                other => {
                    tracing::warn!("Ignoring unreadable dark mode value {:?}", other);
                    fallback
                }
            },
            Ok(None) => fallback,
            Err(e) => {
                tracing::warn!("Failed to read dark mode preference: {}", e);
                fallback
            }
        };

        Self { store, enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set(&mut self, enabled: bool) -> Result<(), StoreError> {
        self.enabled = enabled;
        self.store.set(DARK_MODE_KEY, if enabled { "true" } else { "false" })
    }

    /// Flip the preference, returning the new value.
    pub fn toggle(&mut self) -> Result<bool, StoreError> {
        self.set(!self.enabled)?;
        Ok(self.enabled)
    }
}
