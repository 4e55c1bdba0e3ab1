//! Local persistence for Weatherdash.
//!
//! A small string key-value store injected into the preferences that need it
//! (recent searches, dark mode), with defined fallbacks when a value is
//! missing or unreadable.

pub mod kv;
pub mod preferences;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use preferences::{DarkMode, RecentSearches, DARK_MODE_KEY, RECENT_SEARCHES_KEY};
