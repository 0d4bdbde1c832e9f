//! Favorites and search history behind a small key-value store trait.
//!
//! Lives behind [`KvStore`] so the same logic runs against a JSON file in
//! production and a plain map in tests.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

const FAVORITES_KEY: &str = "favorites";
const HISTORY_KEY: &str = "search_history";

/// Most recent searches kept per store.
const HISTORY_CAP: usize = 20;

/// Minimal string key-value storage.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    /// Atomic read-modify-write: implementations hold their entry lock
    /// across `f`, so concurrent updates to the same key never overwrite
    /// each other. `f` receives the current value; returning `Some` stores
    /// the new value, `None` removes the key.
    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> Result<Option<String>>,
    ) -> Result<()>;
}

/// JSON-file-backed [`KvStore`]. Every write persists atomically.
pub struct JsonFileStore {
    entries: RwLock<HashMap<String, String>>,
    persist_path: PathBuf,
}

impl JsonFileStore {
    pub fn open_or_create(persist_path: &Path) -> Result<Self> {
        if let Some(parent) = persist_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let entries = if persist_path.exists() {
            let data =
                std::fs::read_to_string(persist_path).context("Failed to read prefs store")?;
            serde_json::from_str(&data).unwrap_or_default()
        } else {
            HashMap::new()
        };

        Ok(Self {
            entries: RwLock::new(entries),
            persist_path: persist_path.to_path_buf(),
        })
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let data = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.persist_path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &data).context("Failed to write prefs store")?;
        std::fs::rename(&tmp_path, &self.persist_path).context("Failed to replace prefs store")?;
        Ok(())
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries.write();
        entries.insert(key.to_string(), value);
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write();
        entries.remove(key);
        self.persist(&entries)
    }

    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> Result<Option<String>>,
    ) -> Result<()> {
        let mut entries = self.entries.write();
        match f(entries.get(key).cloned())? {
            Some(value) => {
                entries.insert(key.to_string(), value);
            }
            None => {
                entries.remove(key);
            }
        }
        self.persist(&entries)
    }
}

/// One recorded search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub query: String,
    pub searched_at: DateTime<Utc>,
}

/// Favorites and search-history logic over any [`KvStore`].
#[derive(Clone)]
pub struct Preferences {
    kv: Arc<dyn KvStore>,
}

impl Preferences {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub fn favorites(&self) -> Vec<Uuid> {
        self.kv
            .get(FAVORITES_KEY)
            .and_then(|data| serde_json::from_str(&data).ok())
            .unwrap_or_default()
    }

    /// Toggle a recipe id in the favorites set; returns true when the recipe
    /// is a favorite after the call. The toggle runs inside the store's
    /// atomic update so concurrent toggles never drop each other.
    pub fn toggle_favorite(&self, id: Uuid) -> Result<bool> {
        let mut now_favorite = false;
        self.kv.update(FAVORITES_KEY, &mut |current| {
            let mut favorites: Vec<Uuid> = current
                .as_deref()
                .and_then(|data| serde_json::from_str(data).ok())
                .unwrap_or_default();
            now_favorite = if let Some(pos) = favorites.iter().position(|f| *f == id) {
                favorites.remove(pos);
                false
            } else {
                favorites.push(id);
                true
            };
            Ok(Some(serde_json::to_string(&favorites)?))
        })?;
        Ok(now_favorite)
    }

    /// Most recent first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.kv
            .get(HISTORY_KEY)
            .and_then(|data| serde_json::from_str(&data).ok())
            .unwrap_or_default()
    }

    /// Record a search query: deduplicated case-insensitively, newest first,
    /// capped at [`HISTORY_CAP`]. Runs as one atomic update per query.
    pub fn record_search(&self, query: &str) -> Result<()> {
        self.kv.update(HISTORY_KEY, &mut |current| {
            let mut history: Vec<HistoryEntry> = current
                .as_deref()
                .and_then(|data| serde_json::from_str(data).ok())
                .unwrap_or_default();
            let lowered = query.to_lowercase();
            history.retain(|e| e.query.to_lowercase() != lowered);
            history.insert(
                0,
                HistoryEntry {
                    query: query.to_string(),
                    searched_at: Utc::now(),
                },
            );
            history.truncate(HISTORY_CAP);
            Ok(Some(serde_json::to_string(&history)?))
        })
    }

    pub fn clear_history(&self) -> Result<()> {
        self.kv.remove(HISTORY_KEY)
    }
}
