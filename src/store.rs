//! Key-value persistence for the small UI state that survives sessions:
//! the filter triple and the theme. Read once at startup, written
//! synchronously on every change. Single reader/writer.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::state::Filters;
use crate::theme::Theme;

pub const FILTERS_KEY: &str = "bm-map-filters";
pub const THEME_KEY: &str = "bm-map-theme";

pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One file per key under the map's `state/` directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating state dir {}", self.dir.display()))?;
        let path = self.dir.join(key);
        fs::write(&path, value).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

/// In-memory store for `view --demo` (nothing written to disk) and tests.
#[derive(Debug, Default, Clone)]
pub struct MemStore {
    entries: Vec<(String, String)>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((key.to_string(), value.to_string()));
        }
        Ok(())
    }
}

/// Load the persisted filter triple. Absent key means defaults; malformed
/// JSON is swallowed with a diagnostic and falls back to defaults. This is
/// the crate's only error-recovery path.
pub fn load_filters(store: &dyn KvStore) -> Filters {
    let Some(raw) = store.get(FILTERS_KEY) else {
        return Filters::default();
    };
    match serde_json::from_str(&raw) {
        Ok(filters) => filters,
        Err(err) => {
            log::warn!("could not load saved filters: {err}");
            Filters::default()
        }
    }
}

pub fn save_filters(store: &mut dyn KvStore, filters: &Filters) -> Result<()> {
    let json = serde_json::to_string(filters).context("serializing filters")?;
    store.set(FILTERS_KEY, &json)
}

pub fn load_theme(store: &dyn KvStore) -> Theme {
    store
        .get(THEME_KEY)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or_default()
}

pub fn save_theme(store: &mut dyn KvStore, theme: Theme) -> Result<()> {
    store.set(THEME_KEY, theme.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("state"));
        assert_eq!(store.get("k"), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.set("k", "w").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("w"));
    }

    #[test]
    fn filters_round_trip() {
        let mut store = MemStore::new();
        let filters = Filters {
            active: true,
            core: false,
            external: true,
        };
        save_filters(&mut store, &filters).unwrap();
        assert_eq!(load_filters(&store), filters);
    }

    #[test]
    fn filters_round_trip_through_files() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("state"));
        let filters = Filters {
            active: true,
            core: false,
            external: true,
        };
        save_filters(&mut store, &filters).unwrap();
        // A fresh store over the same directory sees the same values.
        let reopened = FileStore::new(dir.path().join("state"));
        assert_eq!(load_filters(&reopened), filters);
    }

    #[test]
    fn absent_filters_fall_back_to_defaults() {
        assert_eq!(load_filters(&MemStore::new()), Filters::default());
    }

    #[test]
    fn malformed_filters_fall_back_to_defaults() {
        let mut store = MemStore::new();
        store.set(FILTERS_KEY, "{not json").unwrap();
        assert_eq!(load_filters(&store), Filters::default());
    }

    #[test]
    fn theme_round_trips_as_plain_string() {
        let mut store = MemStore::new();
        save_theme(&mut store, Theme::Dark).unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(load_theme(&store), Theme::Dark);
    }

    #[test]
    fn unknown_theme_string_falls_back_to_default() {
        let mut store = MemStore::new();
        store.set(THEME_KEY, "solarized").unwrap();
        assert_eq!(load_theme(&store), Theme::Light);
    }
}
