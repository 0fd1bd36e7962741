//! mockwise-store — `StateStore` implementations.
//!
//! `JsonFileStore` keeps every key in a single JSON object file and rewrites
//! the file on each mutation; `MemoryStore` is the in-process equivalent for
//! tests and ephemeral runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use mockwise_core::error::StoreError;
use mockwise_core::traits::StateStore;

/// File-backed store: one JSON object, keys as members, values as strings.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store, loading the file when it exists. An unreadable or
    /// malformed file starts the store empty rather than failing the caller.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    tracing::warn!(path = %path.display(), "state file is not a JSON object, starting empty");
                    Map::new()
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "unreadable state file, starting empty: {e}");
                    Map::new()
                }
            },
            Err(_) => Map::new(),
        };

        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&Value::Object(self.entries.clone()))
            .map_err(|e| StoreError(format!("failed to serialize state: {e}")))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError(format!(
                        "failed to create {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }
        std::fs::write(&self.path, json)
            .map_err(|e| StoreError(format!("failed to write {}: {e}", self.path.display())))
    }
}

impl StateStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .entries
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .insert(key.to_string(), Value::String(value.to_string()));
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("interview_state", "{}").unwrap();
        assert_eq!(store.get("interview_state").unwrap().as_deref(), Some("{}"));

        store.remove("interview_state").unwrap();
        assert_eq!(store.get("interview_state").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        {
            let mut store = JsonFileStore::open(&path);
            store.set("interview_state", r#"{"sessionId":"abc"}"#).unwrap();
            store.set("draft_0", "half an answer").unwrap();
        }

        let store = JsonFileStore::open(&path);
        assert_eq!(
            store.get("interview_state").unwrap().as_deref(),
            Some(r#"{"sessionId":"abc"}"#)
        );
        assert_eq!(
            store.get("draft_0").unwrap().as_deref(),
            Some("half an answer")
        );
    }

    #[test]
    fn file_store_remove_rewrites_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = JsonFileStore::open(&path);
        store.set("draft_0", "scratch").unwrap();
        store.remove("draft_0").unwrap();
        drop(store);

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("draft_0").unwrap(), None);
    }

    #[test]
    fn removing_a_missing_key_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = JsonFileStore::open(&path);
        store.remove("never_set").unwrap();
        // Nothing was written.
        assert!(!path.exists());
    }

    #[test]
    fn malformed_state_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("interview_state").unwrap(), None);
    }

    #[test]
    fn creates_parent_directories_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("state.json");

        let mut store = JsonFileStore::open(&path);
        store.set("interview_state", "{}").unwrap();
        assert!(path.exists());
    }
}
