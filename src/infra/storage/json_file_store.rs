use crate::domain::ports::KeyValueStore;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::error;

/// File-backed variant of the key/value substrate: the whole map is
/// mirrored to one JSON file on every mutation. I/O faults are logged and
/// swallowed, matching the substrate contract — callers never see them.
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, Value>>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    error!("Corrupt storage file {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn flush(&self, entries: &HashMap<String, Value>) {
        match serde_json::to_string(entries) {
            Ok(raw) => {
                if let Err(e) = fs::write(&self.path, raw) {
                    error!("Failed to write storage file {}: {}", self.path.display(), e);
                }
            }
            Err(e) => error!("Failed to serialize storage map: {}", e),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: Value) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value);
        self.flush(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        self.flush(&entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trips_through_a_fresh_handle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");

        let store = JsonFileStore::open(&path);
        store.set("clarityflow-tasks", json!([{"id": "t1"}]));
        store.set("stale", json!(1));
        store.remove("stale");

        let reopened = JsonFileStore::open(&path);
        assert_eq!(
            reopened.get("clarityflow-tasks"),
            Some(json!([{"id": "t1"}]))
        );
        assert_eq!(reopened.get("stale"), None);
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path().join("absent.json"));
        assert_eq!(store.get("anything"), None);
    }
}
