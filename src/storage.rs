//! Key-value persistence contract and its two in-tree implementations.
//!
//! The engine consumes storage through [`KeyValueStore`] only: a `get` over a
//! set of keys and a merge-style `set`. Two namespaces exist side by side —
//! "synced" for small cross-device state and "local" for the larger
//! process-local state — and the engine treats them identically apart from
//! which keys go where.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

pub type KvMap = HashMap<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, keys: &[&str]) -> Result<KvMap, StorageError>;
    fn set(&self, entries: KvMap) -> Result<(), StorageError>;
}

/// Well-known storage keys, grouped by namespace.
pub mod keys {
    // Synced namespace.
    pub const DIRECTION: &str = "direction";
    pub const CORRECT_ACTION: &str = "correctAction";
    pub const CREDITS: &str = "credits";
    pub const STREAK: &str = "streak";

    // Local namespace.
    pub const WORD_PROGRESS: &str = "wordProgress";
    pub const CUSTOM_WORDS: &str = "customWords";
    pub const SESSIONS: &str = "sessions";
}

/// The synced/local namespace pair handed to the engine.
#[derive(Clone)]
pub struct StoragePair {
    pub synced: Arc<dyn KeyValueStore>,
    pub local: Arc<dyn KeyValueStore>,
}

impl StoragePair {
    pub fn in_memory() -> Self {
        Self {
            synced: Arc::new(MemoryStore::default()),
            local: Arc::new(MemoryStore::default()),
        }
    }
}

/// Process-local store; the test and simulation backend.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<KvMap>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, keys: &[&str]) -> Result<KvMap, StorageError> {
        let data = self.data.lock();
        Ok(keys
            .iter()
            .filter_map(|k| data.get(*k).map(|v| ((*k).to_string(), v.clone())))
            .collect())
    }

    fn set(&self, entries: KvMap) -> Result<(), StorageError> {
        self.data.lock().extend(entries);
        Ok(())
    }
}

/// One JSON object per namespace file. Writes rewrite the whole file; the
/// mutex only serializes access within this process (cross-process races are
/// an accepted limitation).
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `<data dir>/instalearn/<name>.json`, falling back to the working
    /// directory when no platform data dir is known.
    pub fn in_data_dir(name: &str) -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("instalearn").join(format!("{name}.json")))
    }

    fn read_all(&self) -> Result<KvMap, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(KvMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, data: &KvMap) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec(data)?)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, keys: &[&str]) -> Result<KvMap, StorageError> {
        let _guard = self.lock.lock();
        let data = self.read_all()?;
        Ok(keys
            .iter()
            .filter_map(|k| data.get(*k).map(|v| ((*k).to_string(), v.clone())))
            .collect())
    }

    fn set(&self, entries: KvMap) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let mut data = self.read_all()?;
        data.extend(entries);
        self.write_all(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_store_merges_on_set() {
        let store = MemoryStore::default();
        store
            .set(KvMap::from([("credits".to_string(), json!(3))]))
            .unwrap();
        store
            .set(KvMap::from([("streak".to_string(), json!(2))]))
            .unwrap();

        let out = store.get(&["credits", "streak", "missing"]).unwrap();
        assert_eq!(out.get("credits"), Some(&json!(3)));
        assert_eq!(out.get("streak"), Some(&json!(2)));
        assert!(!out.contains_key("missing"));
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("local.json"));
        store
            .set(KvMap::from([(
                "wordProgress".to_string(),
                json!({"w1": {"level": 2, "correct": 1}}),
            )]))
            .unwrap();

        let reopened = JsonFileStore::new(dir.path().join("local.json"));
        let out = reopened.get(&["wordProgress"]).unwrap();
        assert_eq!(
            out["wordProgress"]["w1"]["level"],
            json!(2),
            "values must survive a store re-open"
        );
    }

    #[test]
    fn file_store_treats_missing_file_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("never-written.json"));
        assert!(store.get(&["credits"]).unwrap().is_empty());
    }
}
