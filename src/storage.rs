// storage.rs

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Key the command history is persisted under.
pub const HISTORY_KEY: &str = "commandHistory";

/// Durable key-value state backed by a single JSON object file.
///
/// Writes are best-effort: a failed write is logged and swallowed, the
/// in-memory state stays authoritative. Missing or malformed state on read
/// falls back to the default instead of failing.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn get<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return T::default();
        };
        let Ok(root) = serde_json::from_str::<Value>(&raw) else {
            warn!(path = %self.path.display(), "state file is not valid JSON, starting fresh");
            return T::default();
        };
        match root.get(key) {
            Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                warn!(key, error = %e, "malformed state entry, starting fresh");
                T::default()
            }),
            None => T::default(),
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let mut root = fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
            .filter(Value::is_object)
            .unwrap_or_else(|| Value::Object(Default::default()));
        match serde_json::to_value(value) {
            Ok(entry) => root[key] = entry,
            Err(e) => {
                warn!(key, error = %e, "could not serialize state entry");
                return;
            }
        }
        if let Some(dir) = self.path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        if let Err(e) = fs::write(&self.path, root.to_string()) {
            warn!(path = %self.path.display(), error = %e, "could not persist state");
        }
    }
}
