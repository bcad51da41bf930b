use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};

use super::host::{Capability, PreferenceStore};

/// Preferences kept as a flat JSON object in a single file.
///
/// A missing file reads as empty. An unreadable or corrupt file makes the
/// store unavailable instead of being overwritten.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Capability<Map<String, Value>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Capability::Available(Map::new()),
            Err(e) => {
                tracing::warn!("failed to read preferences {:?}: {e}", self.path);
                return Capability::Unavailable;
            }
        };
        if raw.trim().is_empty() {
            return Capability::Available(Map::new());
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Capability::Available(map),
            Ok(_) => {
                tracing::warn!("preferences {:?} is not a JSON object", self.path);
                Capability::Unavailable
            }
            Err(e) => {
                tracing::warn!("failed to parse preferences {:?}: {e}", self.path);
                Capability::Unavailable
            }
        }
    }

    fn save(&self, map: &Map<String, Value>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_vec_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body)?;
        std::fs::rename(&tmp, &self.path)
    }
}

impl PreferenceStore for JsonFileStore {
    fn read(&self, key: &str) -> Capability<Option<String>> {
        self.load().map(|map| {
            map.get(key).map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        })
    }

    fn write(&self, key: &str, value: &str) -> Capability<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let Capability::Available(mut map) = self.load() else {
            return Capability::Unavailable;
        };
        map.insert(key.to_string(), Value::String(value.to_string()));
        match self.save(&map) {
            Ok(()) => Capability::Available(()),
            Err(e) => {
                tracing::warn!("failed to write preferences {:?}: {e}", self.path);
                Capability::Unavailable
            }
        }
    }
}
