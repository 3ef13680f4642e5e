//! JSON-file key/value store for answers remembered between runs.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::{Map, Value};
use tracing::debug;

use goodboy_core::{
    application::{ApplicationError, ports::PreferencesStore},
    error::{GoodboyError, GoodboyResult},
};

/// A flat JSON object persisted at a fixed path.
///
/// A missing file reads as empty. Writes rewrite the whole file.
#[derive(Debug)]
pub struct JsonPreferencesStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonPreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> GoodboyResult<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(self.error(e)),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw).map_err(|e| self.error(e))? {
            Value::Object(map) => Ok(map),
            _ => Err(self.error("top-level value is not an object")),
        }
    }

    fn save(&self, map: Map<String, Value>) -> GoodboyResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.error(e))?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(map)).map_err(|e| self.error(e))?;
        fs::write(&self.path, json).map_err(|e| self.error(e))
    }

    fn error(&self, e: impl std::fmt::Display) -> GoodboyError {
        ApplicationError::Preferences {
            reason: format!("{}: {e}", self.path.display()),
        }
        .into()
    }
}

impl PreferencesStore for JsonPreferencesStore {
    fn get(&self, key: &str) -> GoodboyResult<Option<Value>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> GoodboyResult<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| self.error("preferences lock poisoned"))?;
        let mut map = self.load()?;
        map.insert(key.to_string(), value);
        self.save(map)?;
        debug!(path = %self.path.display(), key, "Preferences saved");
        Ok(())
    }
}
