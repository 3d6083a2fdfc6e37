use anyhow::{Context, Result};
use fd_lock::RwLock;
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

pub const SETTINGS_KEY: &str = "timer_settings";
pub const STATISTICS_KEY: &str = "timer_statistics";
pub const LOCK_FILE: &str = "pomoflow.lock";

/// Key-value persistence boundary. Each key holds one JSON document.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Result<Option<Value>>;
    fn save(&mut self, key: &str, value: &Value) -> Result<()>;
}

/// Parses one field of a stored document, logging and dropping it if it has
/// the wrong shape.
pub(crate) fn stored_field<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<T> {
    let raw = map.get(key)?;
    match serde_json::from_value(raw.clone()) {
        Ok(v) => Some(v),
        Err(err) => {
            warn!("dropping stored field {key}: {err}");
            None
        }
    }
}

/// Resolves the data directory: `$POMOFLOW_HOME`, or `~/.pomoflow`.
pub fn get_base_dir() -> Result<PathBuf> {
    let path = match std::env::var_os("POMOFLOW_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let mut path = dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
            path.push(".pomoflow");
            path
        }
    };
    if !path.exists() {
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(path)
}

/// Opens the lock guarding the data directory. Whoever holds its write lock
/// is the only process allowed to write statistics.
pub fn open_lock(dir: &Path) -> Result<RwLock<File>> {
    let path = dir.join(LOCK_FILE);
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(RwLock::new(file))
}

/// Stores every key as `<dir>/<key>.json`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn from_dir(dir: PathBuf) -> Self {
        if !dir.exists() {
            let _ = fs::create_dir_all(&dir);
        }
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(value))
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<()> {
        let path = self.path_for(key);
        let data = serde_json::to_string_pretty(value)?;
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, &data)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}

/// In-process store, used when nothing needs to outlive the process.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: Value) -> Self {
        self.entries.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<()> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }
}
