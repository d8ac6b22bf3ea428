//! Durable key-value storage for the high score
//!
//! A synchronous `get`/`set` contract with three backends:
//! - `MemoryStore`: in-process map, used by tests and headless runs
//! - `FileStore` (native): JSON map in the platform data directory
//! - `LocalStorageStore` (wasm32): browser LocalStorage

use std::collections::HashMap;

/// Synchronous scalar key-value store. No operation fails; backends
/// degrade to defaults on IO problems and log instead of erroring.
pub trait ScoreStore {
    /// Read a value, `None` if absent
    fn get(&self, key: &str) -> Option<f64>;
    /// Write a value, flushing to durable storage where the backend has one
    fn set(&mut self, key: &str, value: f64);
}

/// Volatile in-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, f64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), value);
    }
}

/// File-backed store: a single JSON object in the platform data directory
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileStore {
    path: std::path::PathBuf,
    values: HashMap<String, f64>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Open (or create) the store at the default location
    pub fn open() -> Self {
        let dir = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        Self::open_at(dir.join("roll-on").join("scores.json"))
    }

    /// Open (or create) the store at an explicit path
    pub fn open_at(path: std::path::PathBuf) -> Self {
        let values = std::fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self { path, values }
    }

    fn flush(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("score store: cannot create {}: {e}", parent.display());
                return;
            }
        }
        match serde_json::to_string(&self.values) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    log::warn!("score store: cannot write {}: {e}", self.path.display());
                }
            }
            Err(e) => log::warn!("score store: serialize failed: {e}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for FileStore {
    fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), value);
        self.flush();
    }
}

/// Browser LocalStorage-backed store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<f64> {
        let storage = Self::storage()?;
        storage.get_item(key).ok().flatten()?.parse().ok()
    }

    fn set(&mut self, key: &str, value: f64) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, &value.to_string()).is_err() {
                log::warn!("score store: LocalStorage write failed for {key}");
            }
        }
    }
}
