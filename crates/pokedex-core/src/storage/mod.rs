//! Durable key/value persistence.
//!
//! The team and the theme preference are plain string entries behind the
//! `KeyValueStore` port. `FileStore` keeps them under the platform data
//! directory; `MemoryStore` is for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

pub mod file;

pub use file::FileStore;

pub trait KeyValueStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// Load and deserialize an entry. Missing, unreadable or malformed entries
/// all come back as `None`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match store.load(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Ignoring malformed stored entry");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored entry");
            None
        }
    }
}

pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.save(key, &raw)
}

/// In-process store; contents vanish with the process.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_json_malformed_is_none() {
        let store = MemoryStore::new().with_entry("pokemon_team", "[{\"id\": ");
        let loaded: Option<Vec<u32>> = load_json(&store, "pokemon_team");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load_json() {
        let store = MemoryStore::new();
        save_json(&store, "numbers", &[1u32, 2, 3]).unwrap();
        let loaded: Option<Vec<u32>> = load_json(&store, "numbers");
        assert_eq!(loaded, Some(vec![1, 2, 3]));
        assert_eq!(store.load("numbers").unwrap().as_deref(), Some("[1,2,3]"));
    }
}
