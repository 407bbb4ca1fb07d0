use std::{collections::HashMap, sync::RwLock};

use super::{KeyValueStore, Modify, StoreError};

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn modify(&self, key: &str, f: &mut Modify<'_>) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        let next = f(entries.get(key).map(String::as_str));
        if let Some(next) = next {
            entries.insert(key.to_string(), next);
        }
        Ok(())
    }
}
