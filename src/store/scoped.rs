use std::sync::Arc;

use super::{KeyValueStore, Modify, StoreError};

/// A view of a shared store where every key is prefixed with a buyer
/// namespace, so buyers never see each other's entries.
#[derive(Clone)]
pub struct ScopedStore {
    inner: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl ScopedStore {
    pub fn new(inner: Arc<dyn KeyValueStore>, namespace: &str) -> Self {
        Self {
            inner,
            prefix: format!("{namespace}:"),
        }
    }

    fn key(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }
}

impl KeyValueStore for ScopedStore {
    fn read(&self, key: &str) -> Option<String> {
        self.inner.read(&self.key(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.write(&self.key(key), value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(&self.key(key))
    }

    fn modify(&self, key: &str, f: &mut Modify<'_>) -> Result<(), StoreError> {
        self.inner.modify(&self.key(key), f)
    }
}
