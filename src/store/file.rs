use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use super::{KeyValueStore, Modify, StoreError};

/// Durable store kept as a single JSON object on disk.
///
/// The whole document is rewritten on every write, through a temporary file
/// renamed over the original.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the document at `path`. A missing file starts empty; an
    /// unreadable document is an error rather than silently discarded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "file store opened");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Applies `next` to `key` and flushes. The in-memory map only keeps the
    /// change once it is on disk.
    fn commit(
        &self,
        entries: &mut BTreeMap<String, String>,
        key: &str,
        next: Option<String>,
    ) -> Result<(), StoreError> {
        let previous = match next {
            Some(value) => entries.insert(key.to_string(), value),
            None => match entries.remove(key) {
                Some(previous) => Some(previous),
                None => return Ok(()),
            },
        };
        if let Err(err) = self.flush(entries) {
            match previous {
                Some(previous) => entries.insert(key.to_string(), previous),
                None => entries.remove(key),
            };
            tracing::warn!(error = %err, path = %self.path.display(), "file store flush failed");
            return Err(err);
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        self.commit(&mut entries, key, Some(value.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        self.commit(&mut entries, key, None)
    }

    fn modify(&self, key: &str, f: &mut Modify<'_>) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        let next = f(entries.get(key).map(String::as_str));
        match next {
            Some(next) => self.commit(&mut entries, key, Some(next)),
            None => Ok(()),
        }
    }
}
