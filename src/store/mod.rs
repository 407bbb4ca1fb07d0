//! Synchronous key-value storage behind the cart, wishlist and profile.
//!
//! The contract mirrors browser local storage: string keys, string values,
//! no transactions across keys, no expiry.

mod file;
mod memory;
mod scoped;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use scoped::ScopedStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store document is not valid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,

    #[error("store skipped the update")]
    Skipped,
}

/// Produces the next value from the current one; `None` leaves the key as is.
pub type Modify<'a> = dyn FnMut(Option<&str>) -> Option<String> + 'a;

pub trait KeyValueStore: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Read-modify-write of one key, atomic with respect to every other call
    /// on the same store. `f` runs exactly once, under the store's lock.
    fn modify(&self, key: &str, f: &mut Modify<'_>) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn modify(&self, key: &str, f: &mut Modify<'_>) -> Result<(), StoreError> {
        (**self).modify(key, f)
    }
}
