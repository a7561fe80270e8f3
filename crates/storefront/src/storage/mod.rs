//! String-keyed persistent storage.
//!
//! The storefront persists three independent records, each a string value
//! under a fixed key (see [`keys`]). Collections are serialized as whole JSON
//! arrays on every write; reads tolerate absent or malformed values by
//! yielding an empty collection.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys.
pub mod keys {
    /// JSON array of cart items.
    pub const CART: &str = "cart";

    /// JSON array of placed orders.
    pub const ORDERS: &str = "orders";

    /// `"true"` while an admin session is active.
    pub const ADMIN_LOGGED_IN: &str = "adminLoggedIn";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A stored value is present but does not parse.
    #[error("malformed value under {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A string-keyed, string-valued store.
///
/// Mirrors the browser's local storage: values are opaque strings, writes
/// replace the whole value, and there is no cross-writer coordination.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Load a JSON array stored under `key`.
///
/// An absent key yields an empty collection. A value that fails to parse is
/// logged and also yields an empty collection; it is never fatal.
///
/// # Errors
///
/// Returns `StorageError` only if the backend itself cannot be read.
pub fn load_collection<T, S>(store: &S, key: &str) -> Result<Vec<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match read_collection(store, key) {
        Err(StorageError::Malformed { source, .. }) => {
            tracing::warn!(key, error = %source, "Malformed stored collection, treating as empty");
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Load a JSON array stored under `key`, refusing malformed data.
///
/// Use this before rewriting a collection that must not lose records.
///
/// # Errors
///
/// Returns `StorageError::Malformed` if a value is present but does not
/// parse, or `StorageError` if the backend cannot be read.
pub fn read_collection<T, S>(store: &S, key: &str) -> Result<Vec<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };

    serde_json::from_str::<Option<Vec<T>>>(&raw)
        .map(Option::unwrap_or_default)
        .map_err(|source| StorageError::Malformed {
            key: key.to_owned(),
            source,
        })
}

/// Serialize `items` as a JSON array and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError` if serialization or the backend write fails.
pub fn save_collection<T, S>(store: &mut S, key: &str, items: &[T]) -> Result<(), StorageError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(items)?;
    store.set(key, &raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_absent_is_empty() {
        let store = MemoryStore::new();
        let items: Vec<u32> = load_collection(&store, keys::CART).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let mut store = MemoryStore::new();
        store.set(keys::ORDERS, "{not json").unwrap();
        let items: Vec<u32> = load_collection(&store, keys::ORDERS).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_read_malformed_is_refused() {
        let mut store = MemoryStore::new();
        store.set(keys::ORDERS, "{not json").unwrap();
        let err = read_collection::<u32, _>(&store, keys::ORDERS).unwrap_err();
        assert!(matches!(err, StorageError::Malformed { ref key, .. } if key == keys::ORDERS));
    }

    #[test]
    fn test_load_null_is_empty() {
        let mut store = MemoryStore::new();
        store.set(keys::CART, "null").unwrap();
        let items: Vec<u32> = load_collection(&store, keys::CART).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        save_collection(&mut store, keys::CART, &[1_u32, 2, 3]).unwrap();
        assert_eq!(store.get(keys::CART).unwrap().as_deref(), Some("[1,2,3]"));
        let items: Vec<u32> = load_collection(&store, keys::CART).unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }
}
