//! Key-value storage trait and the collection helpers built on it.

use std::collections::HashMap;
use std::sync::Mutex;

use aquadesk_core::Resource;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on '{key}': {source}")]
    Io {
        key: String,
        source: std::io::Error,
    },

    #[error("stored value for '{key}' is not valid: {message}")]
    Parse { key: String, message: String },

    #[error("storage not available: {0}")]
    NotAvailable(String),
}

/// JSON values addressed by string keys. Only the UI thread touches storage.
pub trait Storage {
    /// `Ok(None)` when nothing is stored under `key`
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Volatile storage, used when no data directory is available and in tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Value>>, StorageError> {
        self.slots
            .lock()
            .map_err(|_| StorageError::NotAvailable("memory storage lock poisoned".to_string()))
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.slots()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        self.slots()?.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots()?.remove(key);
        Ok(())
    }
}

/// Read a collection from its slot, seeding the slot on first use.
///
/// A slot that exists but does not hold an array of `R` is an error; it is
/// never silently replaced by the seed.
pub fn load_collection<R: Resource>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Vec<R>, StorageError> {
    match storage.get(key)? {
        Some(value) => serde_json::from_value(value).map_err(|e| StorageError::Parse {
            key: key.to_string(),
            message: e.to_string(),
        }),
        None => {
            let seed = R::local_seed();
            tracing::info!(key, count = seed.len(), "Seeding empty local collection");
            save_collection(storage, key, &seed)?;
            Ok(seed)
        }
    }
}

pub fn save_collection<R: Resource>(
    storage: &dyn Storage,
    key: &str,
    items: &[R],
) -> Result<(), StorageError> {
    let value = serde_json::to_value(items).map_err(|e| StorageError::Parse {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    storage.set(key, &value)
}
