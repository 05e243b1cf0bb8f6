//! Browser LocalStorage backend.

use gloo_storage::errors::StorageError as GlooError;
use gloo_storage::{LocalStorage, Storage as GlooStorage};
use serde_json::Value;

use super::storage::{Storage, StorageError};

/// LocalStorage holds JSON text per key, which maps directly onto [`Storage`].
#[derive(Debug, Default)]
pub struct WebStorage;

impl WebStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for WebStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        match LocalStorage::get::<Value>(key) {
            Ok(value) => Ok(Some(value)),
            Err(GlooError::KeyNotFound(_)) => Ok(None),
            Err(GlooError::SerdeError(e)) => Err(StorageError::Parse {
                key: key.to_string(),
                message: e.to_string(),
            }),
            Err(e) => Err(StorageError::NotAvailable(e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        LocalStorage::set(key, value).map_err(|e| StorageError::NotAvailable(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        LocalStorage::delete(key);
        Ok(())
    }
}
