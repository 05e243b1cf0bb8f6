//! File-backed storage: one pretty-printed JSON file per key.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::storage::{Storage, StorageError};

pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Storage under `<data_dir>/storage/`
    pub fn new(data_dir: &Path) -> Self {
        Self {
            root: data_dir.join("storage"),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.root.join(format!("{file}.json"))
    }

    fn io_error(key: &str, source: io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let content = match fs::read_to_string(self.path_for(key)) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::io_error(key, e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StorageError::Parse {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).map_err(|e| Self::io_error(key, e))?;
        let json = serde_json::to_string_pretty(value).map_err(|e| StorageError::Parse {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        // Write beside the target and rename so a crash never leaves half a file
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(|e| Self::io_error(key, e))?;
        fs::rename(&staging, &path).map_err(|e| Self::io_error(key, e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }
}
