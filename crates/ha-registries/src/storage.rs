//! Read access to a Home Assistant `.storage/` directory
//!
//! Registry files are wrapped in a versioned envelope:
//!
//! ```json
//! {
//!   "version": 1,
//!   "minor_version": 12,
//!   "key": "core.device_registry",
//!   "data": { "devices": [ ... ] }
//! }
//! ```
//!
//! Only the `data` payload is interpreted; unknown fields inside rows are
//! ignored so newer minor versions keep loading.

use serde::{de::DeserializeOwned, Deserialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error reading {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage file not found: {key}")]
    NotFound { key: String },

    #[error("Storage file {path:?} declares key {found}, expected {expected}")]
    KeyMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Versioned envelope around a storage payload
#[derive(Debug, Clone, Deserialize)]
pub struct StorageFile<T> {
    pub version: u32,
    #[serde(default)]
    pub minor_version: u32,
    pub key: String,
    pub data: T,
}

/// A payload type that lives under a fixed storage key
pub trait Storable: DeserializeOwned {
    const KEY: &'static str;
}

/// Reader for the `.storage/` directory of a config dir
#[derive(Debug, Clone)]
pub struct Storage {
    storage_dir: PathBuf,
}

impl Storage {
    /// # Arguments
    /// * `config_dir` - Path to the Home Assistant config directory
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self {
            storage_dir: config_dir.as_ref().join(".storage"),
        }
    }

    /// Get the file path for a storage key
    pub fn file_path(&self, key: &str) -> PathBuf {
        self.storage_dir.join(key)
    }

    /// Load a storage file, returning `None` if it does not exist
    pub async fn load<T>(&self, key: &str) -> StorageResult<Option<StorageFile<T>>>
    where
        T: DeserializeOwned,
    {
        let path = self.file_path(key);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Storage file not found: {}", key);
                return Ok(None);
            }
            Err(source) => {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source,
                })
            }
        };

        let storage_file: StorageFile<T> =
            serde_json::from_str(&content).map_err(|source| StorageError::Json {
                key: key.to_string(),
                source,
            })?;

        if storage_file.key != key {
            return Err(StorageError::KeyMismatch {
                path,
                expected: key.to_string(),
                found: storage_file.key,
            });
        }

        debug!(
            "Loaded storage file: {} (v{}.{})",
            key, storage_file.version, storage_file.minor_version
        );

        Ok(Some(storage_file))
    }

    /// Load the payload of a [`Storable`], failing if the file is missing
    pub async fn load_data<T: Storable>(&self) -> StorageResult<T> {
        self.load::<T>(T::KEY)
            .await?
            .map(|file| file.data)
            .ok_or_else(|| StorageError::NotFound {
                key: T::KEY.to_string(),
            })
    }
}
