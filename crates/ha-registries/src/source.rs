//! Registry loading
//!
//! A [`RegistrySource`] answers the three list queries (entities, devices,
//! areas). [`RegistryStore::refresh`] issues them together and swaps in a new
//! snapshot only when all three succeed.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::area_registry::{AreaEntry, AreaRegistryData};
use crate::device_registry::{DeviceEntry, DeviceRegistryData};
use crate::entity_registry::{EntityEntry, EntityRegistryData};
use crate::index::RegistrySnapshot;
use crate::storage::{Storage, StorageError};

/// Errors raised while loading registries
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A host-provided source failed
    #[error("{registry} registry query failed: {message}")]
    Query {
        registry: &'static str,
        message: String,
    },
}

/// Read-only, list-returning registry queries
#[async_trait]
pub trait RegistrySource: Send + Sync {
    async fn entities(&self) -> Result<Vec<EntityEntry>, RegistryError>;
    async fn devices(&self) -> Result<Vec<DeviceEntry>, RegistryError>;
    async fn areas(&self) -> Result<Vec<AreaEntry>, RegistryError>;
}

/// Source backed by a Home Assistant config directory's `.storage/`
#[derive(Debug, Clone)]
pub struct StorageSource {
    storage: Storage,
}

impl StorageSource {
    pub fn new(config_dir: impl AsRef<std::path::Path>) -> Self {
        Self {
            storage: Storage::new(config_dir),
        }
    }
}

#[async_trait]
impl RegistrySource for StorageSource {
    async fn entities(&self) -> Result<Vec<EntityEntry>, RegistryError> {
        let data: EntityRegistryData = self.storage.load_data().await?;
        Ok(data.entities)
    }

    async fn devices(&self) -> Result<Vec<DeviceEntry>, RegistryError> {
        let data: DeviceRegistryData = self.storage.load_data().await?;
        Ok(data.devices)
    }

    async fn areas(&self) -> Result<Vec<AreaEntry>, RegistryError> {
        let data: AreaRegistryData = self.storage.load_data().await?;
        Ok(data.areas)
    }
}

/// Holder of the current registry snapshot
///
/// Readers get an `Arc` to the snapshot that was current when they asked;
/// a refresh never mutates a snapshot in place.
#[derive(Debug, Default)]
pub struct RegistryStore {
    current: RwLock<Arc<RegistrySnapshot>>,
}

impl RegistryStore {
    /// Create a store holding an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: RegistrySnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The current snapshot
    ///
    /// The lock only guards an `Arc` swap, so a poisoned lock still holds a
    /// whole snapshot and is read through.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    /// Replace the snapshot wholesale
    pub fn replace(&self, snapshot: RegistrySnapshot) -> Arc<RegistrySnapshot> {
        let snapshot = Arc::new(snapshot);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::clone(&snapshot);
        snapshot
    }

    /// Reload all three registries from `source`
    ///
    /// The queries run concurrently. If any of them fails the previous
    /// snapshot stays in place and the error is logged and returned; no
    /// retry is attempted.
    #[instrument(skip_all)]
    pub async fn refresh(
        &self,
        source: &dyn RegistrySource,
    ) -> Result<Arc<RegistrySnapshot>, RegistryError> {
        let loaded = tokio::try_join!(source.entities(), source.devices(), source.areas());

        match loaded {
            Ok((entities, devices, areas)) => {
                info!(
                    entities = entities.len(),
                    devices = devices.len(),
                    areas = areas.len(),
                    "Registry snapshot refreshed"
                );
                Ok(self.replace(RegistrySnapshot::new(entities, devices, areas)))
            }
            Err(err) => {
                warn!(error = %err, "Registry refresh failed, keeping previous snapshot");
                Err(err)
            }
        }
    }
}
