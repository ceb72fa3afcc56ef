//! Home Assistant Registries
//!
//! Read-only snapshots of the registries a dashboard needs:
//! - Entities (EntityEntry)
//! - Devices (DeviceEntry)
//! - Areas (AreaEntry)
//!
//! Snapshots come from a [`RegistrySource`] (the host's websocket queries, or
//! the `.storage/` directory through [`StorageSource`]) and are swapped
//! atomically by [`RegistryStore`].

pub mod storage;

pub mod area_registry;
pub mod device_registry;
pub mod entity_registry;
pub mod index;
pub mod source;

// Re-export main types
pub use storage::{Storable, Storage, StorageError, StorageFile, StorageResult};

pub use entity_registry::{DisabledBy, EntityEntry, EntityRegistryData, HiddenBy};

pub use device_registry::{DeviceEntry, DeviceRegistryData};

pub use area_registry::{AreaEntry, AreaRegistryData};

pub use index::{RegistrySnapshot, UNASSIGNED_AREA};

pub use source::{RegistryError, RegistrySource, RegistryStore, StorageSource};
