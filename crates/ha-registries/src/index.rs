//! Registry snapshot and lookup index
//!
//! A [`RegistrySnapshot`] bundles the entity, device and area lists as they
//! were loaded together, plus the id maps built over them. Snapshots are
//! immutable: a reload builds a new one and the old one is dropped once no
//! computation holds it any more.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::area_registry::AreaEntry;
use crate::device_registry::DeviceEntry;
use crate::entity_registry::EntityEntry;

/// Area id reported for entities with no area anywhere in their chain
pub const UNASSIGNED_AREA: &str = "unassigned";

/// Immutable view over the three registries
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    /// Primary index: entity_id -> entry, in registry order
    entities: IndexMap<String, EntityEntry>,

    /// Index: device_id -> entry
    devices: HashMap<String, DeviceEntry>,

    /// Index: area_id -> entry
    areas: HashMap<String, AreaEntry>,
}

impl RegistrySnapshot {
    /// Build a snapshot and its lookup maps from raw registry lists
    pub fn new(
        entities: Vec<EntityEntry>,
        devices: Vec<DeviceEntry>,
        areas: Vec<AreaEntry>,
    ) -> Self {
        Self {
            entities: entities
                .into_iter()
                .map(|e| (e.entity_id.clone(), e))
                .collect(),
            devices: devices.into_iter().map(|d| (d.id.clone(), d)).collect(),
            areas: areas.into_iter().map(|a| (a.id.clone(), a)).collect(),
        }
    }

    pub fn entity(&self, entity_id: &str) -> Option<&EntityEntry> {
        self.entities.get(entity_id)
    }

    pub fn device(&self, device_id: &str) -> Option<&DeviceEntry> {
        self.devices.get(device_id)
    }

    pub fn area(&self, area_id: &str) -> Option<&AreaEntry> {
        self.areas.get(area_id)
    }

    /// Iterate over all entities (preserves registry order)
    pub fn entities(&self) -> impl Iterator<Item = &EntityEntry> {
        self.entities.values()
    }

    pub fn devices(&self) -> impl Iterator<Item = &DeviceEntry> {
        self.devices.values()
    }

    pub fn areas(&self) -> impl Iterator<Item = &AreaEntry> {
        self.areas.values()
    }

    /// The device owning an entity, if it is registered
    pub fn device_of(&self, entity: &EntityEntry) -> Option<&DeviceEntry> {
        entity.device_id.as_deref().and_then(|id| self.device(id))
    }

    /// Area of the owning device, if any
    pub fn device_area_of(&self, entity: &EntityEntry) -> Option<&str> {
        self.device_of(entity).and_then(|d| d.area_id.as_deref())
    }

    /// Resolved area: the entity's own area, else its device's area
    pub fn resolved_area_of<'a>(&'a self, entity: &'a EntityEntry) -> Option<&'a str> {
        entity
            .area_id
            .as_deref()
            .or_else(|| self.device_area_of(entity))
    }

    /// Resolved area for an entity id, or [`UNASSIGNED_AREA`]
    ///
    /// Entities missing from the entity registry are unassigned.
    pub fn area_of(&self, entity_id: &str) -> &str {
        self.entity(entity_id)
            .and_then(|e| self.resolved_area_of(e))
            .unwrap_or(UNASSIGNED_AREA)
    }

    /// Floor of an area, via the area registry
    pub fn floor_of_area(&self, area_id: &str) -> Option<&str> {
        self.area(area_id).and_then(|a| a.floor_id.as_deref())
    }

    /// True if the entity or its device carries the label
    pub fn has_label(&self, entity: &EntityEntry, label: &str) -> bool {
        entity.labels.contains(label)
            || self.device_of(entity).is_some_and(|d| d.has_label(label))
    }

    /// Display name of an area id; unknown ids and [`UNASSIGNED_AREA`] map
    /// to `"Unassigned"`
    pub fn area_name(&self, area_id: &str) -> &str {
        self.area(area_id).map_or("Unassigned", |a| a.name.as_str())
    }

    /// Icon of an area, if the area is known and has one
    pub fn area_icon(&self, area_id: &str) -> Option<&str> {
        self.area(area_id).and_then(|a| a.icon.as_deref())
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}
