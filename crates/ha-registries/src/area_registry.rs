//! Area Registry rows
//!
//! Areas (rooms, zones) and the floor each one sits on.

use serde::{Deserialize, Serialize};

use crate::storage::Storable;

/// Storage key for area registry
pub const STORAGE_KEY: &str = "core.area_registry";

/// A registered area entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaEntry {
    /// Area id (`area_id` in websocket payloads)
    #[serde(alias = "area_id")]
    pub id: String,

    /// Area name (e.g., "Living Room")
    pub name: String,

    /// Floor this area belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_id: Option<String>,

    /// Area icon (e.g., "mdi:sofa")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl AreaEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            floor_id: None,
            icon: None,
        }
    }

    pub fn on_floor(mut self, floor_id: impl Into<String>) -> Self {
        self.floor_id = Some(floor_id.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Area registry data for storage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaRegistryData {
    pub areas: Vec<AreaEntry>,
}

impl Storable for AreaRegistryData {
    const KEY: &'static str = STORAGE_KEY;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_websocket_alias() {
        let area: AreaEntry = serde_json::from_value(json!({
            "area_id": "kitchen",
            "name": "Kitchen",
            "floor_id": "ground",
            "icon": "mdi:stove",
            "aliases": []
        }))
        .unwrap();
        assert_eq!(area.id, "kitchen");
        assert_eq!(area.floor_id.as_deref(), Some("ground"));
        assert_eq!(area.icon.as_deref(), Some("mdi:stove"));
    }
}
