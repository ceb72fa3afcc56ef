//! Live entity state as observed by a dashboard

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::EntityId;

/// State value for an entity the integration cannot reach
pub const STATE_UNAVAILABLE: &str = "unavailable";

/// State value for an entity that has not reported yet
pub const STATE_UNKNOWN: &str = "unknown";

/// Attribute keys read by the status engine
pub mod attr {
    pub const DEVICE_CLASS: &str = "device_class";
    pub const FRIENDLY_NAME: &str = "friendly_name";
    pub const ICON: &str = "icon";
    pub const ENTITY_PICTURE: &str = "entity_picture";
    pub const HVAC_ACTION: &str = "hvac_action";
    pub const ACTION: &str = "action";
}

/// The current observed value and attributes of one entity
///
/// Mirrors the `/api/states` row shape; timestamps and context are not
/// needed for aggregation and are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: EntityId,

    /// The state value (e.g., "on", "locked", "23.5", "unavailable")
    pub state: String,

    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl EntityState {
    pub fn new(
        entity_id: EntityId,
        state: impl Into<String>,
        attributes: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            entity_id,
            state: state.into(),
            attributes,
        }
    }

    pub fn domain(&self) -> &str {
        self.entity_id.domain()
    }

    pub fn is_unavailable(&self) -> bool {
        self.state == STATE_UNAVAILABLE
    }

    pub fn is_unknown(&self) -> bool {
        self.state == STATE_UNKNOWN
    }

    /// Neither `unavailable` nor `unknown`; only these states take part in
    /// active/total counting
    pub fn is_observable(&self) -> bool {
        !self.is_unavailable() && !self.is_unknown()
    }

    /// Borrow a string attribute without cloning
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(serde_json::Value::as_str)
    }

    pub fn device_class(&self) -> Option<&str> {
        self.attribute_str(attr::DEVICE_CLASS)
    }

    pub fn friendly_name(&self) -> Option<&str> {
        self.attribute_str(attr::FRIENDLY_NAME)
    }

    /// Friendly name, falling back to the entity id
    pub fn display_name(&self) -> &str {
        self.friendly_name().unwrap_or(self.entity_id.as_str())
    }

    pub fn icon(&self) -> Option<&str> {
        self.attribute_str(attr::ICON)
    }

    pub fn entity_picture(&self) -> Option<&str> {
        self.attribute_str(attr::ENTITY_PICTURE)
    }
}

/// Point-in-time snapshot of every entity state, keyed by entity id
///
/// Handed to the engine behind an `Arc`; a new snapshot is a new `Arc`,
/// which is what memoized computations key on.
#[derive(Debug, Clone, Default)]
pub struct LiveStates {
    states: HashMap<String, EntityState>,
}

impl LiveStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_states(states: impl IntoIterator<Item = EntityState>) -> Self {
        Self {
            states: states
                .into_iter()
                .map(|s| (s.entity_id.to_string(), s))
                .collect(),
        }
    }

    /// Parse the list returned by `GET /api/states`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let states: Vec<EntityState> = serde_json::from_str(json)?;
        Ok(Self::from_states(states))
    }

    pub fn insert(&mut self, state: EntityState) {
        self.states.insert(state.entity_id.to_string(), state);
    }

    pub fn get(&self, entity_id: &str) -> Option<&EntityState> {
        self.states.get(entity_id)
    }

    pub fn contains(&self, entity_id: &str) -> bool {
        self.states.contains_key(entity_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityState> {
        self.states.values()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
