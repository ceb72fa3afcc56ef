//! Person row
//!
//! People are not bound to areas, so they are read straight from live state
//! rather than through the classifier's area rules.

use ha_config::CardConfig;
use ha_core::LiveStates;
use ha_registries::RegistrySnapshot;
use serde::Serialize;

use crate::grouping::locale_cmp;

const PERSON_DOMAIN: &str = "person";
const STATE_HOME: &str = "home";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonBadge {
    pub entity_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub is_home: bool,
}

/// Person badges sorted by name; empty when `hide_person` is set
pub fn persons(
    registry: &RegistrySnapshot,
    states: &LiveStates,
    config: &CardConfig,
) -> Vec<PersonBadge> {
    if config.presentation.hide_person {
        return Vec::new();
    }

    let mut badges: Vec<PersonBadge> = states
        .iter()
        .filter(|s| s.domain() == PERSON_DOMAIN && s.is_observable())
        .filter(|s| !config.hidden_entities.iter().any(|id| id == s.entity_id.as_str()))
        .filter(|s| {
            registry
                .entity(s.entity_id.as_str())
                .map_or(true, |e| !e.is_disabled() && !e.is_hidden())
        })
        .map(|s| PersonBadge {
            entity_id: s.entity_id.to_string(),
            name: s.display_name().to_string(),
            picture: s.entity_picture().map(str::to_string),
            is_home: s.state == STATE_HOME,
        })
        .collect();

    badges.sort_by(|a, b| {
        locale_cmp(&a.name, &b.name).then_with(|| a.entity_id.cmp(&b.entity_id))
    });
    badges
}
