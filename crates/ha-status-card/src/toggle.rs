//! Toggle engine
//!
//! Turns "toggle this category" into service calls. Bulk domains get one
//! `toggle` call over every active entity; the rest get one call per entity
//! chosen by its current state.

use ha_core::{behavior, is_off_state, EntityState, ServiceCall, ToggleRule};
use tracing::{debug, instrument, warn};

use crate::aggregate::AggregatedGroup;
use crate::intent::Intent;

/// Service calls that toggle `entities` of `domain`
///
/// Empty input and domains without toggle semantics yield no calls.
#[instrument(skip(entities), fields(count = entities.len()))]
pub fn toggle_entities(domain: &str, entities: &[&EntityState]) -> Vec<Intent> {
    if entities.is_empty() {
        debug!("Nothing to toggle");
        return Vec::new();
    }

    match behavior(domain).toggle {
        ToggleRule::Bulk => {
            let ids = entities.iter().map(|s| s.entity_id.to_string());
            vec![Intent::service(ServiceCall::for_entities(domain, "toggle", ids))]
        }
        ToggleRule::PerEntity { when_on, when_off } => entities
            .iter()
            .map(|state| {
                let service = if is_off_state(&state.state) {
                    when_off
                } else {
                    when_on
                };
                Intent::service(ServiceCall::for_entity(
                    domain,
                    service,
                    state.entity_id.as_str(),
                ))
            })
            .collect(),
        ToggleRule::Unsupported => {
            warn!("Domain has no toggle semantics, ignoring");
            Vec::new()
        }
    }
}

/// Toggle a category's currently active entities
pub fn toggle_category(group: &AggregatedGroup<'_>) -> Vec<Intent> {
    toggle_entities(&group.category.domain, &group.active)
}
