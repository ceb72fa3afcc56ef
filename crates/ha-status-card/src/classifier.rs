//! Entity classifier
//!
//! Narrows the registry down to the entities a card may show and groups
//! their live states by domain.

use std::collections::BTreeMap;

use ha_config::CardConfig;
use ha_core::domains::UPDATE_DOMAIN;
use ha_core::{is_allowed_domain, EntityState, LiveStates};
use ha_registries::{EntityEntry, RegistrySnapshot};
use tracing::{debug, trace};

/// Eligible live states grouped by domain, in registry order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedEntities {
    by_domain: BTreeMap<String, Vec<EntityState>>,
}

impl ClassifiedEntities {
    /// Eligible states of one domain
    pub fn domain(&self, domain: &str) -> &[EntityState] {
        self.by_domain.get(domain).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.by_domain.keys().map(String::as_str)
    }

    /// Entity-id projection for consumers that only need membership
    pub fn entity_ids_by_domain(&self) -> BTreeMap<String, Vec<String>> {
        self.by_domain
            .iter()
            .map(|(domain, states)| {
                let ids = states.iter().map(|s| s.entity_id.to_string()).collect();
                (domain.clone(), ids)
            })
            .collect()
    }

    /// Total number of eligible entities
    pub fn len(&self) -> usize {
        self.by_domain.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_domain.is_empty()
    }
}

/// Classify every registry entity against the card's filters
pub fn classify(
    registry: &RegistrySnapshot,
    states: &LiveStates,
    config: &CardConfig,
) -> ClassifiedEntities {
    let mut by_domain: BTreeMap<String, Vec<EntityState>> = BTreeMap::new();

    for entry in registry.entities() {
        if !is_eligible(registry, entry, config) {
            continue;
        }
        let Some(state) = states.get(&entry.entity_id) else {
            trace!(entity_id = %entry.entity_id, "No live state, skipping");
            continue;
        };
        by_domain
            .entry(entry.domain().to_string())
            .or_default()
            .push(state.clone());
    }

    let classified = ClassifiedEntities { by_domain };
    debug!(
        entities = classified.len(),
        domains = classified.by_domain.len(),
        "Classified entities"
    );
    classified
}

/// Whether a registry entry passes every eligibility rule
pub fn is_eligible(registry: &RegistrySnapshot, entry: &EntityEntry, config: &CardConfig) -> bool {
    if entry.is_disabled() || entry.is_hidden() {
        return false;
    }

    let domain = entry.domain();
    if !is_allowed_domain(domain) {
        return false;
    }

    if config.hidden_entities.iter().any(|id| *id == entry.entity_id) {
        return false;
    }
    if entry
        .labels
        .iter()
        .any(|label| config.hidden_labels.contains(label))
    {
        return false;
    }

    if domain == UPDATE_DOMAIN {
        return true;
    }

    let Some(resolved_area) = registry.resolved_area_of(entry) else {
        return false;
    };

    if !config.label.is_empty()
        && !config
            .label
            .iter()
            .any(|label| registry.has_label(entry, label))
    {
        return false;
    }

    if !config.area.is_empty() {
        let own = entry.area_id.as_deref();
        let device = registry.device_area_of(entry);
        let allowed = |area: Option<&str>| area.is_some_and(|a| config.area.iter().any(|f| f == a));
        if !allowed(own) && !allowed(device) {
            return false;
        }
    }

    if !config.floor.is_empty() {
        let floor = registry.floor_of_area(resolved_area);
        if !floor.is_some_and(|f| config.floor.iter().any(|allowed| allowed == f)) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{entity, registry};
    use ha_registries::{AreaEntry, DeviceEntry, DisabledBy};
    use serde_json::json;

    fn config() -> CardConfig {
        CardConfig::default()
    }

    fn live(ids: &[&str]) -> LiveStates {
        LiveStates::from_states(ids.iter().map(|id| entity(id, "on", json!({}))))
    }

    #[test]
    fn test_requires_an_area() {
        let snapshot = registry(
            vec![
                EntityEntry::new("light.kitchen").with_area("kitchen"),
                EntityEntry::new("light.nowhere"),
            ],
            vec![],
            vec![AreaEntry::new("kitchen", "Kitchen")],
        );
        let result = classify(&snapshot, &live(&["light.kitchen", "light.nowhere"]), &config());
        assert_eq!(
            result.entity_ids_by_domain()["light"],
            vec!["light.kitchen".to_string()]
        );
    }

    #[test]
    fn test_update_domain_bypasses_area_rules() {
        let snapshot = registry(vec![EntityEntry::new("update.core")], vec![], vec![]);
        let mut cfg = config();
        cfg.area = vec!["kitchen".into()];
        let result = classify(&snapshot, &live(&["update.core"]), &cfg);
        assert_eq!(result.domain("update").len(), 1);
    }

    #[test]
    fn test_disabled_and_hidden_are_excluded() {
        let mut disabled = EntityEntry::new("light.a").with_area("kitchen");
        disabled.disabled_by = Some(DisabledBy::User);
        let mut hidden = EntityEntry::new("update.b");
        hidden.hidden = true;
        let snapshot = registry(vec![disabled, hidden], vec![], vec![]);
        let result = classify(&snapshot, &live(&["light.a", "update.b"]), &config());
        assert!(result.is_empty());
    }

    #[test]
    fn test_area_filter_uses_device_area() {
        let snapshot = registry(
            vec![EntityEntry::new("light.lamp")
                .with_area("living_room")
                .with_device("dev1")],
            vec![DeviceEntry::new("dev1").with_area("kitchen")],
            vec![],
        );
        let mut cfg = config();
        cfg.area = vec!["kitchen".into()];
        let result = classify(&snapshot, &live(&["light.lamp"]), &cfg);
        assert_eq!(result.domain("light").len(), 1);

        cfg.area = vec!["garage".into()];
        let result = classify(&snapshot, &live(&["light.lamp"]), &cfg);
        assert!(result.is_empty());
    }

    #[test]
    fn test_floor_filter_uses_resolved_area() {
        let snapshot = registry(
            vec![
                EntityEntry::new("light.up").with_area("bedroom"),
                EntityEntry::new("light.down").with_area("kitchen"),
            ],
            vec![],
            vec![
                AreaEntry::new("bedroom", "Bedroom").on_floor("first"),
                AreaEntry::new("kitchen", "Kitchen").on_floor("ground"),
            ],
        );
        let mut cfg = config();
        cfg.floor = vec!["first".into()];
        let result = classify(&snapshot, &live(&["light.up", "light.down"]), &cfg);
        assert_eq!(
            result.entity_ids_by_domain()["light"],
            vec!["light.up".to_string()]
        );
    }

    #[test]
    fn test_label_filter_checks_device_labels() {
        let snapshot = registry(
            vec![
                EntityEntry::new("light.a").with_area("x").with_device("d"),
                EntityEntry::new("light.b").with_area("x"),
            ],
            vec![DeviceEntry::new("d").with_label("night")],
            vec![],
        );
        let mut cfg = config();
        cfg.label = vec!["night".into()];
        let result = classify(&snapshot, &live(&["light.a", "light.b"]), &cfg);
        assert_eq!(result.entity_ids_by_domain()["light"], vec!["light.a".to_string()]);
    }

    #[test]
    fn test_deny_lists() {
        let snapshot = registry(
            vec![
                EntityEntry::new("light.a").with_area("x"),
                EntityEntry::new("light.b").with_area("x").with_label("maintenance"),
                EntityEntry::new("light.c").with_area("x"),
            ],
            vec![],
            vec![],
        );
        let mut cfg = config();
        cfg.hidden_entities = vec!["light.a".into()];
        cfg.hidden_labels = vec!["maintenance".into()];
        let result = classify(&snapshot, &live(&["light.a", "light.b", "light.c"]), &cfg);
        assert_eq!(result.entity_ids_by_domain()["light"], vec!["light.c".to_string()]);
    }

    #[test]
    fn test_disallowed_domains_and_missing_state() {
        let snapshot = registry(
            vec![
                EntityEntry::new("sensor.temp").with_area("x"),
                EntityEntry::new("light.ghost").with_area("x"),
            ],
            vec![],
            vec![],
        );
        let result = classify(&snapshot, &live(&["sensor.temp"]), &config());
        assert!(result.is_empty());
    }

    #[test]
    fn test_registry_order_is_kept() {
        let snapshot = registry(
            vec![
                EntityEntry::new("light.z").with_area("x"),
                EntityEntry::new("light.a").with_area("x"),
            ],
            vec![],
            vec![],
        );
        let result = classify(&snapshot, &live(&["light.a", "light.z"]), &config());
        assert_eq!(
            result.entity_ids_by_domain()["light"],
            vec!["light.z".to_string(), "light.a".to_string()]
        );
    }
}
