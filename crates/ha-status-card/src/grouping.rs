//! Drill-down grouping and ordering

use std::cmp::Ordering;

use ha_core::EntityState;
use ha_registries::RegistrySnapshot;
use indexmap::IndexMap;
use serde::Serialize;

use crate::aggregate::AggregatedGroup;

/// One area section of a drill-down
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaGroup {
    pub area_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub entities: Vec<GroupedEntity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedEntity {
    pub state: EntityState,
    pub active: bool,
}

/// Case-folded comparison with a raw tiebreak, so the order is total
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Group a category's entities by resolved area
///
/// With `show_all` every counted entity is listed, active ones first;
/// otherwise only active entities are listed. Members sort by display name.
pub fn group_by_area(
    registry: &RegistrySnapshot,
    group: &AggregatedGroup<'_>,
    show_all: bool,
) -> Vec<AreaGroup> {
    let members = if show_all { &group.total } else { &group.active };

    let mut by_area: IndexMap<&str, Vec<GroupedEntity>> = IndexMap::new();
    for state in members {
        let area = registry.area_of(state.entity_id.as_str());
        by_area.entry(area).or_default().push(GroupedEntity {
            state: (*state).clone(),
            active: group.is_active(state.entity_id.as_str()),
        });
    }

    let mut groups: Vec<AreaGroup> = by_area
        .into_iter()
        .map(|(area_id, mut entities)| {
            entities.sort_by(|a, b| {
                b.active
                    .cmp(&a.active)
                    .then_with(|| locale_cmp(a.state.display_name(), b.state.display_name()))
            });
            AreaGroup {
                area_id: area_id.to_string(),
                name: registry.area_name(area_id).to_string(),
                icon: registry.area_icon(area_id).map(str::to_string),
                entities,
            }
        })
        .collect();

    groups.sort_by(|a, b| locale_cmp(&a.name, &b.name));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::category::Category;
    use crate::classifier::classify;
    use crate::test_support::{entity, registry};
    use ha_config::CardConfig;
    use ha_core::LiveStates;
    use ha_registries::{AreaEntry, EntityEntry};
    use serde_json::json;

    #[test]
    fn test_locale_cmp() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Kitchen", "kitchen"), Ordering::Less);
        assert_eq!(locale_cmp("b", "b"), Ordering::Equal);
    }

    fn fixture() -> (RegistrySnapshot, LiveStates) {
        let snapshot = registry(
            vec![
                EntityEntry::new("light.zeta").with_area("kitchen"),
                EntityEntry::new("light.alpha").with_area("kitchen"),
                EntityEntry::new("light.desk").with_area("office"),
                EntityEntry::new("update.core"),
            ],
            vec![],
            vec![
                AreaEntry::new("kitchen", "Kitchen").with_icon("mdi:stove"),
                AreaEntry::new("office", "Office"),
            ],
        );
        let states = LiveStates::from_states([
            entity("light.zeta", "on", json!({"friendly_name": "Zeta"})),
            entity("light.alpha", "off", json!({"friendly_name": "Alpha"})),
            entity("light.desk", "on", json!({"friendly_name": "Desk"})),
            entity("update.core", "on", json!({})),
        ]);
        (snapshot, states)
    }

    #[test]
    fn test_active_only_view() {
        let (snapshot, states) = fixture();
        let classified = classify(&snapshot, &states, &CardConfig::default());
        let group = aggregate(&classified, &Category::domain("light"), false);
        let groups = group_by_area(&snapshot, &group, false);

        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Kitchen", "Office"]);
        assert_eq!(groups[0].icon.as_deref(), Some("mdi:stove"));
        assert_eq!(groups[1].icon, None);
        assert_eq!(groups[0].entities.len(), 1);
        assert_eq!(groups[0].entities[0].state.entity_id.as_str(), "light.zeta");
    }

    #[test]
    fn test_show_all_puts_active_first() {
        let (snapshot, states) = fixture();
        let classified = classify(&snapshot, &states, &CardConfig::default());
        let group = aggregate(&classified, &Category::domain("light"), false);
        let groups = group_by_area(&snapshot, &group, true);

        let kitchen: Vec<_> = groups[0]
            .entities
            .iter()
            .map(|e| (e.state.display_name(), e.active))
            .collect();
        assert_eq!(kitchen, vec![("Zeta", true), ("Alpha", false)]);
    }

    #[test]
    fn test_unassigned_bucket() {
        let (snapshot, states) = fixture();
        let classified = classify(&snapshot, &states, &CardConfig::default());
        let group = aggregate(&classified, &Category::domain("update"), false);
        let groups = group_by_area(&snapshot, &group, false);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].area_id, "unassigned");
        assert_eq!(groups[0].name, "Unassigned");
        assert_eq!(groups[0].icon, None);
    }
}
