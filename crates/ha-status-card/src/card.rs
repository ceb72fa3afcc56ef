//! The status card facade
//!
//! Ties one validated configuration to the engine stages. Every method reads
//! from the [`HomeSnapshot`] it is given; only the classification is cached,
//! keyed on the identity of its inputs.

use std::sync::Arc;

use ha_config::{CardConfig, ConfigResult, ContentItem};
use ha_core::LiveStates;
use ha_registries::RegistrySnapshot;
use tracing::{debug, info};

use crate::aggregate::{aggregate, AggregatedGroup};
use crate::category::Category;
use crate::classifier::{classify, ClassifiedEntities};
use crate::customization::{CustomizationTable, Resolved};
use crate::grouping::{group_by_area, AreaGroup};
use crate::memo::Memo;
use crate::person::{persons, PersonBadge};
use crate::tile::{category_tile, entity_tile, Summary, Tile};
use crate::ui_state::UiState;

/// The registries and live state a computation runs against
///
/// Both halves are shared snapshots; replacing either one means building a
/// new `HomeSnapshot`.
#[derive(Debug, Clone, Default)]
pub struct HomeSnapshot {
    pub registry: Arc<RegistrySnapshot>,
    pub states: Arc<LiveStates>,
}

impl HomeSnapshot {
    pub fn new(registry: RegistrySnapshot, states: LiveStates) -> Self {
        Self {
            registry: Arc::new(registry),
            states: Arc::new(states),
        }
    }

    pub fn from_shared(registry: Arc<RegistrySnapshot>, states: Arc<LiveStates>) -> Self {
        Self { registry, states }
    }

    /// Same registries, new live state
    pub fn with_states(&self, states: LiveStates) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            states: Arc::new(states),
        }
    }

    /// Same live state, new registries
    pub fn with_registry(&self, registry: RegistrySnapshot) -> Self {
        Self {
            registry: Arc::new(registry),
            states: Arc::clone(&self.states),
        }
    }
}

/// A configured status card
pub struct StatusCard {
    pub(crate) config: Arc<CardConfig>,
    content: Vec<ContentItem>,
    customization: CustomizationTable,
    classified: Memo<ClassifiedEntities>,
}

impl StatusCard {
    /// Validate `config` and build the rule table
    pub fn new(config: CardConfig) -> ConfigResult<Self> {
        config.validate()?;
        let content = config.content_items();
        let customization = CustomizationTable::new(&config.customization);
        info!(
            content = content.len(),
            rules = customization.len(),
            "Status card configured"
        );

        Ok(Self {
            config: Arc::new(config),
            content,
            customization,
            classified: Memo::default(),
        })
    }

    /// Swap in a new configuration; cached results are dropped
    pub fn set_config(&mut self, config: CardConfig) -> ConfigResult<()> {
        config.validate()?;
        self.content = config.content_items();
        self.customization = CustomizationTable::new(&config.customization);
        self.config = Arc::new(config);
        self.classified.clear();
        debug!(content = self.content.len(), "Status card reconfigured");
        Ok(())
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Parsed `content`, in display order
    pub fn content(&self) -> &[ContentItem] {
        &self.content
    }

    pub fn customization(&self) -> &CustomizationTable {
        &self.customization
    }

    /// Eligible entities by domain; identical inputs return the same `Arc`
    pub fn classify(&self, home: &HomeSnapshot) -> Arc<ClassifiedEntities> {
        self.classified.get_or_compute(home, &self.config, || {
            classify(&home.registry, &home.states, &self.config)
        })
    }

    pub fn resolve_category<'a>(&'a self, category: &'a Category) -> Resolved<'a> {
        Resolved::for_category(&self.customization, &self.config, category)
    }

    pub fn resolve_entity<'a>(&'a self, entity_id: &'a str) -> Resolved<'a> {
        Resolved::for_entity(&self.customization, &self.config, entity_id)
    }

    /// Active and total members of a category, with its inversion applied
    pub fn aggregate<'c>(
        &self,
        classified: &'c ClassifiedEntities,
        category: &Category,
    ) -> AggregatedGroup<'c> {
        let inverted = self.resolve_category(category).inverted();
        aggregate(classified, category, inverted)
    }

    /// Tiles for every `content` item that has something to show
    pub fn summaries(&self, home: &HomeSnapshot) -> Summary {
        let classified = self.classify(home);
        let mut tiles = Vec::with_capacity(self.content.len());

        for item in &self.content {
            match item {
                ContentItem::Entity(entity_id) => {
                    let Some(state) = home.states.get(entity_id) else {
                        debug!(entity_id = %entity_id, "Literal entity has no live state");
                        continue;
                    };
                    if let Some(tile) = entity_tile(&self.resolve_entity(entity_id), state) {
                        tiles.push(Tile::Entity(tile));
                    }
                }
                item => {
                    let Some(category) = Category::from_content(item) else {
                        continue;
                    };
                    let group = self.aggregate(&classified, &category);
                    let resolved = self.resolve_category(&category);
                    if let Some(tile) = category_tile(&resolved, &group, &self.config) {
                        tiles.push(Tile::Category(tile));
                    }
                }
            }
        }

        Summary {
            tiles,
            persons: self.persons(home),
            presentation: self.config.presentation.clone(),
        }
    }

    pub fn persons(&self, home: &HomeSnapshot) -> Vec<PersonBadge> {
        persons(&home.registry, &home.states, &self.config)
    }

    /// Area groups for a category's drill-down, honoring `show_all`
    pub fn drill_down(
        &self,
        home: &HomeSnapshot,
        category: &Category,
        ui: &UiState,
    ) -> Vec<AreaGroup> {
        let classified = self.classify(home);
        let group = self.aggregate(&classified, category);
        group_by_area(&home.registry, &group, ui.show_all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{entity, registry};
    use ha_config::parse_card_config;
    use ha_registries::EntityEntry;
    use serde_json::json;

    fn home() -> HomeSnapshot {
        let snapshot = registry(
            vec![
                EntityEntry::new("light.a").with_area("x"),
                EntityEntry::new("light.b").with_area("x"),
                EntityEntry::new("lock.front").with_area("x"),
            ],
            vec![],
            vec![],
        );
        let states = LiveStates::from_states([
            entity("light.a", "on", json!({})),
            entity("light.b", "off", json!({})),
            entity("lock.front", "locked", json!({"friendly_name": "Front"})),
        ]);
        HomeSnapshot::new(snapshot, states)
    }

    #[test]
    fn test_classification_is_memoized() {
        let card = StatusCard::new(CardConfig::default()).unwrap();
        let home = home();
        let first = card.classify(&home);
        assert!(Arc::ptr_eq(&first, &card.classify(&home)));

        let refreshed = home.with_states((*home.states).clone());
        let second = card.classify(&refreshed);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn test_summary_order_and_visibility() {
        let card = StatusCard::new(
            parse_card_config(
                r"
content: [lock, light, fan, lock.front]
show_total_number: true
",
            )
            .unwrap(),
        )
        .unwrap();
        let summary = card.summaries(&home());
        let keys: Vec<_> = summary.tiles.iter().map(Tile::key).collect();
        assert_eq!(keys, vec!["light", "lock.front"]);

        let Some(Tile::Category(light)) = summary.tile("light") else {
            panic!("light tile missing");
        };
        assert_eq!(light.count_label, "1/2");
        let Some(Tile::Entity(front)) = summary.tile("lock.front") else {
            panic!("lock tile missing");
        };
        assert_eq!(front.name, "Front");
        assert_eq!(front.state, "locked");
    }

    #[test]
    fn test_show_total_entities_keeps_idle_categories() {
        let card = StatusCard::new(
            parse_card_config("content: [lock]\nshow_total_entities: true").unwrap(),
        )
        .unwrap();
        let summary = card.summaries(&home());
        let Some(Tile::Category(lock)) = summary.tile("lock") else {
            panic!("lock tile missing");
        };
        assert_eq!((lock.active, lock.total), (0, 1));
        assert_eq!(lock.count_label, "1");
    }

    #[test]
    fn test_set_config_rejects_invalid() {
        let mut card = StatusCard::new(CardConfig::default()).unwrap();
        let invalid = parse_card_config("content: [light]").map(|mut c| {
            c.presentation.columns = Some(0);
            c
        });
        assert!(card.set_config(invalid.unwrap()).is_err());
        assert!(card.config().content.is_empty());
    }
}
