//! Summary tiles handed to the presentation layer

use ha_config::{CardConfig, PresentationOptions};
use ha_core::EntityState;
use serde::Serialize;

use crate::aggregate::AggregatedGroup;
use crate::category::Category;
use crate::customization::Resolved;
use crate::person::PersonBadge;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTile {
    pub key: String,
    pub category: Category,
    pub name: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
    pub background: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    pub active: usize,
    pub total: usize,
    /// Count as displayed: `3`, `3/8` or `8`
    pub count_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityTile {
    pub entity_id: String,
    pub name: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
    pub background: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tile {
    Category(CategoryTile),
    Entity(EntityTile),
}

impl Tile {
    /// Category key or entity id
    pub fn key(&self) -> &str {
        match self {
            Tile::Category(tile) => &tile.key,
            Tile::Entity(tile) => &tile.entity_id,
        }
    }
}

/// Everything a card renders, in `content` order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub tiles: Vec<Tile>,
    pub persons: Vec<PersonBadge>,
    pub presentation: PresentationOptions,
}

impl Summary {
    pub fn tile(&self, key: &str) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.key() == key)
    }
}

pub fn count_label(active: usize, total: usize, config: &CardConfig) -> String {
    if config.show_total_entities {
        total.to_string()
    } else if config.show_total_number {
        format!("{active}/{total}")
    } else {
        active.to_string()
    }
}

/// A category tile, or `None` when there is nothing to show
pub(crate) fn category_tile(
    resolved: &Resolved<'_>,
    group: &AggregatedGroup<'_>,
    config: &CardConfig,
) -> Option<CategoryTile> {
    let active = group.active_count();
    let total = group.total_count();
    if active == 0 && !(config.show_total_entities && total > 0) {
        return None;
    }

    Some(CategoryTile {
        key: group.category.key(),
        category: group.category.clone(),
        name: resolved.name(None),
        icon: resolved.icon(None),
        icon_color: resolved.icon_color(),
        background: resolved.background(),
        css: resolved.css(),
        active,
        total,
        count_label: count_label(active, total, config),
    })
}

/// A literal-entity tile, honoring the rule's state condition
pub(crate) fn entity_tile(resolved: &Resolved<'_>, state: &EntityState) -> Option<EntityTile> {
    if resolved.rule().is_some_and(|rule| !rule.state_matches(&state.state)) {
        return None;
    }

    Some(EntityTile {
        entity_id: state.entity_id.to_string(),
        name: resolved.name(Some(state)),
        icon: resolved.icon(Some(state)),
        icon_color: resolved.icon_color(),
        background: resolved.background(),
        css: resolved.css(),
        state: state.state.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_label_modes() {
        let mut config = CardConfig::default();
        assert_eq!(count_label(3, 8, &config), "3");
        config.show_total_number = true;
        assert_eq!(count_label(3, 8, &config), "3/8");
        config.show_total_entities = true;
        assert_eq!(count_label(3, 8, &config), "8");
    }
}
