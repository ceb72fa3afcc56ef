//! Customization resolver
//!
//! Rules are indexed once per configuration. Each tile property then
//! cascades on its own: matching rules (most specific first) → entity
//! attributes → card-wide defaults → hard-coded defaults.

use std::collections::HashMap;

use ha_config::{ActionConfig, CardConfig, CustomizationRule, Gesture};
use ha_core::{domain_icon, is_off_state, EntityState};

use crate::category::{normalize_key, Category};

/// Background used when neither a rule nor the card sets one
pub const DEFAULT_BACKGROUND: &str = "rgba(var(--rgb-primary-text-color), 0.15)";

/// Alpha applied to configured `[r, g, b]` backgrounds
const BACKGROUND_ALPHA: f32 = 0.15;

/// Rule lookup keyed by normalized key
///
/// When several rules share a key the first one in configuration order wins.
#[derive(Debug, Clone, Default)]
pub struct CustomizationTable {
    rules: HashMap<String, CustomizationRule>,
}

impl CustomizationTable {
    pub fn new(rules: &[CustomizationRule]) -> Self {
        let mut table = HashMap::with_capacity(rules.len());
        for rule in rules {
            table
                .entry(normalize_key(&rule.key))
                .or_insert_with(|| rule.clone());
        }
        Self { rules: table }
    }

    /// Rule for a key, compared case-insensitively
    pub fn get(&self, key: &str) -> Option<&CustomizationRule> {
        self.rules.get(&normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// What a tile is resolved for
#[derive(Debug, Clone, Copy)]
enum Subject<'a> {
    Category(&'a Category),
    Entity(&'a str),
}

/// Per-field cascade for one category or literal entity
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    subject: Subject<'a>,
    rules: Vec<&'a CustomizationRule>,
    config: &'a CardConfig,
}

impl<'a> Resolved<'a> {
    pub fn for_category(
        table: &'a CustomizationTable,
        config: &'a CardConfig,
        category: &'a Category,
    ) -> Self {
        let rules = category
            .lookup_chain()
            .iter()
            .filter_map(|key| table.get(key))
            .collect();
        Self {
            subject: Subject::Category(category),
            rules,
            config,
        }
    }

    pub fn for_entity(
        table: &'a CustomizationTable,
        config: &'a CardConfig,
        entity_id: &'a str,
    ) -> Self {
        Self {
            subject: Subject::Entity(entity_id),
            rules: table.get(entity_id).into_iter().collect(),
            config,
        }
    }

    /// The most specific matching rule, if any
    pub fn rule(&self) -> Option<&'a CustomizationRule> {
        self.rules.first().copied()
    }

    fn first<T>(&self, field: impl Fn(&'a CustomizationRule) -> Option<T>) -> Option<T> {
        self.rules.iter().find_map(|rule| field(*rule))
    }

    pub fn inverted(&self) -> bool {
        self.first(|r| r.invert).unwrap_or(false)
    }

    pub fn name(&self, entity: Option<&EntityState>) -> String {
        if let Some(name) = self.first(|r| r.name.clone()) {
            return name;
        }
        if let Some(name) = entity.and_then(EntityState::friendly_name) {
            return name.to_string();
        }
        match self.subject {
            Subject::Category(category) => category.default_name(),
            Subject::Entity(entity_id) => entity_id.to_string(),
        }
    }

    /// Icon name or, with `show_entity_picture`, a picture URL
    pub fn icon(&self, entity: Option<&EntityState>) -> String {
        let show_picture = self.first(|r| r.show_entity_picture).unwrap_or(false);
        if show_picture {
            if let Some(picture) = entity.and_then(EntityState::entity_picture) {
                return picture.to_string();
            }
        }
        if let Some(icon) = self.first(|r| r.icon.clone()) {
            return icon;
        }
        if let Some(icon) = entity.and_then(EntityState::icon) {
            return icon.to_string();
        }

        match (self.subject, entity) {
            (_, Some(state)) => domain_icon(
                state.domain(),
                state.device_class(),
                !is_off_state(&state.state),
            )
            .to_string(),
            (Subject::Category(category), None) => domain_icon(
                &category.domain,
                category.device_class.as_deref(),
                !self.inverted(),
            )
            .to_string(),
            (Subject::Entity(entity_id), None) => {
                let domain = entity_id.split('.').next().unwrap_or(entity_id);
                domain_icon(domain, None, true).to_string()
            }
        }
    }

    pub fn icon_color(&self) -> Option<String> {
        self.first(|r| r.icon_color.clone())
            .or_else(|| self.config.color.clone())
    }

    /// CSS background; malformed colors fall through to the next tier
    pub fn background(&self) -> String {
        self.first(|r| r.background_rgb())
            .or_else(|| self.config.background_rgb())
            .map(|rgb| rgb.to_css(BACKGROUND_ALPHA))
            .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string())
    }

    pub fn css(&self) -> Option<String> {
        self.first(|r| r.icon_css.clone())
    }

    /// Binding for a gesture; undefined bindings open the details view
    pub fn action(&self, gesture: Gesture) -> ActionConfig {
        self.first(|r| r.actions.get(gesture).cloned())
            .or_else(|| self.config.action_for(gesture).cloned())
            .unwrap_or_else(ActionConfig::more_info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::entity;
    use ha_config::{parse_card_config, ActionKind};
    use serde_json::json;

    const CONFIG: &str = r#"
content: [light, "Light - lamp"]
color: grey
background_color: [10, 20, 30]
tap_action:
  action: navigate
  navigation_path: /card
customization:
  - type: "Light - lamp"
    icon_color: red
  - type: LIGHT
    icon_color: blue
    icon: mdi:ceiling-light
    tap_action:
      action: toggle
  - type: light
    icon_color: ignored-duplicate
  - type: switch
    background_color: nonsense
  - type: light.porch
    show_entity_picture: true
"#;

    #[test]
    fn test_table_is_case_insensitive_and_first_wins() {
        let config = parse_card_config(CONFIG).unwrap();
        let table = CustomizationTable::new(&config.customization);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get("Light").unwrap().icon_color.as_deref(), Some("blue"));
    }

    #[test]
    fn test_device_class_rule_beats_domain_rule_per_field() {
        let config = parse_card_config(CONFIG).unwrap();
        let table = CustomizationTable::new(&config.customization);
        let category = Category::with_device_class("light", "lamp");
        let resolved = Resolved::for_category(&table, &config, &category);

        assert_eq!(resolved.icon_color().as_deref(), Some("red"));
        assert_eq!(resolved.icon(None), "mdi:ceiling-light");
        assert_eq!(resolved.action(Gesture::Tap).action, ActionKind::Toggle);
        assert_eq!(resolved.action(Gesture::Hold), ActionConfig::more_info());
    }

    #[test]
    fn test_card_defaults_then_hard_coded() {
        let config = parse_card_config(CONFIG).unwrap();
        let table = CustomizationTable::new(&config.customization);
        let category = Category::domain("fan");
        let resolved = Resolved::for_category(&table, &config, &category);

        assert_eq!(resolved.icon_color().as_deref(), Some("grey"));
        assert_eq!(resolved.background(), "rgba(10, 20, 30, 0.15)");
        assert_eq!(resolved.action(Gesture::Tap), ActionConfig::navigate("/card"));
        assert_eq!(resolved.icon(None), "mdi:fan");
        assert_eq!(resolved.name(None), "Fan");
        assert_eq!(resolved.css(), None);

        let bare = CardConfig::default();
        let empty = CustomizationTable::default();
        let resolved = Resolved::for_category(&empty, &bare, &category);
        assert_eq!(resolved.icon_color(), None);
        assert_eq!(resolved.background(), DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_malformed_background_falls_through() {
        let config = parse_card_config(CONFIG).unwrap();
        let table = CustomizationTable::new(&config.customization);
        let category = Category::domain("switch");
        let resolved = Resolved::for_category(&table, &config, &category);
        assert_eq!(resolved.background(), "rgba(10, 20, 30, 0.15)");
    }

    #[test]
    fn test_inverted_category_uses_off_exemplar_icon() {
        let mut rule = CustomizationRule::new("lock");
        rule.invert = Some(true);
        let config = CardConfig {
            customization: vec![rule],
            ..Default::default()
        };
        let table = CustomizationTable::new(&config.customization);
        let category = Category::domain("lock");
        let resolved = Resolved::for_category(&table, &config, &category);
        assert!(resolved.inverted());
        assert_eq!(resolved.icon(None), "mdi:lock");
    }

    #[test]
    fn test_entity_name_and_picture() {
        let config = parse_card_config(CONFIG).unwrap();
        let table = CustomizationTable::new(&config.customization);
        let porch = entity(
            "light.porch",
            "on",
            json!({"friendly_name": "Porch", "entity_picture": "/local/porch.png"}),
        );
        let resolved = Resolved::for_entity(&table, &config, "light.porch");
        assert_eq!(resolved.name(Some(&porch)), "Porch");
        assert_eq!(resolved.icon(Some(&porch)), "/local/porch.png");

        let other = entity("light.hall", "off", json!({}));
        let resolved = Resolved::for_entity(&table, &config, "light.hall");
        assert_eq!(resolved.name(Some(&other)), "light.hall");
        assert_eq!(resolved.icon(Some(&other)), "mdi:lightbulb-outline");
    }
}
