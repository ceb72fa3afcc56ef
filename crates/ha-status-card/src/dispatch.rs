//! Action dispatcher
//!
//! Every gesture is resolved from scratch against the snapshot it is given:
//! find the binding, check the target still has live entities, then turn
//! the binding into intents.

use std::fmt;

use ha_config::{ActionConfig, ActionKind, ContentItem, Gesture};
use ha_core::ServiceCall;
use tracing::{debug, instrument};

use crate::card::{HomeSnapshot, StatusCard};
use crate::category::Category;
use crate::intent::{DetailTarget, Intent};
use crate::toggle::toggle_category;
use crate::ui_state::UiState;

/// Domain of the generic per-entity toggle service
const GENERIC_TOGGLE_DOMAIN: &str = "homeassistant";

/// The interactive element a gesture landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileTarget {
    Category(Category),
    Entity(String),
}

impl TileTarget {
    /// Target for a raw `content` entry
    pub fn parse(raw: &str) -> Self {
        let item = ContentItem::parse(raw);
        match (Category::from_content(&item), item) {
            (Some(category), _) => TileTarget::Category(category),
            (None, ContentItem::Entity(entity_id)) => TileTarget::Entity(entity_id),
            (None, other) => TileTarget::Category(Category::domain(other.domain())),
        }
    }
}

impl fmt::Display for TileTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileTarget::Category(category) => write!(f, "{category}"),
            TileTarget::Entity(entity_id) => f.write_str(entity_id),
        }
    }
}

impl StatusCard {
    /// Intents for a gesture on a tile
    ///
    /// A target with no live entities yields nothing. A details request on a
    /// category also selects it in `ui`.
    #[instrument(skip(self, home, target, ui), fields(target = %target))]
    pub fn handle_gesture(
        &self,
        home: &HomeSnapshot,
        target: &TileTarget,
        gesture: Gesture,
        ui: &mut UiState,
    ) -> Vec<Intent> {
        match target {
            TileTarget::Category(category) => {
                let classified = self.classify(home);
                let group = self.aggregate(&classified, category);
                if group.total.is_empty() {
                    debug!("Category has no live entities, ignoring gesture");
                    return Vec::new();
                }

                let action = self.resolve_category(category).action(gesture);
                debug!(action = %action.action, "Dispatching category gesture");
                match action.action {
                    ActionKind::MoreInfo => {
                        ui.select(category.clone());
                        vec![Intent::ShowDetails {
                            target: DetailTarget::Category {
                                key: category.key(),
                            },
                        }]
                    }
                    ActionKind::Toggle => toggle_category(&group),
                    _ => route(action, None),
                }
            }
            TileTarget::Entity(entity_id) => {
                if !home.states.contains(entity_id) {
                    debug!("Entity has no live state, ignoring gesture");
                    return Vec::new();
                }

                let action = self.resolve_entity(entity_id).action(gesture);
                debug!(action = %action.action, "Dispatching entity gesture");
                match action.action {
                    ActionKind::MoreInfo => vec![Intent::ShowDetails {
                        target: DetailTarget::Entity {
                            entity_id: entity_id.clone(),
                        },
                    }],
                    ActionKind::Toggle => vec![Intent::service(ServiceCall::for_entity(
                        GENERIC_TOGGLE_DOMAIN,
                        "toggle",
                        entity_id.as_str(),
                    ))],
                    _ => route(action, Some(entity_id)),
                }
            }
        }
    }

    /// Toggle a category's active entities without any gate
    pub fn toggle_category(&self, home: &HomeSnapshot, category: &Category) -> Vec<Intent> {
        let classified = self.classify(home);
        let group = self.aggregate(&classified, category);
        toggle_category(&group)
    }

    /// Run the category turn on/off once the user has said yes
    ///
    /// Does nothing unless [`UiState::request_bulk_toggle`] is pending; the
    /// gate is reset either way.
    pub fn confirm_bulk_toggle(&self, home: &HomeSnapshot, ui: &mut UiState) -> Vec<Intent> {
        match ui.take_confirmed() {
            Some(category) => self.toggle_category(home, &category),
            None => {
                debug!("No bulk toggle pending");
                Vec::new()
            }
        }
    }
}

/// Kinds that need no knowledge of the target's members
fn route(action: ActionConfig, entity_id: Option<&String>) -> Vec<Intent> {
    match action.action {
        ActionKind::Navigate => action
            .navigation_path
            .map(|path| Intent::Navigate { path })
            .into_iter()
            .collect(),
        ActionKind::Url => action
            .url_path
            .map(|url| Intent::OpenUrl { url })
            .into_iter()
            .collect(),
        ActionKind::None => Vec::new(),
        _ => vec![Intent::Forward {
            action,
            entity_id: entity_id.cloned(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{entity, registry};
    use ha_config::parse_card_config;
    use ha_core::LiveStates;
    use ha_registries::EntityEntry;
    use serde_json::json;

    fn home() -> HomeSnapshot {
        let snapshot = registry(
            vec![
                EntityEntry::new("light.a").with_area("x"),
                EntityEntry::new("light.b").with_area("x"),
                EntityEntry::new("fan.off").with_area("x"),
            ],
            vec![],
            vec![],
        );
        HomeSnapshot::new(
            snapshot,
            LiveStates::from_states([
                entity("light.a", "on", json!({})),
                entity("light.b", "on", json!({})),
                entity("fan.off", "off", json!({})),
                entity("script.night", "off", json!({})),
            ]),
        )
    }

    fn card(yaml: &str) -> StatusCard {
        StatusCard::new(parse_card_config(yaml).unwrap()).unwrap()
    }

    #[test]
    fn test_target_parsing() {
        assert_eq!(
            TileTarget::parse("Binary Sensor - door"),
            TileTarget::Category(Category::with_device_class("binary_sensor", "door"))
        );
        assert_eq!(
            TileTarget::parse("lock.front"),
            TileTarget::Entity("lock.front".into())
        );
        assert_eq!(TileTarget::parse("light").to_string(), "light");
    }

    #[test]
    fn test_default_is_more_info_and_selects() {
        let card = card("content: [light]");
        let mut ui = UiState::new();
        let target = TileTarget::Category(Category::domain("light"));
        let intents = card.handle_gesture(&home(), &target, Gesture::Tap, &mut ui);
        assert_eq!(
            intents,
            vec![Intent::ShowDetails {
                target: DetailTarget::Category { key: "light".into() }
            }]
        );
        assert_eq!(ui.selected(), Some(&Category::domain("light")));
    }

    #[test]
    fn test_category_binding_beats_card_binding() {
        let card = card(
            r"
content: [light]
hold_action:
  action: navigate
  navigation_path: /card
customization:
  - type: light
    hold_action:
      action: url
      url_path: https://example.org
",
        );
        let mut ui = UiState::new();
        let target = TileTarget::Category(Category::domain("light"));
        let intents = card.handle_gesture(&home(), &target, Gesture::Hold, &mut ui);
        assert_eq!(
            intents,
            vec![Intent::OpenUrl {
                url: "https://example.org".into()
            }]
        );
        assert_eq!(ui.selected(), None);
    }

    #[test]
    fn test_toggle_category() {
        let card = card("content: [light, fan]\ntap_action:\n  action: toggle");
        let mut ui = UiState::new();
        let intents = card.handle_gesture(
            &home(),
            &TileTarget::Category(Category::domain("light")),
            Gesture::Tap,
            &mut ui,
        );
        assert_eq!(intents.len(), 1);
        assert_eq!(
            intents[0].as_service_call().map(|c| c.entity_ids()),
            Some(vec!["light.a".to_string(), "light.b".to_string()])
        );

        let intents = card.handle_gesture(
            &home(),
            &TileTarget::Category(Category::domain("fan")),
            Gesture::Tap,
            &mut ui,
        );
        assert!(intents.is_empty());
    }

    #[test]
    fn test_empty_targets_are_no_ops() {
        let card = card("content: [lock, lock.gone]");
        let mut ui = UiState::new();
        let home = home();
        assert!(card
            .handle_gesture(&home, &TileTarget::parse("lock"), Gesture::Tap, &mut ui)
            .is_empty());
        assert!(card
            .handle_gesture(&home, &TileTarget::parse("lock.gone"), Gesture::Tap, &mut ui)
            .is_empty());
        assert_eq!(ui, UiState::default());
    }

    #[test]
    fn test_entity_gestures() {
        let card = card(
            r"
content: [script.night]
customization:
  - type: script.night
    tap_action:
      action: toggle
    hold_action:
      action: perform-action
      perform_action: script.turn_on
    double_tap_action:
      action: none
",
        );
        let mut ui = UiState::new();
        let home = home();
        let target = TileTarget::parse("script.night");

        let tap = card.handle_gesture(&home, &target, Gesture::Tap, &mut ui);
        assert_eq!(
            tap[0].as_service_call().map(ServiceCall::service_id),
            Some("homeassistant.toggle".to_string())
        );

        let hold = card.handle_gesture(&home, &target, Gesture::Hold, &mut ui);
        assert!(matches!(
            &hold[..],
            [Intent::Forward { action, entity_id: Some(id) }]
                if action.action == ActionKind::PerformAction && id == "script.night"
        ));

        assert!(card
            .handle_gesture(&home, &target, Gesture::DoubleTap, &mut ui)
            .is_empty());
    }

    #[test]
    fn test_entity_more_info_leaves_selection() {
        let card = card("content: [script.night]");
        let mut ui = UiState::new();
        let intents = card.handle_gesture(
            &home(),
            &TileTarget::parse("script.night"),
            Gesture::Tap,
            &mut ui,
        );
        assert_eq!(
            intents,
            vec![Intent::ShowDetails {
                target: DetailTarget::Entity {
                    entity_id: "script.night".into()
                }
            }]
        );
        assert_eq!(ui.selected(), None);
    }

    #[test]
    fn test_navigate_on_both_tile_kinds() {
        let card = card(
            r"
content: [light, script.night]
tap_action:
  action: navigate
  navigation_path: /lights
customization:
  - type: script.night
    hold_action:
      action: navigate
      navigation_path: /scripts
",
        );
        let mut ui = UiState::new();
        let home = home();

        let category =
            card.handle_gesture(&home, &TileTarget::parse("light"), Gesture::Tap, &mut ui);
        assert_eq!(category, vec![Intent::Navigate { path: "/lights".into() }]);

        let entity = TileTarget::parse("script.night");
        let hold = card.handle_gesture(&home, &entity, Gesture::Hold, &mut ui);
        assert_eq!(hold, vec![Intent::Navigate { path: "/scripts".into() }]);

        let tap = card.handle_gesture(&home, &entity, Gesture::Tap, &mut ui);
        assert_eq!(tap, vec![Intent::Navigate { path: "/lights".into() }]);
        assert_eq!(ui.selected(), None);
    }

    #[test]
    fn test_route_without_destination() {
        assert!(route(ActionConfig::new(ActionKind::Navigate), None).is_empty());
        assert!(route(ActionConfig::new(ActionKind::Url), None).is_empty());
        assert!(route(ActionConfig::new(ActionKind::None), None).is_empty());
    }

    #[test]
    fn test_bulk_toggle_requires_confirmation() {
        let card = card("content: [light]");
        let home = home();
        let mut ui = UiState::new();
        assert!(card.confirm_bulk_toggle(&home, &mut ui).is_empty());

        ui.select(Category::domain("light"));
        ui.request_bulk_toggle();
        let intents = card.confirm_bulk_toggle(&home, &mut ui);
        assert_eq!(intents.len(), 1);
        assert!(!ui.confirmation_pending());
    }
}
