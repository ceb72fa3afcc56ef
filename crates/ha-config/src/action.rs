//! Gesture action configuration
//!
//! The `tap_action` / `hold_action` / `double_tap_action` blocks used by
//! dashboard cards, e.g.
//!
//! ```yaml
//! tap_action:
//!   action: navigate
//!   navigation_path: /lovelace/lights
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user gesture on an interactive tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Tap,
    Hold,
    DoubleTap,
}

impl Gesture {
    /// Config key holding the binding for this gesture
    pub fn config_key(self) -> &'static str {
        match self {
            Gesture::Tap => "tap_action",
            Gesture::Hold => "hold_action",
            Gesture::DoubleTap => "double_tap_action",
        }
    }
}

/// The `action:` discriminator of an action config
///
/// Unrecognized kinds are kept verbatim so they can be forwarded to the
/// host's generic action handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    MoreInfo,
    Navigate,
    Url,
    Toggle,
    PerformAction,
    CallService,
    Assist,
    FireDomEvent,
    None,
    Other(String),
}

impl ActionKind {
    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::MoreInfo => "more-info",
            ActionKind::Navigate => "navigate",
            ActionKind::Url => "url",
            ActionKind::Toggle => "toggle",
            ActionKind::PerformAction => "perform-action",
            ActionKind::CallService => "call-service",
            ActionKind::Assist => "assist",
            ActionKind::FireDomEvent => "fire-dom-event",
            ActionKind::None => "none",
            ActionKind::Other(s) => s,
        }
    }
}

impl From<String> for ActionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "more-info" => ActionKind::MoreInfo,
            "navigate" => ActionKind::Navigate,
            "url" => ActionKind::Url,
            "toggle" => ActionKind::Toggle,
            "perform-action" => ActionKind::PerformAction,
            "call-service" => ActionKind::CallService,
            "assist" => ActionKind::Assist,
            "fire-dom-event" => ActionKind::FireDomEvent,
            "none" => ActionKind::None,
            _ => ActionKind::Other(s),
        }
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> String {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One gesture binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionConfig {
    pub action: ActionKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,

    /// Service for `perform-action` (`service` for the legacy `call-service`)
    #[serde(default, alias = "service", skip_serializing_if = "Option::is_none")]
    pub perform_action: Option<String>,

    #[serde(default, alias = "service_data", skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<serde_json::Value>,
}

impl ActionConfig {
    /// A bare binding of the given kind
    pub fn new(action: ActionKind) -> Self {
        Self {
            action,
            navigation_path: None,
            url_path: None,
            perform_action: None,
            data: None,
            target: None,
            confirmation: None,
        }
    }

    pub fn more_info() -> Self {
        Self::new(ActionKind::MoreInfo)
    }

    pub fn navigate(path: impl Into<String>) -> Self {
        Self {
            navigation_path: Some(path.into()),
            ..Self::new(ActionKind::Navigate)
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url_path: Some(url.into()),
            ..Self::new(ActionKind::Url)
        }
    }
}

/// Gesture bindings as they appear on the card and on customization rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureBindings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<ActionConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_action: Option<ActionConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_tap_action: Option<ActionConfig>,
}

impl GestureBindings {
    pub fn get(&self, gesture: Gesture) -> Option<&ActionConfig> {
        match gesture {
            Gesture::Tap => self.tap_action.as_ref(),
            Gesture::Hold => self.hold_action.as_ref(),
            Gesture::DoubleTap => self.double_tap_action.as_ref(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Gesture, &ActionConfig)> {
        [Gesture::Tap, Gesture::Hold, Gesture::DoubleTap]
            .into_iter()
            .filter_map(|g| self.get(g).map(|a| (g, a)))
    }
}
