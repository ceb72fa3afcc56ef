//! Per-category and per-entity customization rules
//!
//! ```yaml
//! customization:
//!   - type: "Binary Sensor - door"
//!     invert: true
//!     icon_color: red
//!   - type: light.porch
//!     state: "on"
//!     invert_state: "true"
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::action::GestureBindings;

/// An RGB triple as written in `background_color: [r, g, b]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Interpret a raw config value; anything but a 3-element array of
    /// integers in `0..=255` is rejected
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let parts = value.as_array()?;
        if parts.len() != 3 {
            return None;
        }
        let mut channels = parts
            .iter()
            .map(|p| p.as_u64().and_then(|n| u8::try_from(n).ok()));
        Some(Rgb(channels.next()??, channels.next()??, channels.next()??))
    }

    pub fn to_css(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }
}

/// Accept `true`/`false` as booleans or as the strings `"true"`/`"false"`
fn bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => Ok(Some(s.eq_ignore_ascii_case("true"))),
        None => Ok(None),
    }
}

/// Accept a string, number or boolean and keep its text form, so `state: 0`
/// and `state: "0"` mean the same thing
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a state value, found {other}"
        ))),
    }
}

/// Override rule keyed by a category key or a literal entity id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationRule {
    /// Category key (`light`, `Binary Sensor - door`) or entity id; matched
    /// case-insensitively
    #[serde(rename = "type")]
    pub key: String,

    /// Count the off states as active instead
    #[serde(
        default,
        deserialize_with = "bool_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub invert: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,

    /// Kept raw; see [`CustomizationRule::background_rgb`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<serde_json::Value>,

    /// Extra CSS applied to the tile icon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_css: Option<String>,

    #[serde(
        default,
        deserialize_with = "bool_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub show_entity_picture: Option<bool>,

    #[serde(flatten)]
    pub actions: GestureBindings,

    /// Literal-entity rules only: show the tile when the state equals this
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub state: Option<String>,

    /// Literal-entity rules only: show the tile when the state differs
    #[serde(
        default,
        deserialize_with = "bool_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub invert_state: Option<bool>,
}

impl CustomizationRule {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            invert: None,
            name: None,
            icon: None,
            icon_color: None,
            background_color: None,
            icon_css: None,
            show_entity_picture: None,
            actions: GestureBindings::default(),
            state: None,
            invert_state: None,
        }
    }

    /// The rule's background color, or `None` when unset or malformed
    pub fn background_rgb(&self) -> Option<Rgb> {
        self.background_color.as_ref().and_then(Rgb::from_value)
    }

    /// Whether a literal entity in `state` passes this rule's state match
    pub fn state_matches(&self, state: &str) -> bool {
        match &self.state {
            None => true,
            Some(expected) => (expected == state) != self.invert_state.unwrap_or(false),
        }
    }
}
