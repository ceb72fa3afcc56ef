//! Status card configuration
//!
//! ```yaml
//! type: custom:status-card
//! area: [kitchen, living_room]
//! hidden_labels: [maintenance]
//! content:
//!   - light
//!   - Binary Sensor - door
//!   - lock.front_door
//! show_total_number: true
//! customization:
//!   - type: light
//!     icon_color: amber
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::action::{ActionConfig, ActionKind, Gesture, GestureBindings};
use crate::customization::{CustomizationRule, Rgb};
use crate::error::{ConfigError, ConfigResult};

/// Deserialize a field that can be either a single string or an array of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        String(String),
        Vec(Vec<String>),
    }

    match Option::<StringOrVec>::deserialize(deserializer)? {
        Some(StringOrVec::String(s)) => Ok(vec![s]),
        Some(StringOrVec::Vec(v)) => Ok(v),
        None => Ok(Vec::new()),
    }
}

/// One entry of the ordered `content` list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentItem {
    /// A whole domain (`light`)
    Domain(String),
    /// A domain narrowed by device class (`Binary Sensor - door`)
    Category { domain: String, device_class: String },
    /// A literal entity (`lock.front_door`)
    Entity(String),
}

impl ContentItem {
    /// Classify a raw content string
    ///
    /// `"<Domain> - <device_class>"` is a category; the domain half is
    /// lower-cased with spaces turned into underscores. Otherwise a string
    /// with a `.` is an entity id and anything else is a domain.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some((domain, device_class)) = raw.split_once(" - ") {
            return ContentItem::Category {
                domain: domain.trim().to_lowercase().replace(' ', "_"),
                device_class: device_class.trim().to_lowercase(),
            };
        }
        if raw.contains('.') {
            ContentItem::Entity(raw.to_string())
        } else {
            ContentItem::Domain(raw.to_lowercase())
        }
    }

    /// Domain of the item (the entity's domain for literal entities)
    pub fn domain(&self) -> &str {
        match self {
            ContentItem::Domain(domain) | ContentItem::Category { domain, .. } => domain,
            ContentItem::Entity(id) => id.split('.').next().unwrap_or(id),
        }
    }
}

/// Layout switches the engine does not interpret but passes through
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresentationOptions {
    #[serde(default)]
    pub hide_person: bool,

    #[serde(default)]
    pub hide_content_name: bool,

    #[serde(default)]
    pub list_mode: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,

    #[serde(default)]
    pub square: bool,
}

/// The declarative card setup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Ordered domains, categories and entity ids; defines inclusion and
    /// display order
    #[serde(default)]
    pub content: Vec<String>,

    /// Area allow-list
    #[serde(default, deserialize_with = "string_or_vec")]
    pub area: Vec<String>,

    /// Floor allow-list
    #[serde(default, deserialize_with = "string_or_vec")]
    pub floor: Vec<String>,

    /// Label allow-list
    #[serde(default, deserialize_with = "string_or_vec")]
    pub label: Vec<String>,

    #[serde(default, deserialize_with = "string_or_vec")]
    pub hidden_entities: Vec<String>,

    #[serde(default, deserialize_with = "string_or_vec")]
    pub hidden_labels: Vec<String>,

    #[serde(default)]
    pub customization: Vec<CustomizationRule>,

    /// Card-wide icon color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Card-wide tile background, `[r, g, b]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<serde_json::Value>,

    /// Card-wide gesture defaults
    #[serde(flatten)]
    pub actions: GestureBindings,

    #[serde(default)]
    pub show_total_number: bool,

    #[serde(default)]
    pub show_total_entities: bool,

    #[serde(flatten)]
    pub presentation: PresentationOptions,
}

impl CardConfig {
    /// Parsed `content` list, in order
    pub fn content_items(&self) -> Vec<ContentItem> {
        self.content.iter().map(|c| ContentItem::parse(c)).collect()
    }

    pub fn background_rgb(&self) -> Option<Rgb> {
        self.background_color.as_ref().and_then(Rgb::from_value)
    }

    /// Card-level binding for a gesture
    pub fn action_for(&self, gesture: Gesture) -> Option<&ActionConfig> {
        self.actions.get(gesture)
    }

    /// Check the semantic constraints serde cannot express
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(pos) = self.content.iter().position(|c| c.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: format!("content[{pos}]"),
                reason: "content entries must be non-empty".to_string(),
            });
        }

        if let Some(pos) = self.customization.iter().position(|r| r.key.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: format!("customization[{pos}].type"),
                reason: "customization rules need a type".to_string(),
            });
        }

        if self.presentation.columns == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "columns".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        validate_bindings("", &self.actions)?;
        for rule in &self.customization {
            validate_bindings(&format!("customization[{}].", rule.key), &rule.actions)?;
        }

        Ok(())
    }
}

fn validate_bindings(prefix: &str, bindings: &GestureBindings) -> ConfigResult<()> {
    for (gesture, action) in bindings.iter() {
        let missing = match action.action {
            ActionKind::Navigate if action.navigation_path.is_none() => Some("navigation_path"),
            ActionKind::Url if action.url_path.is_none() => Some("url_path"),
            _ => None,
        };
        if let Some(field) = missing {
            return Err(ConfigError::ValidationFailed {
                message: format!(
                    "{prefix}{} with action '{}' requires {field}",
                    gesture.config_key(),
                    action.action
                ),
            });
        }
    }
    Ok(())
}
