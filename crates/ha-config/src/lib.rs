//! Status card configuration
//!
//! This crate holds the declarative setup of a status card: which domains,
//! categories and entities it shows, the area/floor/label filters, the
//! customization rules and the gesture bindings. Configuration is loaded
//! from YAML (or JSON) and validated up front; any failure is fatal.
//!
//! # Example
//!
//! ```ignore
//! use ha_config::load_card_config;
//!
//! let config = load_card_config("status-card.yaml")?;
//! for item in config.content_items() {
//!     println!("{item:?}");
//! }
//! ```

mod action;
mod card;
mod customization;
mod error;
mod loader;

pub use action::{ActionConfig, ActionKind, Gesture, GestureBindings};
pub use card::{CardConfig, ContentItem, PresentationOptions};
pub use customization::{CustomizationRule, Rgb};
pub use error::{ConfigError, ConfigResult};
pub use loader::{card_config_from_value, load_card_config, parse_card_config};

// Re-export serde_yaml::Value for convenience
pub use serde_yaml::Value;
