//! Card configuration loading
//!
//! Accepts YAML (and therefore JSON). An empty document or an explicit
//! `null` is a missing configuration, which is fatal.

use crate::card::CardConfig;
use crate::error::{ConfigError, ConfigResult};
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse and validate a card configuration from a string
pub fn parse_card_config(content: &str) -> ConfigResult<CardConfig> {
    let value: Value =
        serde_yaml::from_str(content).map_err(|source| ConfigError::ParseYaml { source })?;
    card_config_from_value(value)
}

/// Validate an already-parsed YAML value as a card configuration
pub fn card_config_from_value(value: Value) -> ConfigResult<CardConfig> {
    match value {
        Value::Null => return Err(ConfigError::Missing),
        Value::Mapping(_) => {}
        other => {
            return Err(ConfigError::ValidationFailed {
                message: format!("expected a mapping, found {}", kind_of(&other)),
            })
        }
    }

    let config: CardConfig =
        serde_yaml::from_value(value).map_err(|source| ConfigError::ParseYaml { source })?;
    config.validate()?;

    debug!(
        content = config.content.len(),
        rules = config.customization.len(),
        "Loaded card configuration"
    );
    Ok(config)
}

/// Load and validate a card configuration file
pub fn load_card_config(path: impl AsRef<Path>) -> ConfigResult<CardConfig> {
    let path = path.as_ref();
    debug!("Loading card configuration: {:?}", path);

    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_card_config(&content)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
