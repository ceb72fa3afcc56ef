//! Entity ID type representing a domain.object_id pair

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for invalid entity IDs
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntityIdError {
    #[error("entity_id must contain exactly one '.' separator")]
    InvalidFormat,

    #[error("domain cannot be empty")]
    EmptyDomain,

    #[error("object_id cannot be empty")]
    EmptyObjectId,

    #[error("domain '{0}' contains invalid characters")]
    InvalidDomainChars(String),

    #[error("object_id '{0}' contains invalid characters")]
    InvalidObjectIdChars(String),
}

/// A Home Assistant entity ID (e.g., "light.living_room")
///
/// Stored as the raw string plus the position of the separator, so that
/// `domain()` and `object_id()` are free slices and `as_str()` needs no
/// re-formatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
    raw: String,
    dot: usize,
}

impl EntityId {
    /// Build an entity ID from its two halves
    pub fn new(domain: &str, object_id: &str) -> Result<Self, EntityIdError> {
        format!("{domain}.{object_id}").parse()
    }

    /// The domain half (`light` in `light.kitchen`)
    pub fn domain(&self) -> &str {
        &self.raw[..self.dot]
    }

    /// The object half (`kitchen` in `light.kitchen`)
    pub fn object_id(&self) -> &str {
        &self.raw[self.dot + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn is_slug_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
    }

    /// Lowercase alphanumeric with underscores, no leading/trailing underscore
    fn is_valid_object_id(s: &str) -> bool {
        !s.starts_with('_') && !s.ends_with('_') && s.chars().all(Self::is_slug_char)
    }

    fn is_valid_domain(s: &str) -> bool {
        !s.contains("__") && Self::is_valid_object_id(s)
    }
}

impl FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((domain, object_id)) = s.split_once('.') else {
            return Err(EntityIdError::InvalidFormat);
        };
        if object_id.contains('.') {
            return Err(EntityIdError::InvalidFormat);
        }
        if domain.is_empty() {
            return Err(EntityIdError::EmptyDomain);
        }
        if object_id.is_empty() {
            return Err(EntityIdError::EmptyObjectId);
        }
        if !Self::is_valid_domain(domain) {
            return Err(EntityIdError::InvalidDomainChars(domain.to_string()));
        }
        if !Self::is_valid_object_id(object_id) {
            return Err(EntityIdError::InvalidObjectIdChars(object_id.to_string()));
        }

        Ok(Self {
            raw: s.to_string(),
            dot: domain.len(),
        })
    }
}

impl TryFrom<String> for EntityId {
    type Error = EntityIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> String {
        id.raw
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
