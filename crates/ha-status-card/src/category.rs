//! Category identity
//!
//! A category is a domain, optionally narrowed by a device class. Its key is
//! the string users write in `content` and in customization rules:
//! `light`, `Binary Sensor - door`.

use std::fmt;

use ha_config::ContentItem;
use serde::{Deserialize, Serialize};

/// A `(domain, device class)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub domain: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,
}

impl Category {
    /// A whole-domain category
    pub fn domain(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            device_class: None,
        }
    }

    pub fn with_device_class(domain: impl Into<String>, device_class: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            device_class: Some(device_class.into()),
        }
    }

    /// The category for a content item; literal entities have none
    pub fn from_content(item: &ContentItem) -> Option<Self> {
        match item {
            ContentItem::Domain(domain) => Some(Self::domain(domain.clone())),
            ContentItem::Category {
                domain,
                device_class,
            } => Some(Self::with_device_class(domain.clone(), device_class.clone())),
            ContentItem::Entity(_) => None,
        }
    }

    /// Display key: the bare domain, or `"<Formatted Domain> - <class>"`
    pub fn key(&self) -> String {
        match &self.device_class {
            None => self.domain.clone(),
            Some(class) => format!("{} - {}", format_domain(&self.domain), class),
        }
    }

    /// Customization keys to try, most specific first, already normalized
    pub fn lookup_chain(&self) -> Vec<String> {
        match &self.device_class {
            None => vec![normalize_key(&self.domain)],
            Some(_) => vec![normalize_key(&self.key()), normalize_key(&self.domain)],
        }
    }

    /// Human-readable fallback name
    pub fn default_name(&self) -> String {
        match &self.device_class {
            None => format_domain(&self.domain),
            Some(class) => format_domain(class),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// `binary_sensor` → `Binary Sensor`
pub fn format_domain(domain: &str) -> String {
    domain
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Customization keys compare case-insensitively
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}
