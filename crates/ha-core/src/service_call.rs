//! Service call intents emitted towards the host

use serde::{Deserialize, Serialize};
use serde_json::json;

/// A request to invoke a Home Assistant service
///
/// The engine only builds these; executing them is the host's job and is
/// fire-and-forget from the engine's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    /// The domain the service belongs to (e.g., "light", "lock")
    pub domain: String,

    /// The service name (e.g., "toggle", "unlock")
    pub service: String,

    /// Data passed to the service; always carries `entity_id`
    pub service_data: serde_json::Value,
}

impl ServiceCall {
    /// Create a new service call
    pub fn new(
        domain: impl Into<String>,
        service: impl Into<String>,
        service_data: serde_json::Value,
    ) -> Self {
        Self {
            domain: domain.into(),
            service: service.into(),
            service_data,
        }
    }

    /// Target a single entity
    pub fn for_entity(
        domain: impl Into<String>,
        service: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        Self::new(domain, service, json!({ "entity_id": entity_id.into() }))
    }

    /// Target a list of entities in one call
    pub fn for_entities<I, S>(domain: impl Into<String>, service: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        Self::new(domain, service, json!({ "entity_id": ids }))
    }

    /// Get the full service identifier (domain.service)
    pub fn service_id(&self) -> String {
        format!("{}.{}", self.domain, self.service)
    }

    /// Get entity_id(s) from service data
    ///
    /// Returns a vector of entity IDs, handling both single string and array formats.
    pub fn entity_ids(&self) -> Vec<String> {
        match self.service_data.get("entity_id") {
            Some(serde_json::Value::String(s)) => vec![s.clone()],
            Some(serde_json::Value::Array(arr)) => arr
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            _ => vec![],
        }
    }
}
