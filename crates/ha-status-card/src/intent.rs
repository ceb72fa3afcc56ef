//! Side effects requested from the host
//!
//! The engine never performs these itself; the host executes them
//! fire-and-forget.

use ha_config::ActionConfig;
use ha_core::ServiceCall;
use serde::Serialize;

/// What a details view should show
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailTarget {
    /// The host's more-info dialog for one entity
    Entity { entity_id: String },
    /// The category drill-down, keyed by category key
    Category { key: String },
}

/// One request emitted by gesture handling or toggling
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    ShowDetails { target: DetailTarget },
    CallService { call: ServiceCall },
    Navigate { path: String },
    OpenUrl { url: String },
    /// Any other action kind, passed through to the host's generic handler
    Forward {
        action: ActionConfig,
        #[serde(skip_serializing_if = "Option::is_none")]
        entity_id: Option<String>,
    },
}

impl Intent {
    pub fn service(call: ServiceCall) -> Self {
        Intent::CallService { call }
    }

    /// The service call carried by this intent, if any
    pub fn as_service_call(&self) -> Option<&ServiceCall> {
        match self {
            Intent::CallService { call } => Some(call),
            _ => None,
        }
    }
}
