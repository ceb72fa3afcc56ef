//! Core types for the Home Assistant status engine
//!
//! This crate provides the fundamental types shared by the registries, the
//! card configuration and the aggregation engine: EntityId, EntityState,
//! LiveStates, ServiceCall and the per-domain behavior table.

pub mod domains;
mod entity_id;
mod service_call;
mod state;

pub use domains::{
    behavior, domain_icon, is_allowed_domain, is_off_state, ActivityRule, DeviceClassMatch,
    DomainBehavior, ToggleRule,
};
pub use entity_id::{EntityId, EntityIdError};
pub use service_call::ServiceCall;
pub use state::{attr, EntityState, LiveStates, STATE_UNAVAILABLE, STATE_UNKNOWN};
