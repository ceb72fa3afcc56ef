//! Activity predicate
//!
//! Decides whether one entity state belongs to a category and whether it
//! counts as active. Per-domain quirks come from the behavior table in
//! `ha_core::domains`.

use ha_core::{behavior, is_off_state, ActivityRule, DeviceClassMatch, EntityState};

/// Whether the entity's device class satisfies a category filter
///
/// With no filter every entity matches. The switch domain's `switch` filter
/// also accepts entities with no device class at all.
pub fn matches_device_class(domain: &str, filter: Option<&str>, state: &EntityState) -> bool {
    let Some(filter) = filter else {
        return true;
    };
    let class = state.device_class();
    match behavior(domain).device_class_match {
        DeviceClassMatch::Exact => class == Some(filter),
        DeviceClassMatch::SwitchOrUnset => {
            class == Some(filter) || (filter == "switch" && class.is_none())
        }
    }
}

/// Whether the entity counts toward a category's total
///
/// `unavailable` and `unknown` entities never count.
pub fn counts_toward_total(domain: &str, filter: Option<&str>, state: &EntityState) -> bool {
    state.is_observable() && matches_device_class(domain, filter, state)
}

/// The domain's own notion of "on", before inversion
pub fn is_on(domain: &str, state: &EntityState) -> bool {
    match behavior(domain).activity {
        ActivityRule::OffStates => !is_off_state(&state.state),
        ActivityRule::Attribute { key, inactive } => match state.attribute_str(key) {
            Some(value) => !inactive.contains(&value),
            None => !is_off_state(&state.state),
        },
    }
}

/// Whether the entity counts as active for a category
///
/// `inverted` swaps the meaning of on and off but never makes an
/// unavailable, unknown or non-matching entity active.
pub fn is_active(domain: &str, filter: Option<&str>, state: &EntityState, inverted: bool) -> bool {
    counts_toward_total(domain, filter, state) && (is_on(domain, state) != inverted)
}
