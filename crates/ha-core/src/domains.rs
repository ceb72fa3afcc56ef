//! Domain behavior table
//!
//! One row per entity domain the status engine understands. Every place that
//! needs per-domain knowledge (what counts as active, how device classes
//! match, how a toggle is executed, which icon to fall back to) reads it from
//! here instead of branching on the domain name itself.

use crate::state::attr;

/// States that count as "off" for every domain without a special rule
pub static STATES_OFF: &[&str] = &[
    "closed",
    "locked",
    "off",
    "docked",
    "idle",
    "standby",
    "paused",
    "auto",
    "not_home",
    "disarmed",
    "0",
];

/// Check if a raw state value is one of the generic off states
pub fn is_off_state(state: &str) -> bool {
    STATES_OFF.contains(&state)
}

/// Domains that can appear as categories. Anything else never aggregates.
pub static ALLOWED_DOMAINS: &[&str] = &[
    "alarm_control_panel",
    "siren",
    "lock",
    "light",
    "media_player",
    "climate",
    "switch",
    "vacuum",
    "fan",
    "cover",
    "binary_sensor",
    "humidifier",
    "lawn_mower",
    "valve",
    "water_heater",
    "remote",
    "update",
    "device_tracker",
    "input_boolean",
    "timer",
    "counter",
    "calendar",
    "person",
];

pub fn is_allowed_domain(domain: &str) -> bool {
    ALLOWED_DOMAINS.contains(&domain)
}

/// Domain whose entities skip the area/floor/label requirements
pub const UPDATE_DOMAIN: &str = "update";

/// How a category's device-class filter is matched against an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClassMatch {
    /// The entity's `device_class` attribute must equal the filter
    Exact,
    /// Like `Exact`, except the `switch` filter also accepts entities that
    /// have no device class at all
    SwitchOrUnset,
}

/// How "active" is decided for an entity of a domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityRule {
    /// Not one of [`STATES_OFF`]
    OffStates,
    /// When the entity exposes `key`, it is active unless the attribute is
    /// one of `inactive`; otherwise fall back to [`ActivityRule::OffStates`]
    Attribute {
        key: &'static str,
        inactive: &'static [&'static str],
    },
}

/// How a category-wide toggle is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleRule {
    /// One `<domain>.toggle` call with every entity id
    Bulk,
    /// One call per entity; `when_on` if the entity is not in an off state,
    /// `when_off` otherwise
    PerEntity {
        when_on: &'static str,
        when_off: &'static str,
    },
    /// No toggle semantics for this domain
    Unsupported,
}

/// Behavior row for a single domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainBehavior {
    pub domain: &'static str,
    pub device_class_match: DeviceClassMatch,
    pub activity: ActivityRule,
    pub toggle: ToggleRule,
    /// Fallback icon for the on/off exemplar state
    pub icon_on: &'static str,
    pub icon_off: &'static str,
}

const IDLE_OR_OFF: &[&str] = &["idle", "off"];

const fn row(
    domain: &'static str,
    toggle: ToggleRule,
    icon_on: &'static str,
    icon_off: &'static str,
) -> DomainBehavior {
    DomainBehavior {
        domain,
        device_class_match: DeviceClassMatch::Exact,
        activity: ActivityRule::OffStates,
        toggle,
        icon_on,
        icon_off,
    }
}

const fn per_entity(when_on: &'static str, when_off: &'static str) -> ToggleRule {
    ToggleRule::PerEntity { when_on, when_off }
}

static DOMAIN_TABLE: &[DomainBehavior] = &[
    row("light", ToggleRule::Bulk, "mdi:lightbulb", "mdi:lightbulb-outline"),
    DomainBehavior {
        device_class_match: DeviceClassMatch::SwitchOrUnset,
        ..row("switch", ToggleRule::Bulk, "mdi:toggle-switch", "mdi:toggle-switch-off")
    },
    row("fan", ToggleRule::Bulk, "mdi:fan", "mdi:fan-off"),
    row("cover", ToggleRule::Bulk, "mdi:window-open", "mdi:window-closed"),
    row("siren", ToggleRule::Bulk, "mdi:bullhorn", "mdi:bullhorn-outline"),
    DomainBehavior {
        activity: ActivityRule::Attribute {
            key: attr::HVAC_ACTION,
            inactive: IDLE_OR_OFF,
        },
        ..row("climate", ToggleRule::Bulk, "mdi:thermostat", "mdi:thermostat-cog")
    },
    DomainBehavior {
        activity: ActivityRule::Attribute {
            key: attr::ACTION,
            inactive: IDLE_OR_OFF,
        },
        ..row(
            "humidifier",
            ToggleRule::Bulk,
            "mdi:air-humidifier",
            "mdi:air-humidifier-off",
        )
    },
    row("valve", ToggleRule::Bulk, "mdi:valve-open", "mdi:valve-closed"),
    row("remote", ToggleRule::Bulk, "mdi:remote", "mdi:remote-off"),
    row(
        "media_player",
        per_entity("media_pause", "media_play"),
        "mdi:cast-connected",
        "mdi:cast-off",
    ),
    row("lock", per_entity("lock", "unlock"), "mdi:lock-open", "mdi:lock"),
    row(
        "vacuum",
        per_entity("stop", "start"),
        "mdi:robot-vacuum",
        "mdi:robot-vacuum-off",
    ),
    row(
        "alarm_control_panel",
        per_entity("alarm_arm_away", "alarm_disarm"),
        "mdi:shield-lock",
        "mdi:shield-off",
    ),
    row(
        "lawn_mower",
        per_entity("pause", "start_mowing"),
        "mdi:robot-mower",
        "mdi:robot-mower-outline",
    ),
    row(
        "water_heater",
        per_entity("turn_off", "turn_on"),
        "mdi:water-boiler",
        "mdi:water-boiler-off",
    ),
    row("update", per_entity("skip", "install"), "mdi:package-up", "mdi:package"),
    row(
        "binary_sensor",
        ToggleRule::Unsupported,
        "mdi:checkbox-marked-circle",
        "mdi:radiobox-blank",
    ),
    row(
        "device_tracker",
        ToggleRule::Unsupported,
        "mdi:account",
        "mdi:account-arrow-right",
    ),
    row(
        "input_boolean",
        ToggleRule::Unsupported,
        "mdi:check-circle-outline",
        "mdi:close-circle-outline",
    ),
    row("timer", ToggleRule::Unsupported, "mdi:timer-outline", "mdi:timer-off-outline"),
    row("counter", ToggleRule::Unsupported, "mdi:counter", "mdi:counter"),
    row("calendar", ToggleRule::Unsupported, "mdi:calendar", "mdi:calendar-blank"),
    row("person", ToggleRule::Unsupported, "mdi:account", "mdi:account-off"),
];

/// Behavior for domains missing from the table
static FALLBACK: DomainBehavior = row(
    "",
    ToggleRule::Unsupported,
    "mdi:help-circle",
    "mdi:help-circle-outline",
);

/// Look up the behavior row for a domain
///
/// Unknown domains get a row with default activity, exact device-class
/// matching and no toggle semantics.
pub fn behavior(domain: &str) -> &'static DomainBehavior {
    DOMAIN_TABLE
        .iter()
        .find(|b| b.domain == domain)
        .unwrap_or(&FALLBACK)
}

/// Device-class specific icons, checked before the domain row
static DEVICE_CLASS_ICONS: &[(&str, &str, &str, &str)] = &[
    ("switch", "outlet", "mdi:power-plug", "mdi:power-plug-off"),
    ("cover", "garage", "mdi:garage-open", "mdi:garage"),
    ("cover", "door", "mdi:door-open", "mdi:door-closed"),
    ("cover", "gate", "mdi:gate-open", "mdi:gate"),
    ("cover", "blind", "mdi:blinds-open", "mdi:blinds"),
    ("cover", "curtain", "mdi:curtains", "mdi:curtains-closed"),
    ("cover", "shutter", "mdi:window-shutter-open", "mdi:window-shutter"),
    ("binary_sensor", "door", "mdi:door-open", "mdi:door-closed"),
    ("binary_sensor", "garage_door", "mdi:garage-open", "mdi:garage"),
    ("binary_sensor", "window", "mdi:window-open", "mdi:window-closed"),
    ("binary_sensor", "opening", "mdi:square-outline", "mdi:square"),
    ("binary_sensor", "motion", "mdi:motion-sensor", "mdi:motion-sensor-off"),
    ("binary_sensor", "occupancy", "mdi:home", "mdi:home-outline"),
    ("binary_sensor", "presence", "mdi:home", "mdi:home-outline"),
    ("binary_sensor", "moisture", "mdi:water", "mdi:water-off"),
    ("binary_sensor", "smoke", "mdi:smoke-detector-alert", "mdi:smoke-detector"),
    ("binary_sensor", "gas", "mdi:alert-circle", "mdi:check-circle"),
    ("binary_sensor", "problem", "mdi:alert-circle", "mdi:check-circle"),
    ("binary_sensor", "lock", "mdi:lock-open", "mdi:lock"),
    ("binary_sensor", "plug", "mdi:power-plug", "mdi:power-plug-off"),
    ("binary_sensor", "battery", "mdi:battery-outline", "mdi:battery"),
    ("binary_sensor", "vibration", "mdi:vibrate", "mdi:crop-portrait"),
    (
        "binary_sensor",
        "connectivity",
        "mdi:check-network-outline",
        "mdi:close-network-outline",
    ),
];

/// Icon for a domain (and optional device class) in its on or off state
pub fn domain_icon(domain: &str, device_class: Option<&str>, on: bool) -> &'static str {
    let by_class = device_class.and_then(|class| {
        DEVICE_CLASS_ICONS
            .iter()
            .find(|(d, c, _, _)| *d == domain && *c == class)
            .map(|(_, _, icon_on, icon_off)| if on { *icon_on } else { *icon_off })
    });
    by_class.unwrap_or_else(|| {
        let row = behavior(domain);
        if on {
            row.icon_on
        } else {
            row.icon_off
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_states() {
        assert!(is_off_state("locked"));
        assert!(is_off_state("0"));
        assert!(!is_off_state("on"));
        assert!(!is_off_state("unlocked"));
    }

    #[test]
    fn test_allow_list() {
        assert!(is_allowed_domain("light"));
        assert!(is_allowed_domain("update"));
        assert!(!is_allowed_domain("sensor"));
        assert!(!is_allowed_domain("automation"));
    }

    #[test]
    fn test_every_allowed_domain_has_a_row() {
        for domain in ALLOWED_DOMAINS {
            assert_eq!(behavior(domain).domain, *domain);
        }
    }

    #[test]
    fn test_toggle_rules() {
        assert_eq!(behavior("light").toggle, ToggleRule::Bulk);
        assert_eq!(
            behavior("lock").toggle,
            ToggleRule::PerEntity {
                when_on: "lock",
                when_off: "unlock"
            }
        );
        assert_eq!(behavior("sensor").toggle, ToggleRule::Unsupported);
    }

    #[test]
    fn test_special_rows() {
        assert_eq!(
            behavior("switch").device_class_match,
            DeviceClassMatch::SwitchOrUnset
        );
        assert!(matches!(
            behavior("climate").activity,
            ActivityRule::Attribute { key: attr::HVAC_ACTION, .. }
        ));
        assert!(matches!(
            behavior("humidifier").activity,
            ActivityRule::Attribute { key: attr::ACTION, .. }
        ));
    }

    #[test]
    fn test_domain_icon() {
        assert_eq!(domain_icon("light", None, true), "mdi:lightbulb");
        assert_eq!(domain_icon("light", None, false), "mdi:lightbulb-outline");
        assert_eq!(domain_icon("binary_sensor", Some("door"), false), "mdi:door-closed");
        assert_eq!(domain_icon("switch", Some("outlet"), true), "mdi:power-plug");
        assert_eq!(domain_icon("switch", Some("switch"), true), "mdi:toggle-switch");
        assert_eq!(domain_icon("sensor", None, true), "mdi:help-circle");
    }
}
