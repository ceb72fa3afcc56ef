//! Identity-keyed memoization
//!
//! A value is reused only while the registry snapshot, the live-state
//! snapshot and the configuration are the very same `Arc`s it was computed
//! from. Any replacement invalidates the whole entry.

use std::sync::{Arc, RwLock};

use ha_config::CardConfig;
use ha_core::LiveStates;
use ha_registries::RegistrySnapshot;
use tracing::trace;

use crate::card::HomeSnapshot;

struct Entry<V> {
    registry: Arc<RegistrySnapshot>,
    states: Arc<LiveStates>,
    config: Arc<CardConfig>,
    value: Arc<V>,
}

impl<V> Entry<V> {
    fn matches(&self, home: &HomeSnapshot, config: &Arc<CardConfig>) -> bool {
        Arc::ptr_eq(&self.registry, &home.registry)
            && Arc::ptr_eq(&self.states, &home.states)
            && Arc::ptr_eq(&self.config, config)
    }
}

/// Single-slot cache; holding the key `Arc`s keeps their addresses unique
pub(crate) struct Memo<V> {
    slot: RwLock<Option<Entry<V>>>,
}

impl<V> Default for Memo<V> {
    fn default() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }
}

impl<V> Memo<V> {
    pub(crate) fn get_or_compute(
        &self,
        home: &HomeSnapshot,
        config: &Arc<CardConfig>,
        compute: impl FnOnce() -> V,
    ) -> Arc<V> {
        if let Ok(slot) = self.slot.read() {
            if let Some(entry) = slot.as_ref().filter(|e| e.matches(home, config)) {
                trace!("Memo hit");
                return Arc::clone(&entry.value);
            }
        }

        let value = Arc::new(compute());
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(Entry {
                registry: Arc::clone(&home.registry),
                states: Arc::clone(&home.states),
                config: Arc::clone(config),
                value: Arc::clone(&value),
            });
        }
        value
    }

    pub(crate) fn clear(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }
}
