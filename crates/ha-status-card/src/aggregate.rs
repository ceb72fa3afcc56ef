//! Domain aggregator

use ha_core::EntityState;
use serde::Serialize;

use crate::activity::{counts_toward_total, is_active};
use crate::category::Category;
use crate::classifier::ClassifiedEntities;

/// Active and total members of one category
///
/// Borrowed from the classified map it was derived from; recomputing is
/// linear in the size of the domain.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedGroup<'a> {
    pub category: Category,
    pub active: Vec<&'a EntityState>,
    pub total: Vec<&'a EntityState>,
}

impl<'a> AggregatedGroup<'a> {
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn total_count(&self) -> usize {
        self.total.len()
    }

    pub fn is_active(&self, entity_id: &str) -> bool {
        self.active.iter().any(|s| s.entity_id.as_str() == entity_id)
    }

    pub fn active_ids(&self) -> Vec<String> {
        self.active.iter().map(|s| s.entity_id.to_string()).collect()
    }
}

/// Split a category's classified entities into active and total
pub fn aggregate<'a>(
    classified: &'a ClassifiedEntities,
    category: &Category,
    inverted: bool,
) -> AggregatedGroup<'a> {
    let domain = category.domain.as_str();
    let filter = category.device_class.as_deref();

    let total: Vec<&EntityState> = classified
        .domain(domain)
        .iter()
        .filter(|s| counts_toward_total(domain, filter, s))
        .collect();
    let active = total
        .iter()
        .copied()
        .filter(|s| is_active(domain, filter, s, inverted))
        .collect();

    AggregatedGroup {
        category: category.clone(),
        active,
        total,
    }
}
