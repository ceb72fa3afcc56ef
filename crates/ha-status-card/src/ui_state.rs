//! Transient UI state owned by the host
//!
//! The engine's functions take this explicitly instead of keeping a
//! selection of their own. Nothing here is persisted to configuration.

use crate::category::Category;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    selected: Option<Category>,
    show_all: bool,
    confirmation_pending: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the drill-down for a category, discarding any previous selection
    pub fn select(&mut self, category: Category) {
        self.selected = Some(category);
        self.confirmation_pending = false;
    }

    /// Close the drill-down
    pub fn close(&mut self) {
        self.selected = None;
        self.show_all = false;
        self.confirmation_pending = false;
    }

    pub fn selected(&self) -> Option<&Category> {
        self.selected.as_ref()
    }

    /// Flip between "active only" and "all entities"
    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    /// Ask for the yes/no gate before a category-wide turn on/off
    ///
    /// Returns false when no category is selected.
    pub fn request_bulk_toggle(&mut self) -> bool {
        self.confirmation_pending = self.selected.is_some();
        self.confirmation_pending
    }

    pub fn confirmation_pending(&self) -> bool {
        self.confirmation_pending
    }

    /// Answer "no"
    pub fn cancel_bulk_toggle(&mut self) {
        self.confirmation_pending = false;
    }

    /// Answer "yes": clears the gate and hands back the category to toggle
    pub fn take_confirmed(&mut self) -> Option<Category> {
        if !std::mem::take(&mut self.confirmation_pending) {
            return None;
        }
        self.selected.clone()
    }
}
