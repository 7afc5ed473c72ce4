//! Selection state management.
//!
//! Selection tracks rows by [`RowKey`] so it stays stable while the visible
//! rows are re-sorted or re-paged. Keys are kept in the order they were
//! selected.

use std::collections::HashSet;

use crate::identity::RowKey;

/// State of a "select all" checkbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckState {
    /// Nothing selected.
    #[default]
    Unchecked,
    /// Some, but not all, selectable rows are selected.
    Indeterminate,
    /// Every selectable row is selected.
    Checked,
}

/// Ordered, key-based selection.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Selected keys in selection order.
    order: Vec<RowKey>,
    /// Membership index over `order`.
    members: HashSet<RowKey>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected keys in selection order.
    pub fn selected(&self) -> &[RowKey] {
        &self.order
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.members.contains(key)
    }

    /// Get the number of selected keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Toggle a key: remove it if selected, append it otherwise.
    ///
    /// Returns `true` if the key is selected afterwards.
    pub fn toggle(&mut self, key: &RowKey) -> bool {
        if self.members.remove(key) {
            self.order.retain(|k| k != key);
            false
        } else {
            self.members.insert(key.clone());
            self.order.push(key.clone());
            true
        }
    }

    /// Replace the selection with `keys`, in the given order.
    ///
    /// Repeated keys are only kept once.
    pub fn select_all<'a>(&mut self, keys: impl IntoIterator<Item = &'a RowKey>) {
        self.clear();
        for key in keys {
            if self.members.insert(key.clone()) {
                self.order.push(key.clone());
            }
        }
    }

    /// Clear all selection.
    /// Returns the keys that were deselected.
    pub fn clear(&mut self) -> Vec<RowKey> {
        self.members.clear();
        std::mem::take(&mut self.order)
    }

    /// Returns the "select all" checkbox state given how many rows are
    /// selectable.
    pub fn check_state(&self, selectable: usize) -> CheckState {
        let selected = self.len();
        if selectable > 0 && selected == selectable {
            CheckState::Checked
        } else if selected > 0 && selected < selectable {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }
}
