//! User actions for the DataTable.
//!
//! Renderers translate clicks into [`TableAction`]s and hand them to
//! [`DataTable::dispatch`]. The result says whether the action changed
//! anything worth redrawing.

use serde::Deserialize;
use serde::Serialize;

use crate::error::TableError;
use crate::identity::RowKey;
use crate::row::Row;

use super::state::DataTable;

/// A user interaction with a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum TableAction {
    /// Header click on a column.
    SortBy(String),
    /// Return to the unsorted order.
    ClearSort,
    /// Go to a page.
    SetPage(usize),
    /// Change the page size.
    SetPageSize(usize),
    /// Row checkbox click.
    ToggleRow(RowKey),
    /// "Select all" checkbox click with its new value.
    SelectAll(bool),
    /// Drop the whole selection.
    ClearSelection,
    /// Detail panel toggle click.
    ToggleExpanded(RowKey),
    /// Toolbar action click, by label.
    RunAction(String),
}

/// Result of dispatching an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The action did not apply to the table's current configuration.
    Ignored,
    /// The action was handled.
    Consumed,
}

impl EventResult {
    /// Returns `true` if the action was handled.
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

impl From<bool> for EventResult {
    fn from(consumed: bool) -> Self {
        if consumed {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}

impl<R: Row> DataTable<R> {
    /// Apply a user action.
    ///
    /// Fails only for an invalid page size or an unknown toolbar action.
    pub fn dispatch(&self, action: TableAction) -> Result<EventResult, TableError> {
        log::trace!("[table] {} dispatch {:?}", self.id(), action);
        let result = match action {
            TableAction::SortBy(column_id) => self.toggle_sort(&column_id).is_some().into(),
            TableAction::ClearSort => self.clear_sort().into(),
            TableAction::SetPage(page) => self.set_page(page).into(),
            TableAction::SetPageSize(page_size) => self.set_page_size(page_size)?.into(),
            TableAction::ToggleRow(key) => self.toggle_row(&key).is_some().into(),
            TableAction::SelectAll(checked) => self.select_all(checked).is_some().into(),
            TableAction::ClearSelection => (!self.clear_selection().is_empty()).into(),
            TableAction::ToggleExpanded(key) => self.toggle_expanded(&key).is_some().into(),
            TableAction::RunAction(label) => {
                self.run_action(&label)?;
                EventResult::Consumed
            }
        };
        Ok(result)
    }
}
