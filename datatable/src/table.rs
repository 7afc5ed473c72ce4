//! Table engine - the stateful handle tying identity, sorting, paging and
//! selection together.
//!
//! A [`DataTable`] is built from a [`TableConfig`] and fed datasets with
//! [`DataTable::set_data`]. Renderers read [`DataTable::view`],
//! [`DataTable::headers`], [`DataTable::page_info`] and
//! [`DataTable::toolbar`], and report user input through
//! [`DataTable::dispatch`] or the matching direct methods.

mod config;
mod events;
mod state;

pub use config::{DetailRenderer, RowPredicate, SelectionAction, SelectionObserver, TableConfig};
pub use events::{EventResult, TableAction};
pub use state::{DataTable, TableId, TableView, Toolbar, ViewRow};
