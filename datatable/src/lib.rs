//! Headless data-table engine.
//!
//! `datatable` owns the state behind an interactive table of records and
//! leaves drawing to the caller:
//!
//! - Row identity: a natural primary key or a generated one per row
//! - Stable single-column sorting driven by header clicks
//! - Paging with filler rows that keep short pages at full height
//! - Key-based selection that survives sorting and paging
//! - Expandable detail panels and toolbar actions on the selection
//!
//! # Example
//!
//! ```
//! use datatable::prelude::*;
//!
//! let rows: Vec<Record> = vec![
//!     Record::new().set("code", "IT").set("name", "Italy"),
//!     Record::new().set("code", "FR").set("name", "France"),
//!     Record::new().set("code", "DE").set("name", "Germany"),
//! ];
//!
//! let config = TableConfig::new(vec![
//!     Column::new("code", "Code"),
//!     Column::new("name", "Name"),
//! ])
//! .primary_key("code")
//! .options(TableOptions::default().with_sorting(true).with_selection(true));
//!
//! let table = DataTable::with_data(config, rows).unwrap();
//! table.toggle_sort("name");
//! table.toggle_row(&RowKey::from("FR"));
//!
//! let names: Vec<String> = table
//!     .view()
//!     .rows
//!     .iter()
//!     .map(|r| table.cell_text(&r.row, "name").unwrap_or_default())
//!     .collect();
//! assert_eq!(names, ["France", "Germany", "Italy"]);
//! assert!(table.is_selected(&RowKey::from("FR")));
//! ```

pub mod column;
pub mod error;
pub mod identity;
pub mod options;
pub mod page;
pub mod row;
pub mod selection;
pub mod sort;
pub mod table;
pub mod value;
pub mod view;

pub use column::{CellPadding, Column, ColumnHeader, Formatter};
pub use error::{ConfigError, TableError};
pub use identity::{ResolvedRows, RowKey, SYNTHETIC_KEY_FIELD, resolve};
pub use options::{Dimension, SelectionColor, TableOptions};
pub use page::{PageInfo, PageState};
pub use row::{Record, Row};
pub use selection::{CheckState, Selection};
pub use sort::{Comparator, SortDirection, SortState, stable_sort};
pub use table::{
    DataTable, EventResult, SelectionAction, TableAction, TableConfig, TableId, TableView,
    Toolbar, ViewRow,
};
pub use value::Value;
pub use view::{VisibleRows, compute_visible_rows};

pub mod prelude {
    pub use crate::column::{Column, ColumnHeader};
    pub use crate::error::{ConfigError, TableError};
    pub use crate::identity::RowKey;
    pub use crate::options::TableOptions;
    pub use crate::row::{Record, Row};
    pub use crate::selection::CheckState;
    pub use crate::sort::SortDirection;
    pub use crate::table::{DataTable, EventResult, SelectionAction, TableAction, TableConfig};
    pub use crate::value::Value;
}
