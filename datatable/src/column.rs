//! Column descriptors.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::row::Row;
use crate::sort::Comparator;
use crate::sort::SortDirection;

/// Renders a row into a cell's display text.
pub type Formatter<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Cell padding hint passed through to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellPadding {
    #[default]
    Default,
    Checkbox,
    None,
}

/// Column configuration.
///
/// Columns define the header label, how a cell is displayed and how the
/// column sorts.
///
/// # Examples
///
/// ```
/// use datatable::{Column, Record, SortDirection};
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("name", "Name").default_sort(SortDirection::Asc),
///     Column::new("code", "ISO Code").unsortable(),
///     Column::new("population", "Population").numeric(),
/// ];
/// ```
pub struct Column<R> {
    /// Column id; names the row field unless a formatter is supplied.
    pub id: String,
    /// Header label.
    pub label: String,
    /// Numeric columns are right-aligned by renderers.
    pub numeric: bool,
    /// Whether header clicks sort by this column.
    pub sortable: bool,
    /// Sort applied when the table is created.
    pub default_sort: Option<SortDirection>,
    /// Ascending comparator replacing the field ordering.
    pub comparator: Option<Comparator<R>>,
    /// Cell text renderer replacing the field's display form.
    pub formatter: Option<Formatter<R>>,
    /// Cell padding hint.
    pub padding: CellPadding,
}

impl<R> Column<R> {
    /// Create a new sortable column.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            numeric: false,
            sortable: true,
            default_sort: None,
            comparator: None,
            formatter: None,
            padding: CellPadding::Default,
        }
    }

    /// Mark the column as numeric.
    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    /// Disable sorting on this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Sort by this column when the table is created.
    pub fn default_sort(mut self, direction: SortDirection) -> Self {
        self.default_sort = Some(direction);
        self
    }

    /// Set the cell padding hint.
    pub fn padding(mut self, padding: CellPadding) -> Self {
        self.padding = padding;
        self
    }

    /// Sort with a custom ascending comparator.
    pub fn comparator<F>(mut self, compare: F) -> Self
    where
        F: Fn(&R, &R) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(compare));
        self
    }

    /// Display cells with a custom formatter.
    pub fn formatter<F>(mut self, format: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(format));
        self
    }
}

impl<R: Row> Column<R> {
    /// Returns the display text of this column's cell in `row`.
    pub fn cell_text(&self, row: &R) -> String {
        match &self.formatter {
            Some(format) => format(row),
            None => row.field(&self.id).map(|v| v.to_string()).unwrap_or_default(),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            numeric: self.numeric,
            sortable: self.sortable,
            default_sort: self.default_sort,
            comparator: self.comparator.clone(),
            formatter: self.formatter.clone(),
            padding: self.padding,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("numeric", &self.numeric)
            .field("sortable", &self.sortable)
            .field("default_sort", &self.default_sort)
            .field("comparator", &self.comparator.is_some())
            .field("formatter", &self.formatter.is_some())
            .field("padding", &self.padding)
            .finish()
    }
}

/// Checks ids and labels of `columns`.
pub(crate) fn validate_columns<R>(columns: &[Column<R>]) -> Result<(), ConfigError> {
    let mut seen = HashSet::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        if column.id.trim().is_empty() {
            return Err(ConfigError::MissingColumnId { index });
        }
        if column.label.trim().is_empty() {
            return Err(ConfigError::MissingColumnLabel {
                id: column.id.clone(),
            });
        }
        if !seen.insert(column.id.as_str()) {
            return Err(ConfigError::DuplicateColumnId {
                id: column.id.clone(),
            });
        }
    }
    Ok(())
}

/// What a renderer needs to draw one header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    /// Column id.
    pub id: String,
    /// Header label.
    pub label: String,
    /// Numeric columns are right-aligned.
    pub numeric: bool,
    /// Whether clicking the header sorts.
    pub sortable: bool,
    /// Whether this column is the active sort column.
    pub active: bool,
    /// Direction to show on the sort indicator (ascending when inactive).
    pub direction: SortDirection,
    /// Cell padding hint.
    pub padding: CellPadding,
}
