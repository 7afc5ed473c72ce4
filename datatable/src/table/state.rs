//! Table state.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::column::{Column, ColumnHeader};
use crate::error::{ConfigError, TableError};
use crate::identity::{ResolvedRows, RowKey, resolve};
use crate::options::{SelectionColor, TableOptions};
use crate::page::{PageInfo, PageState, validate_page_size};
use crate::row::Row;
use crate::selection::{CheckState, Selection};
use crate::sort::{SortDirection, SortState};
use crate::view::{ViewParams, compute_visible_rows, padding_height};

use super::config::{SelectionObserver, TableConfig};

/// Unique identifier for a DataTable instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__datatable_{}", self.0)
    }
}

/// One row of a [`TableView`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow<R> {
    /// Row key.
    pub key: RowKey,
    /// Index of the row in the dataset.
    pub index: usize,
    /// The row itself.
    pub row: R,
    /// Whether the row is selected.
    pub selected: bool,
    /// Whether the row's selection checkbox is disabled.
    pub disabled: bool,
    /// Whether the row's detail panel is open.
    pub expanded: bool,
}

/// The rows a renderer draws for the current sort and page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<R> {
    /// Visible rows in display order.
    pub rows: Vec<ViewRow<R>>,
    /// Number of empty filler rows after the visible rows.
    pub padding: usize,
    /// Pixel height of the filler rows.
    pub padding_height: u32,
    /// Total rows in the dataset.
    pub total: usize,
}

impl<R> TableView<R> {
    /// Returns `true` when the dataset is empty and the renderer should draw
    /// its "no rows" placeholder.
    pub fn is_empty_placeholder(&self) -> bool {
        self.total == 0
    }
}

/// What a toolbar needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolbar {
    /// Table title, shown while nothing is selected.
    pub title: Option<String>,
    /// Number of selected rows.
    pub selected: usize,
    /// Whether the toolbar shows the selection highlight.
    pub highlighted: bool,
    /// Highlight color.
    pub color: SelectionColor,
    /// `(label, icon)` of the actions to offer; empty while nothing is selected.
    pub actions: Vec<(String, String)>,
}

/// Internal state for the DataTable.
pub(super) struct TableInner<R> {
    /// Immutable construction config.
    pub config: TableConfig<R>,
    /// The current dataset with its keys.
    pub data: ResolvedRows<R>,
    /// Current sort.
    pub sort: SortState<R>,
    /// Current page.
    pub page: PageState,
    /// Selected row keys.
    pub selection: Selection,
    /// Keys of rows with an open detail panel.
    pub expanded: HashSet<RowKey>,
}

/// Selection observer call prepared under the lock and run after it.
pub(super) type Notice<R> = Option<(SelectionObserver<R>, Vec<R>)>;

impl<R: Row> TableInner<R> {
    fn new(config: TableConfig<R>) -> Result<Self, ConfigError> {
        config.validate()?;
        let options = &config.options;
        let page = PageState::new(options.page_size, options.page_size_options.clone())?;
        let sort = if options.sorting {
            initial_sort(&config.columns)
        } else {
            SortState::new()
        };
        Ok(Self {
            config,
            data: ResolvedRows::default(),
            sort,
            page,
            selection: Selection::new(),
            expanded: HashSet::new(),
        })
    }

    fn options(&self) -> &TableOptions {
        &self.config.options
    }

    fn column(&self, id: &str) -> Option<&Column<R>> {
        self.config.columns.iter().find(|c| c.id == id)
    }

    fn is_disabled(&self, row: &R) -> bool {
        self.config
            .disabled
            .as_ref()
            .is_some_and(|predicate| predicate(row))
    }

    /// Keys of rows `select_all` would select, in dataset order.
    fn selectable_keys(&self) -> Vec<RowKey> {
        self.data
            .rows()
            .iter()
            .zip(self.data.keys())
            .filter(|(row, _)| !self.is_disabled(row))
            .map(|(_, key)| key.clone())
            .collect()
    }

    fn selectable_count(&self) -> usize {
        self.data
            .rows()
            .iter()
            .filter(|row| !self.is_disabled(row))
            .count()
    }

    /// Selected rows in selection order. Keys without a row are skipped.
    pub(super) fn selected_rows(&self) -> Vec<R> {
        self.selection
            .selected()
            .iter()
            .filter_map(|key| self.data.row_by_key(key).cloned())
            .collect()
    }

    pub(super) fn notice(&self) -> Notice<R> {
        self.config
            .on_selection_change
            .as_ref()
            .map(|observer| (Arc::clone(observer), self.selected_rows()))
    }

    fn set_data(&mut self, data: Arc<[R]>) -> bool {
        let had_selection = !self.selection.is_empty();
        self.data = resolve(data, &self.config.primary_key);
        self.selection.clear();
        self.expanded.clear();
        self.page.reset();
        self.warn_unmapped_columns();
        had_selection
    }

    fn warn_unmapped_columns(&self) {
        let Some(first) = self.data.rows().first() else {
            return;
        };
        for column in &self.config.columns {
            if column.formatter.is_none() && !first.has_field(&column.id) {
                log::warn!(
                    "[table] Column '{}' has no formatter and no matching row field",
                    column.id
                );
            }
        }
    }

    pub(super) fn toggle_sort(&mut self, column_id: &str) -> Option<(String, SortDirection)> {
        if !self.options().sorting {
            return None;
        }
        let column = self.column(column_id)?;
        if !column.sortable {
            return None;
        }
        let comparator = column.comparator.clone();
        self.sort.activate(column_id, comparator);
        log::debug!("[table] Sort by '{}' {}", column_id, self.sort.direction);
        Some((column_id.to_string(), self.sort.direction))
    }

    pub(super) fn clear_sort(&mut self) -> bool {
        if !self.sort.is_active() {
            return false;
        }
        self.sort.clear();
        log::debug!("[table] Sort cleared");
        true
    }

    pub(super) fn set_page(&mut self, page: usize) -> bool {
        let changed = self.page.set_page(page, self.data.len());
        if changed {
            log::debug!("[table] Page {}", self.page.page());
        }
        changed
    }

    pub(super) fn set_page_size(&mut self, page_size: usize) -> Result<(), ConfigError> {
        self.page.set_page_size(page_size)?;
        log::debug!("[table] Page size {}", page_size);
        Ok(())
    }

    /// Returns whether the key is selected afterwards, or `None` when
    /// selection is disabled.
    pub(super) fn toggle_row(&mut self, key: &RowKey) -> Option<bool> {
        if !self.options().selection {
            return None;
        }
        let selected = self.selection.toggle(key);
        log::debug!("[table] Row '{}' selected: {}", key, selected);
        Some(selected)
    }

    /// Returns the number of selected rows, or `None` when selection is
    /// disabled.
    pub(super) fn select_all(&mut self, checked: bool) -> Option<usize> {
        if !self.options().selection {
            return None;
        }
        if checked {
            let keys = self.selectable_keys();
            self.selection.select_all(&keys);
        } else {
            self.selection.clear();
        }
        log::debug!("[table] Select all {}: {} rows", checked, self.selection.len());
        Some(self.selection.len())
    }

    pub(super) fn clear_selection(&mut self) -> Vec<RowKey> {
        self.selection.clear()
    }

    /// Returns whether the row is expanded afterwards, or `None` when no
    /// detail panel is configured.
    pub(super) fn toggle_expanded(&mut self, key: &RowKey) -> Option<bool> {
        self.config.detail_panel.as_ref()?;
        let expanded = if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.clone());
            true
        };
        Some(expanded)
    }

    fn view(&self) -> TableView<R> {
        let options = self.options();
        let params = ViewParams {
            sort: options.sorting.then_some(&self.sort),
            page: options.paging.then_some(&self.page),
            show_empty_rows: options.show_empty_rows,
        };
        let visible = compute_visible_rows(self.data.rows(), &params);
        let rows = visible
            .indices
            .iter()
            .map(|&index| {
                let row = &self.data.rows()[index];
                let key = self.data.keys()[index].clone();
                ViewRow {
                    selected: self.selection.is_selected(&key),
                    disabled: self.is_disabled(row),
                    expanded: self.expanded.contains(&key),
                    key,
                    index,
                    row: row.clone(),
                }
            })
            .collect();
        TableView {
            rows,
            padding: visible.padding,
            padding_height: padding_height(visible.padding, options.dense),
            total: self.data.len(),
        }
    }

    fn headers(&self) -> Vec<ColumnHeader> {
        let sorting = self.options().sorting;
        self.config
            .columns
            .iter()
            .map(|column| {
                let indicator = self.sort.indicator(&column.id);
                ColumnHeader {
                    id: column.id.clone(),
                    label: column.label.clone(),
                    numeric: column.numeric,
                    sortable: sorting && column.sortable,
                    active: indicator.is_some(),
                    direction: indicator.unwrap_or_default(),
                    padding: column.padding,
                }
            })
            .collect()
    }

    fn toolbar(&self) -> Option<Toolbar> {
        let options = self.options();
        if !options.show_toolbar {
            return None;
        }
        let selected = self.selection.len();
        let actions = if selected > 0 {
            self.config
                .actions
                .iter()
                .map(|a| (a.label.clone(), a.icon.clone()))
                .collect()
        } else {
            Vec::new()
        };
        Some(Toolbar {
            title: self.config.title.clone(),
            selected,
            highlighted: selected > 0,
            color: options.selection_color,
            actions,
        })
    }
}

/// Initial sort from the columns marked with a default sort. The last marked
/// column wins.
fn initial_sort<R>(columns: &[Column<R>]) -> SortState<R> {
    let mut marked = columns.iter().filter(|c| c.default_sort.is_some());
    let Some(mut chosen) = marked.next() else {
        return SortState::new();
    };
    let mut count = 1;
    for column in marked {
        chosen = column;
        count += 1;
    }
    if count > 1 {
        log::warn!(
            "[table] {} columns have a default sort, using '{}'",
            count,
            chosen.id
        );
    }
    SortState::by(
        chosen.id.clone(),
        chosen.default_sort.unwrap_or_default(),
        chosen.comparator.clone(),
    )
}

/// A data table engine with stable sorting, paging and selection.
///
/// `DataTable<R>` owns everything derived from a dataset:
/// - Row keys (natural or generated)
/// - Sort state driven by header clicks
/// - Page state
/// - Ordered, key-based selection with an observer
/// - Expanded detail panels
///
/// The handle is cheap to clone; clones share the same state. All mutation is
/// serialized behind one lock. Selection observers and toolbar actions run
/// after the lock is released and may call back into the table; predicates,
/// comparators and formatters run under the lock and must not.
pub struct DataTable<R: Row> {
    /// Unique identifier.
    id: TableId,
    /// Internal state.
    pub(super) inner: Arc<RwLock<TableInner<R>>>,
    /// Dirty flag for re-render.
    pub(super) dirty: Arc<AtomicBool>,
}

impl<R: Row> DataTable<R> {
    /// Create a new table with no rows.
    pub fn new(config: TableConfig<R>) -> Result<Self, ConfigError> {
        let inner = TableInner::new(config)?;
        Ok(Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(inner)),
            dirty: Arc::new(AtomicBool::new(true)),
        })
    }

    /// Create a table with initial rows.
    pub fn with_data(
        config: TableConfig<R>,
        data: impl Into<Arc<[R]>>,
    ) -> Result<Self, ConfigError> {
        let table = Self::new(config)?;
        table.set_data(data);
        Ok(table)
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    pub(super) fn notify(&self, notice: Notice<R>) {
        if let Some((observer, rows)) = notice {
            observer(&rows);
        }
    }

    // -------------------------------------------------------------------------
    // Config access
    // -------------------------------------------------------------------------

    /// Get the table options.
    pub fn options(&self) -> TableOptions {
        self.inner
            .read()
            .map(|g| g.config.options.clone())
            .unwrap_or_default()
    }

    /// Get the column definitions.
    pub fn columns(&self) -> Vec<Column<R>> {
        self.inner
            .read()
            .map(|g| g.config.columns.clone())
            .unwrap_or_default()
    }

    /// Number of cells a full-width row spans: the columns plus the detail
    /// toggle and selection checkbox columns when enabled.
    pub fn col_span(&self) -> usize {
        self.inner
            .read()
            .map(|g| {
                g.config.columns.len()
                    + usize::from(g.config.detail_panel.is_some())
                    + usize::from(g.config.options.selection)
            })
            .unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Replace the dataset.
    ///
    /// Passing the same `Arc` as the current dataset does nothing. Any other
    /// dataset, even an identical copy, gets fresh keys, an empty selection,
    /// no expanded rows and page 0.
    ///
    /// Returns `false` if the dataset was unchanged.
    pub fn set_data(&self, data: impl Into<Arc<[R]>>) -> bool {
        let data = data.into();
        let mut notice = None;
        if let Ok(mut guard) = self.inner.write() {
            if Arc::ptr_eq(guard.data.source(), &data) {
                return false;
            }
            if guard.set_data(data) {
                notice = guard.notice();
            }
            log::debug!("[table] {} dataset replaced ({} rows)", self.id, guard.data.len());
        } else {
            return false;
        }
        self.mark_dirty();
        self.notify(notice);
        true
    }

    /// Get the current dataset.
    pub fn data(&self) -> Arc<[R]> {
        self.inner
            .read()
            .map(|g| Arc::clone(g.data.source()))
            .unwrap_or_else(|_| Arc::from(Vec::new()))
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.data.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the key of the row at dataset `index`.
    pub fn key_at(&self, index: usize) -> Option<RowKey> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.data.key(index).cloned())
    }

    /// Find a row by key.
    pub fn row(&self, key: &RowKey) -> Option<R> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.data.row_by_key(key).cloned())
    }

    /// Fails if two rows of the current dataset share a key.
    pub fn check_unique(&self) -> Result<(), TableError> {
        self.inner
            .read()
            .map(|g| g.data.check_unique())
            .unwrap_or(Ok(()))
    }

    /// Display text of `column_id`'s cell in `row`.
    pub fn cell_text(&self, row: &R, column_id: &str) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.column(column_id).map(|c| c.cell_text(row)))
    }

    /// Whether `row`'s selection checkbox is disabled.
    pub fn is_row_disabled(&self, row: &R) -> bool {
        self.inner
            .read()
            .map(|g| g.is_disabled(row))
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Compute the rows to draw for the current sort and page.
    pub fn view(&self) -> TableView<R> {
        self.inner
            .read()
            .map(|g| g.view())
            .unwrap_or_else(|_| TableView {
                rows: Vec::new(),
                padding: 0,
                padding_height: 0,
                total: 0,
            })
    }

    /// Get the header state of every column.
    pub fn headers(&self) -> Vec<ColumnHeader> {
        self.inner
            .read()
            .map(|g| g.headers())
            .unwrap_or_default()
    }

    /// Get the toolbar state, or `None` if the toolbar is hidden.
    pub fn toolbar(&self) -> Option<Toolbar> {
        self.inner.read().ok().and_then(|g| g.toolbar())
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Get current sort state as (column id, direction).
    pub fn sort(&self) -> Option<(String, SortDirection)> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.sort.order_by.clone().map(|id| (id, g.sort.direction)))
    }

    /// Apply a header click on `column_id`.
    ///
    /// An inactive column becomes the ascending sort column; the active
    /// column flips direction. Returns the new sort, or `None` if sorting is
    /// disabled or the column is unknown or unsortable.
    pub fn toggle_sort(&self, column_id: &str) -> Option<(String, SortDirection)> {
        let result = self
            .inner
            .write()
            .ok()
            .and_then(|mut g| g.toggle_sort(column_id));
        if result.is_some() {
            self.mark_dirty();
        }
        result
    }

    /// Clear sort state. Header clicks never do this.
    pub fn clear_sort(&self) -> bool {
        let changed = self
            .inner
            .write()
            .map(|mut g| g.clear_sort())
            .unwrap_or(false);
        if changed {
            self.mark_dirty();
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Paging
    // -------------------------------------------------------------------------

    /// Get the pager state.
    pub fn page_info(&self) -> PageInfo {
        self.inner
            .read()
            .map(|g| g.page.info(g.data.len()))
            .unwrap_or_else(|_| PageState::default().info(0))
    }

    /// Go to `page`, clamped to the last page.
    pub fn set_page(&self, page: usize) -> bool {
        let changed = self
            .inner
            .write()
            .map(|mut g| g.set_page(page))
            .unwrap_or(false);
        if changed {
            self.mark_dirty();
        }
        changed
    }

    /// Change the page size and return to page 0.
    ///
    /// Returns `false` if the state could not be written (poisoned lock);
    /// an invalid size is rejected either way.
    pub fn set_page_size(&self, page_size: usize) -> Result<bool, ConfigError> {
        validate_page_size(page_size)?;
        let applied = match self.inner.write() {
            Ok(mut guard) => {
                guard.set_page_size(page_size)?;
                true
            }
            Err(_) => false,
        };
        if applied {
            self.mark_dirty();
        }
        Ok(applied)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Get all selected keys in selection order.
    pub fn selected_keys(&self) -> Vec<RowKey> {
        self.inner
            .read()
            .map(|g| g.selection.selected().to_vec())
            .unwrap_or_default()
    }

    /// Get all selected rows in selection order.
    pub fn selected_rows(&self) -> Vec<R> {
        self.inner
            .read()
            .map(|g| g.selected_rows())
            .unwrap_or_default()
    }

    /// Check if a row is selected by key.
    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.inner
            .read()
            .map(|g| g.selection.is_selected(key))
            .unwrap_or(false)
    }

    /// Number of rows `select_all` would select.
    pub fn selectable_count(&self) -> usize {
        self.inner
            .read()
            .map(|g| g.selectable_count())
            .unwrap_or(0)
    }

    /// State of the "select all" checkbox.
    pub fn select_all_state(&self) -> CheckState {
        self.inner
            .read()
            .map(|g| g.selection.check_state(g.selectable_count()))
            .unwrap_or_default()
    }

    /// Toggle selection of a row by key.
    ///
    /// The key is not checked against the disabled predicate or the dataset;
    /// renderers must not offer the checkbox of a disabled row.
    ///
    /// Returns whether the row is selected afterwards, or `None` if selection
    /// is disabled.
    pub fn toggle_row(&self, key: &RowKey) -> Option<bool> {
        let mut notice = None;
        let result = self.inner.write().ok().and_then(|mut g| {
            let result = g.toggle_row(key);
            if result.is_some() {
                notice = g.notice();
            }
            result
        });
        if result.is_some() {
            self.mark_dirty();
            self.notify(notice);
        }
        result
    }

    /// Select every row whose checkbox is not disabled, or clear the
    /// selection when `checked` is false.
    ///
    /// Returns the number of selected rows, or `None` if selection is
    /// disabled.
    pub fn select_all(&self, checked: bool) -> Option<usize> {
        let mut notice = None;
        let result = self.inner.write().ok().and_then(|mut g| {
            let result = g.select_all(checked);
            if result.is_some() {
                notice = g.notice();
            }
            result
        });
        if result.is_some() {
            self.mark_dirty();
            self.notify(notice);
        }
        result
    }

    /// Clear all selection.
    /// Returns the keys that were deselected.
    pub fn clear_selection(&self) -> Vec<RowKey> {
        let mut notice = None;
        let removed = self
            .inner
            .write()
            .map(|mut g| {
                let removed = g.clear_selection();
                if !removed.is_empty() {
                    notice = g.notice();
                }
                removed
            })
            .unwrap_or_default();
        if !removed.is_empty() {
            self.mark_dirty();
            self.notify(notice);
        }
        removed
    }

    /// Run the toolbar action labelled `label` on the selected rows.
    pub fn run_action(&self, label: &str) -> Result<(), TableError> {
        let (action, rows) = {
            let guard = match self.inner.read() {
                Ok(guard) => guard,
                Err(_) => return Ok(()),
            };
            let action = guard
                .config
                .actions
                .iter()
                .find(|a| a.label == label)
                .cloned()
                .ok_or_else(|| TableError::UnknownAction(label.to_string()))?;
            (action, guard.selected_rows())
        };
        log::debug!("[table] Action '{}' on {} rows", label, rows.len());
        action.run(&rows);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Detail panels
    // -------------------------------------------------------------------------

    /// Toggle the detail panel of a row.
    ///
    /// Returns whether the panel is open afterwards, or `None` if the table
    /// has no detail panel.
    pub fn toggle_expanded(&self, key: &RowKey) -> Option<bool> {
        let result = self
            .inner
            .write()
            .ok()
            .and_then(|mut g| g.toggle_expanded(key));
        if result.is_some() {
            self.mark_dirty();
        }
        result
    }

    /// Check if a row's detail panel is open.
    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.inner
            .read()
            .map(|g| g.expanded.contains(key))
            .unwrap_or(false)
    }

    /// Render the detail panel of an expanded row.
    pub fn detail(&self, key: &RowKey) -> Option<String> {
        let guard = self.inner.read().ok()?;
        if !guard.expanded.contains(key) {
            return None;
        }
        let render = guard.config.detail_panel.as_ref()?;
        guard.data.row_by_key(key).map(|row| render(row))
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the table has changed since the last [`clear_dirty`](Self::clear_dirty).
    ///
    /// A new table starts dirty so its first frame is always drawn.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<R: Row> Clone for DataTable<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<R: Row> std::fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("id", &self.id)
            .field("rows", &self.len())
            .field("sort", &self.sort())
            .finish_non_exhaustive()
    }
}
