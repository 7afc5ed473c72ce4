//! Table construction config.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::column::Column;
use crate::column::validate_columns;
use crate::error::ConfigError;
use crate::identity::SYNTHETIC_KEY_FIELD;
use crate::options::TableOptions;

/// Receives the full selection, as rows, after every selection change.
pub type SelectionObserver<R> = Arc<dyn Fn(&[R]) + Send + Sync>;

/// Decides whether a row's selection checkbox is disabled.
pub type RowPredicate<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// Renders the detail panel of an expanded row.
pub type DetailRenderer<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// A toolbar action run on the selected rows.
pub struct SelectionAction<R> {
    /// Label, also used as the action's lookup key.
    pub label: String,
    /// Icon name for the renderer.
    pub icon: String,
    on_click: Arc<dyn Fn(&[R]) + Send + Sync>,
}

impl<R> SelectionAction<R> {
    /// Create a new action.
    pub fn new<F>(label: impl Into<String>, icon: impl Into<String>, on_click: F) -> Self
    where
        F: Fn(&[R]) + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            icon: icon.into(),
            on_click: Arc::new(on_click),
        }
    }

    /// Run the action on `rows`.
    pub fn run(&self, rows: &[R]) {
        (self.on_click)(rows)
    }
}

impl<R> Clone for SelectionAction<R> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            icon: self.icon.clone(),
            on_click: Arc::clone(&self.on_click),
        }
    }
}

impl<R> fmt::Debug for SelectionAction<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionAction")
            .field("label", &self.label)
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}

/// Everything needed to build a [`DataTable`](super::DataTable).
///
/// # Example
///
/// ```
/// use datatable::{Column, Record, TableConfig, TableOptions};
///
/// let config = TableConfig::new(vec![
///     Column::<Record>::new("code", "Code"),
///     Column::new("name", "Name"),
/// ])
/// .primary_key("code")
/// .options(TableOptions::default().with_selection(true))
/// .disabled(|row: &Record| row.get("code").and_then(|v| v.as_str()) == Some("US"));
/// ```
pub struct TableConfig<R> {
    pub(crate) columns: Vec<Column<R>>,
    pub(crate) primary_key: String,
    pub(crate) options: TableOptions,
    pub(crate) title: Option<String>,
    pub(crate) on_selection_change: Option<SelectionObserver<R>>,
    pub(crate) detail_panel: Option<DetailRenderer<R>>,
    pub(crate) disabled: Option<RowPredicate<R>>,
    pub(crate) actions: Vec<SelectionAction<R>>,
}

impl<R> TableConfig<R> {
    /// Create a config with the given columns and default everything else.
    ///
    /// The primary key defaults to [`SYNTHETIC_KEY_FIELD`], which generates a
    /// key per row.
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            primary_key: SYNTHETIC_KEY_FIELD.to_string(),
            options: TableOptions::default(),
            title: None,
            on_selection_change: None,
            detail_panel: None,
            disabled: None,
            actions: Vec::new(),
        }
    }

    /// Set the field holding each row's unique key.
    pub fn primary_key(mut self, field: impl Into<String>) -> Self {
        self.primary_key = field.into();
        self
    }

    /// Set the table options.
    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the toolbar title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Observe selection changes.
    pub fn on_selection_change<F>(mut self, observer: F) -> Self
    where
        F: Fn(&[R]) + Send + Sync + 'static,
    {
        self.on_selection_change = Some(Arc::new(observer));
        self
    }

    /// Enable expandable detail panels.
    pub fn detail_panel<F>(mut self, render: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        self.detail_panel = Some(Arc::new(render));
        self
    }

    /// Disable selection of rows matching `predicate`.
    pub fn disabled<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.disabled = Some(Arc::new(predicate));
        self
    }

    /// Add a toolbar action.
    pub fn action(mut self, action: SelectionAction<R>) -> Self {
        self.actions.push(action);
        self
    }

    /// Validates columns, primary key, options and action labels.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_columns(&self.columns)?;
        if self.primary_key.trim().is_empty() {
            return Err(ConfigError::EmptyPrimaryKey);
        }
        self.options.validate()?;
        let mut labels = HashSet::with_capacity(self.actions.len());
        for action in &self.actions {
            if !labels.insert(action.label.as_str()) {
                return Err(ConfigError::DuplicateAction {
                    label: action.label.clone(),
                });
            }
        }
        Ok(())
    }
}

impl<R> fmt::Debug for TableConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableConfig")
            .field("columns", &self.columns)
            .field("primary_key", &self.primary_key)
            .field("options", &self.options)
            .field("title", &self.title)
            .field("on_selection_change", &self.on_selection_change.is_some())
            .field("detail_panel", &self.detail_panel.is_some())
            .field("disabled", &self.disabled.is_some())
            .field("actions", &self.actions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Record;

    fn columns() -> Vec<Column<Record>> {
        vec![Column::new("code", "Code"), Column::new("name", "Name")]
    }

    #[test]
    fn test_defaults() {
        let config = TableConfig::new(columns());
        assert_eq!(config.primary_key, SYNTHETIC_KEY_FIELD);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_primary_key() {
        let config = TableConfig::new(columns()).primary_key("");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPrimaryKey)
        ));
    }

    #[test]
    fn test_rejects_duplicate_actions() {
        let config = TableConfig::new(columns())
            .action(SelectionAction::new("Delete", "delete", |_: &[Record]| {}))
            .action(SelectionAction::new("Delete", "trash", |_: &[Record]| {}));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateAction { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_options() {
        let config =
            TableConfig::new(columns()).options(TableOptions::default().with_page_size(0));
        assert!(matches!(config.validate(), Err(ConfigError::ZeroPageSize)));
    }
}
