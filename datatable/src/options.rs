//! Table options

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::page::DEFAULT_PAGE_SIZE;
use crate::page::DEFAULT_PAGE_SIZE_OPTIONS;
use crate::page::validate_page_size;
use crate::page::validate_page_size_options;

/// Color of selection checkboxes and the highlighted toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionColor {
    Primary,
    #[default]
    Secondary,
}

/// A container height: pixels or any CSS length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Pixels(u32),
    Css(String),
}

/// Feature switches and display options for a table.
///
/// Every option has a default, so only the options that differ need to be
/// set. Options can also be read from JSON with [`TableOptions::from_json`];
/// unknown keys and out-of-range enum values are rejected.
///
/// # Example
///
/// ```
/// use datatable::TableOptions;
///
/// let options = TableOptions::default()
///     .with_sorting(true)
///     .with_paging(true)
///     .with_page_size(25);
///
/// let parsed = TableOptions::from_json(r#"{"sorting": true, "paging": true, "pageSize": 25}"#)
///     .unwrap();
/// assert_eq!(options, parsed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TableOptions {
    /// Show selection checkboxes.
    ///
    /// Default: false
    pub selection: bool,

    /// Selection color.
    ///
    /// Default: secondary
    pub selection_color: SelectionColor,

    /// Sort by header clicks.
    ///
    /// Default: false
    pub sorting: bool,

    /// Split rows into pages.
    ///
    /// Default: false
    pub paging: bool,

    /// Rows per page.
    ///
    /// Default: 10
    #[serde(alias = "rowsPerPage")]
    pub page_size: usize,

    /// Page sizes offered by the pager.
    ///
    /// Default: [10, 25, 50, 100]
    #[serde(alias = "rowsPerPageOptions")]
    pub page_size_options: Vec<usize>,

    /// Use dense row height.
    ///
    /// Default: false
    pub dense: bool,

    /// Pad short pages with empty rows.
    ///
    /// Default: false
    pub show_empty_rows: bool,

    /// Show the title / selection toolbar.
    ///
    /// Default: true
    pub show_toolbar: bool,

    /// Keep the header visible while scrolling.
    ///
    /// Default: false
    pub sticky_header: bool,

    /// Minimum container height.
    pub min_height: Option<Dimension>,

    /// Maximum container height.
    pub max_height: Option<Dimension>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            selection: false,
            selection_color: SelectionColor::Secondary,
            sorting: false,
            paging: false,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            dense: false,
            show_empty_rows: false,
            show_toolbar: true,
            sticky_header: false,
            min_height: None,
            max_height: None,
        }
    }
}

impl TableOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates options from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks option values that the types alone cannot enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_page_size(self.page_size)?;
        validate_page_size_options(&self.page_size_options)
    }

    /// Enables or disables row selection.
    pub fn with_selection(mut self, selection: bool) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the selection color.
    pub fn with_selection_color(mut self, color: SelectionColor) -> Self {
        self.selection_color = color;
        self
    }

    /// Enables or disables sorting.
    pub fn with_sorting(mut self, sorting: bool) -> Self {
        self.sorting = sorting;
        self
    }

    /// Enables or disables paging.
    pub fn with_paging(mut self, paging: bool) -> Self {
        self.paging = paging;
        self
    }

    /// Sets the rows per page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the page sizes offered by the pager.
    pub fn with_page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    /// Enables or disables dense rows.
    pub fn with_dense(mut self, dense: bool) -> Self {
        self.dense = dense;
        self
    }

    /// Enables or disables filler rows on short pages.
    pub fn with_show_empty_rows(mut self, show: bool) -> Self {
        self.show_empty_rows = show;
        self
    }

    /// Shows or hides the toolbar.
    pub fn with_show_toolbar(mut self, show: bool) -> Self {
        self.show_toolbar = show;
        self
    }

    /// Enables or disables the sticky header.
    pub fn with_sticky_header(mut self, sticky: bool) -> Self {
        self.sticky_header = sticky;
        self
    }

    /// Sets the minimum container height.
    pub fn with_min_height(mut self, height: Dimension) -> Self {
        self.min_height = Some(height);
        self
    }

    /// Sets the maximum container height.
    pub fn with_max_height(mut self, height: Dimension) -> Self {
        self.max_height = Some(height);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TableOptions::default();
        assert!(!options.selection);
        assert!(!options.sorting);
        assert!(!options.paging);
        assert_eq!(options.page_size, 10);
        assert_eq!(options.page_size_options, vec![10, 25, 50, 100]);
        assert!(options.show_toolbar);
        assert_eq!(options.selection_color, SelectionColor::Secondary);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let options = TableOptions::from_json(
            r#"{"selection": true, "selectionColor": "primary", "maxHeight": 200, "minHeight": "50vh"}"#,
        )
        .unwrap();
        assert!(options.selection);
        assert_eq!(options.selection_color, SelectionColor::Primary);
        assert_eq!(options.max_height, Some(Dimension::Pixels(200)));
        assert_eq!(options.min_height, Some(Dimension::Css("50vh".into())));
        assert_eq!(options.page_size, 10);
    }

    #[test]
    fn test_from_json_legacy_names() {
        let options =
            TableOptions::from_json(r#"{"rowsPerPage": 5, "rowsPerPageOptions": [5, 10]}"#)
                .unwrap();
        assert_eq!(options.page_size, 5);
        assert_eq!(options.page_size_options, vec![5, 10]);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            TableOptions::from_json(r#"{"selectionColor": "tertiary"}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            TableOptions::from_json(r#"{"unknown": true}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            TableOptions::from_json(r#"{"pageSize": 0}"#),
            Err(ConfigError::ZeroPageSize)
        ));
        assert!(matches!(
            TableOptions::from_json(r#"{"pageSizeOptions": []}"#),
            Err(ConfigError::InvalidPageSizeOptions(_))
        ));
    }
}
