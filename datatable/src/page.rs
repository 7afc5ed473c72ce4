//! Page state for paginated tables.

use std::ops::Range;

use crate::error::ConfigError;

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default page sizes offered by a pager.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Current page of a table along with the page sizes a pager may offer.
///
/// # Example
///
/// ```
/// use datatable::PageState;
///
/// let mut page = PageState::new(2, vec![2, 5]).unwrap();
/// page.set_page(2, 5);
/// assert_eq!(page.range(5), 4..5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    page: usize,
    page_size: usize,
    page_size_options: Vec<usize>,
}

impl PageState {
    /// Creates a page state on page 0.
    pub fn new(page_size: usize, page_size_options: Vec<usize>) -> Result<Self, ConfigError> {
        validate_page_size(page_size)?;
        validate_page_size_options(&page_size_options)?;
        Ok(Self {
            page: 0,
            page_size,
            page_size_options,
        })
    }

    /// Returns the current page index (0-based).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the number of rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the page sizes a pager may offer.
    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// Returns the number of pages needed for `total` rows.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Moves to `page`, clamped to the last page for `total` rows.
    ///
    /// Returns `true` if the page changed.
    pub fn set_page(&mut self, page: usize, total: usize) -> bool {
        let last = self.page_count(total).saturating_sub(1);
        let page = page.min(last);
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// Changes the page size and returns to page 0.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ConfigError> {
        validate_page_size(page_size)?;
        if !self.page_size_options.contains(&page_size) {
            log::debug!(
                "[page] Page size {} is not one of {:?}",
                page_size,
                self.page_size_options
            );
        }
        self.page_size = page_size;
        self.page = 0;
        Ok(())
    }

    /// Returns to page 0.
    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// Returns the row range of the current page within `total` rows.
    ///
    /// The range is clipped to `total`; a page past the end is empty.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = self.page.saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }

    /// Returns the number of filler rows that keep the current page at
    /// `page_size` rows. Empty datasets get no filler.
    pub fn padding(&self, total: usize) -> usize {
        if total == 0 {
            return 0;
        }
        let remaining = total.saturating_sub(self.page.saturating_mul(self.page_size));
        self.page_size - remaining.min(self.page_size)
    }

    /// Returns the pager view of this state for `total` rows.
    pub fn info(&self, total: usize) -> PageInfo {
        PageInfo {
            page: self.page,
            page_size: self.page_size,
            page_size_options: self.page_size_options.clone(),
            total,
            page_count: self.page_count(total),
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
        }
    }
}

/// What a pager control needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page index (0-based).
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Page sizes to offer.
    pub page_size_options: Vec<usize>,
    /// Total number of rows across all pages.
    pub total: usize,
    /// Number of pages.
    pub page_count: usize,
}

impl PageInfo {
    /// Returns `true` if a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count
    }

    /// Returns the 1-based row range shown on this page, as a pager label
    /// would display it (`"11-20 of 42"`).
    pub fn label(&self) -> String {
        if self.total == 0 {
            return "0-0 of 0".to_string();
        }
        let from = (self.page * self.page_size + 1).min(self.total);
        let to = ((self.page + 1) * self.page_size).min(self.total);
        format!("{}-{} of {}", from, to, self.total)
    }
}

pub(crate) fn validate_page_size(page_size: usize) -> Result<(), ConfigError> {
    if page_size == 0 {
        return Err(ConfigError::ZeroPageSize);
    }
    Ok(())
}

pub(crate) fn validate_page_size_options(options: &[usize]) -> Result<(), ConfigError> {
    if options.is_empty() || options.contains(&0) {
        return Err(ConfigError::InvalidPageSizeOptions(options.to_vec()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(size: usize) -> PageState {
        PageState::new(size, vec![size]).unwrap()
    }

    #[test]
    fn test_defaults() {
        let page = PageState::default();
        assert_eq!(page.page(), 0);
        assert_eq!(page.page_size(), 10);
        assert_eq!(page.page_size_options(), &[10, 25, 50, 100]);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            PageState::new(0, vec![10]),
            Err(ConfigError::ZeroPageSize)
        ));
        assert!(matches!(
            PageState::new(10, vec![]),
            Err(ConfigError::InvalidPageSizeOptions(_))
        ));
        assert!(matches!(
            PageState::new(10, vec![10, 0]),
            Err(ConfigError::InvalidPageSizeOptions(_))
        ));
    }

    #[test]
    fn test_last_partial_page() {
        let mut page = state(2);
        assert!(page.set_page(2, 5));
        assert_eq!(page.range(5), 4..5);
        assert_eq!(page.padding(5), 1);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut page = state(10);
        page.set_page(7, 25);
        assert_eq!(page.page(), 2);
        assert!(!page.set_page(2, 25));
        page.set_page(3, 0);
        assert_eq!(page.page(), 0);
    }

    #[test]
    fn test_set_page_size_resets_page() {
        let mut page = PageState::default();
        page.set_page(3, 100);
        page.set_page_size(25).unwrap();
        assert_eq!(page.page(), 0);
        assert_eq!(page.page_size(), 25);
        assert!(page.set_page_size(0).is_err());
        assert_eq!(page.page_size(), 25);
    }

    #[test]
    fn test_range_beyond_end_is_empty() {
        let page = PageState {
            page: 4,
            page_size: 10,
            page_size_options: vec![10],
        };
        assert!(page.range(15).is_empty());
        assert_eq!(page.padding(15), 10);
    }

    #[test]
    fn test_padding_single_page() {
        let page = state(10);
        assert_eq!(page.padding(3), 7);
        assert_eq!(page.padding(0), 0);
        assert_eq!(page.padding(10), 0);
    }

    #[test]
    fn test_info() {
        let mut page = state(10);
        page.set_page(1, 42);
        let info = page.info(42);
        assert_eq!(info.page_count, 5);
        assert!(info.has_previous());
        assert!(info.has_next());
        assert_eq!(info.label(), "11-20 of 42");
        assert_eq!(state(10).info(0).label(), "0-0 of 0");
    }
}
