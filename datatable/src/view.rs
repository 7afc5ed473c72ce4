//! Visible-row computation.
//!
//! Given the full dataset and the current sort and page state this module
//! decides which rows a renderer draws, in which order, and how many empty
//! filler rows keep a page at its full height.

use crate::page::PageState;
use crate::row::Row;
use crate::sort::SortState;
use crate::sort::sorted_indices;

/// Row height in pixels of a dense table.
pub const DENSE_ROW_HEIGHT: u32 = 32;

/// Row height in pixels of a regular table.
pub const ROW_HEIGHT: u32 = 53;

/// Inputs to [`compute_visible_rows`].
///
/// `None` disables the corresponding feature.
pub struct ViewParams<'a, R> {
    /// Sort to apply, if sorting is enabled.
    pub sort: Option<&'a SortState<R>>,
    /// Page to show, if paging is enabled.
    pub page: Option<&'a PageState>,
    /// Whether short pages are padded with filler rows.
    pub show_empty_rows: bool,
}

impl<R> Clone for ViewParams<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ViewParams<'_, R> {}

impl<R> Default for ViewParams<'_, R> {
    fn default() -> Self {
        Self {
            sort: None,
            page: None,
            show_empty_rows: false,
        }
    }
}

/// Rows to draw, as dataset indices, plus the filler row count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleRows {
    /// Dataset indices of the visible rows, in display order.
    pub indices: Vec<usize>,
    /// Number of empty rows needed to keep the page height constant.
    pub padding: usize,
}

impl VisibleRows {
    /// Returns the number of visible rows.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if no rows are visible.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Computes the visible rows of `rows`.
///
/// Sorting (when enabled with an active column) is stable. Paging slices the
/// sorted sequence; a page past the end yields no rows rather than an error.
/// Padding is only produced when paging and `show_empty_rows` are both on
/// and the dataset is non-empty.
pub fn compute_visible_rows<R: Row>(rows: &[R], params: &ViewParams<'_, R>) -> VisibleRows {
    let total = rows.len();

    let ordered = match params.sort.and_then(|sort| sort.comparator()) {
        Some(compare) => sorted_indices(rows, |a, b| compare(a, b)),
        None => (0..total).collect(),
    };

    let Some(page) = params.page else {
        log::trace!("[view] {} rows, paging off", total);
        return VisibleRows {
            indices: ordered,
            padding: 0,
        };
    };

    let range = page.range(total);
    let indices = ordered[range].to_vec();
    let padding = if params.show_empty_rows {
        page.padding(total)
    } else {
        0
    };

    log::trace!(
        "[view] page {} shows {} of {} rows, {} filler",
        page.page(),
        indices.len(),
        total,
        padding
    );

    VisibleRows { indices, padding }
}

/// Returns the pixel height of `padding` filler rows.
pub fn padding_height(padding: usize, dense: bool) -> u32 {
    let row = if dense { DENSE_ROW_HEIGHT } else { ROW_HEIGHT };
    row.saturating_mul(u32::try_from(padding).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Record;
    use crate::sort::SortDirection;

    fn data(n: i64) -> Vec<Record> {
        (0..n).map(|i| Record::new().set("n", i)).collect()
    }

    #[test]
    fn test_no_sort_no_paging() {
        let rows = data(4);
        let visible = compute_visible_rows(&rows, &ViewParams::default());
        assert_eq!(visible.indices, [0, 1, 2, 3]);
        assert_eq!(visible.padding, 0);
    }

    #[test]
    fn test_sorted_then_paged() {
        let rows = data(5);
        let sort = SortState::by("n", SortDirection::Desc, None);
        let mut page = PageState::new(2, vec![2]).unwrap();
        page.set_page(1, 5);

        let visible = compute_visible_rows(
            &rows,
            &ViewParams {
                sort: Some(&sort),
                page: Some(&page),
                show_empty_rows: true,
            },
        );
        assert_eq!(visible.indices, [2, 1]);
        assert_eq!(visible.padding, 0);
    }

    #[test]
    fn test_inactive_sort_keeps_order() {
        let rows = data(3);
        let sort = SortState::new();
        let visible = compute_visible_rows(
            &rows,
            &ViewParams {
                sort: Some(&sort),
                ..Default::default()
            },
        );
        assert_eq!(visible.indices, [0, 1, 2]);
    }

    #[test]
    fn test_padding_requires_show_empty_rows() {
        let rows = data(5);
        let mut page = PageState::new(2, vec![2]).unwrap();
        page.set_page(2, 5);

        let params = ViewParams {
            sort: None,
            page: Some(&page),
            show_empty_rows: false,
        };
        assert_eq!(compute_visible_rows(&rows, &params).padding, 0);

        let params = ViewParams {
            show_empty_rows: true,
            ..params
        };
        let visible = compute_visible_rows(&rows, &params);
        assert_eq!(visible.indices, [4]);
        assert_eq!(visible.padding, 1);
    }

    #[test]
    fn test_empty_dataset_has_no_padding() {
        let rows: Vec<Record> = Vec::new();
        let page = PageState::default();
        let visible = compute_visible_rows(
            &rows,
            &ViewParams {
                sort: None,
                page: Some(&page),
                show_empty_rows: true,
            },
        );
        assert!(visible.is_empty());
        assert_eq!(visible.padding, 0);
    }

    #[test]
    fn test_padding_height() {
        assert_eq!(padding_height(3, true), 96);
        assert_eq!(padding_height(2, false), 106);
        assert_eq!(padding_height(0, false), 0);
        assert_eq!(padding_height(usize::MAX, true), u32::MAX);
    }
}
