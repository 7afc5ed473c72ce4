//! Sort direction, comparators and the stable sort.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::row::Row;
use crate::value::Value;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Returns the lowercase name used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ConfigError::UnknownSortDirection(other.to_string())),
        }
    }
}

/// A row ordering function.
///
/// Custom column comparators implement the *ascending* relation; the table
/// reverses their result for descending sorts.
pub type Comparator<R> = Arc<dyn Fn(&R, &R) -> Ordering + Send + Sync>;

/// Builds the comparator for sorting by `column_id` in `direction`.
///
/// Without a custom comparator rows are ordered by [`Value::total_cmp`] of
/// the column's field, with missing fields treated as `Null`.
pub fn build_comparator<R: Row>(
    direction: SortDirection,
    column_id: &str,
    custom: Option<Comparator<R>>,
) -> Comparator<R> {
    let ascending: Comparator<R> = match custom {
        Some(custom) => custom,
        None => {
            let column_id = column_id.to_string();
            Arc::new(move |a: &R, b: &R| {
                let a = a.field(&column_id).unwrap_or(Value::Null);
                let b = b.field(&column_id).unwrap_or(Value::Null);
                a.total_cmp(&b)
            })
        }
    };
    match direction {
        SortDirection::Asc => ascending,
        SortDirection::Desc => Arc::new(move |a: &R, b: &R| ascending(a, b).reverse()),
    }
}

/// Returns the indices of `rows` in sorted order.
///
/// Rows that compare equal keep their original relative order: each row is
/// decorated with its index and ties are broken by that index.
pub fn sorted_indices<R>(rows: &[R], compare: impl Fn(&R, &R) -> Ordering) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    indices.sort_unstable_by(|&a, &b| compare(&rows[a], &rows[b]).then(a.cmp(&b)));
    indices
}

/// Sorts `rows` stably, returning references in sorted order.
pub fn stable_sort<'a, R>(rows: &'a [R], compare: impl Fn(&R, &R) -> Ordering) -> Vec<&'a R> {
    sorted_indices(rows, compare)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}

/// Current sort of a table.
///
/// `order_by` is `None` until a column is activated, either by a column's
/// default sort or by a header click.
pub struct SortState<R> {
    /// Id of the active column.
    pub order_by: Option<String>,
    /// Direction of the active column.
    pub direction: SortDirection,
    /// Custom comparator of the active column.
    pub comparator: Option<Comparator<R>>,
}

impl<R> SortState<R> {
    /// Creates an inactive sort.
    pub fn new() -> Self {
        Self {
            order_by: None,
            direction: SortDirection::Asc,
            comparator: None,
        }
    }

    /// Creates a sort on `column_id`.
    pub fn by(
        column_id: impl Into<String>,
        direction: SortDirection,
        comparator: Option<Comparator<R>>,
    ) -> Self {
        Self {
            order_by: Some(column_id.into()),
            direction,
            comparator,
        }
    }

    /// Returns `true` if a column is active.
    pub fn is_active(&self) -> bool {
        self.order_by.is_some()
    }

    /// Returns the direction shown on `column_id`'s header, or `None` if the
    /// column is not the active one.
    pub fn indicator(&self, column_id: &str) -> Option<SortDirection> {
        (self.order_by.as_deref() == Some(column_id)).then_some(self.direction)
    }

    /// Applies a header click on `column_id`.
    ///
    /// Clicking the active column flips its direction; clicking any other
    /// column makes it active and ascending. There is no transition back to
    /// an inactive sort.
    pub fn activate(&mut self, column_id: &str, comparator: Option<Comparator<R>>) {
        let direction = match self.indicator(column_id) {
            Some(direction) => direction.toggled(),
            None => SortDirection::Asc,
        };
        *self = Self::by(column_id, direction, comparator);
    }

    /// Deactivates the sort.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl<R: Row> SortState<R> {
    /// Builds the comparator for the current sort, if a column is active.
    pub fn comparator(&self) -> Option<Comparator<R>> {
        self.order_by
            .as_deref()
            .map(|id| build_comparator(self.direction, id, self.comparator.clone()))
    }
}

impl<R> Default for SortState<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for SortState<R> {
    fn clone(&self) -> Self {
        Self {
            order_by: self.order_by.clone(),
            direction: self.direction,
            comparator: self.comparator.clone(),
        }
    }
}

impl<R> fmt::Debug for SortState<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortState")
            .field("order_by", &self.order_by)
            .field("direction", &self.direction)
            .field("custom_comparator", &self.comparator.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Record;

    fn rows(pops: &[(&str, i64)]) -> Vec<Record> {
        pops.iter()
            .map(|(id, pop)| Record::new().set("id", *id).set("pop", *pop))
            .collect()
    }

    fn ids(sorted: &[&Record]) -> Vec<String> {
        sorted
            .iter()
            .map(|r| r.field("id").unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!(matches!(
            "ASC".parse::<SortDirection>(),
            Err(ConfigError::UnknownSortDirection(_))
        ));
    }

    #[test]
    fn test_ascending_is_stable() {
        let data = rows(&[("A", 10), ("B", 10), ("C", 5)]);
        let cmp = build_comparator::<Record>(SortDirection::Asc, "pop", None);
        assert_eq!(ids(&stable_sort(&data, |a, b| cmp(a, b))), ["C", "A", "B"]);
    }

    #[test]
    fn test_descending_is_stable() {
        let data = rows(&[("A", 10), ("B", 5), ("C", 10)]);
        let cmp = build_comparator::<Record>(SortDirection::Desc, "pop", None);
        assert_eq!(ids(&stable_sort(&data, |a, b| cmp(a, b))), ["A", "C", "B"]);
    }

    #[test]
    fn test_custom_comparator_is_negated_for_desc() {
        // Orders by id length only, so equal lengths tie.
        let by_len: Comparator<Record> = Arc::new(|a: &Record, b: &Record| {
            let a = a.field("id").unwrap().to_string().len();
            let b = b.field("id").unwrap().to_string().len();
            a.cmp(&b)
        });
        let data = rows(&[("bb", 0), ("a", 0), ("cc", 0), ("d", 0)]);

        let asc = build_comparator(SortDirection::Asc, "id", Some(Arc::clone(&by_len)));
        assert_eq!(
            ids(&stable_sort(&data, |a, b| asc(a, b))),
            ["a", "d", "bb", "cc"]
        );

        let desc = build_comparator(SortDirection::Desc, "id", Some(by_len));
        assert_eq!(
            ids(&stable_sort(&data, |a, b| desc(a, b))),
            ["bb", "cc", "a", "d"]
        );
    }

    #[test]
    fn test_missing_field_sorts_as_null() {
        let mut data = rows(&[("A", 3), ("B", 1)]);
        data.push(Record::new().set("id", "C"));
        let cmp = build_comparator::<Record>(SortDirection::Asc, "pop", None);
        assert_eq!(ids(&stable_sort(&data, |a, b| cmp(a, b))), ["C", "B", "A"]);
    }

    #[test]
    fn test_edge_cases() {
        let empty: Vec<Record> = Vec::new();
        assert!(sorted_indices(&empty, |_, _| Ordering::Equal).is_empty());

        let single = rows(&[("A", 1)]);
        assert_eq!(sorted_indices(&single, |_, _| Ordering::Less), [0]);

        let equal = rows(&[("A", 1), ("B", 1), ("C", 1), ("D", 1)]);
        assert_eq!(
            sorted_indices(&equal, |_, _| Ordering::Equal),
            [0, 1, 2, 3]
        );
    }

    #[test]
    fn test_header_cycle() {
        let mut sort = SortState::<Record>::new();
        assert_eq!(sort.indicator("h"), None);

        sort.activate("h", None);
        assert_eq!(sort.indicator("h"), Some(SortDirection::Asc));
        sort.activate("h", None);
        assert_eq!(sort.indicator("h"), Some(SortDirection::Desc));
        sort.activate("h", None);
        assert_eq!(sort.indicator("h"), Some(SortDirection::Asc));

        sort.activate("g", None);
        assert_eq!(sort.indicator("g"), Some(SortDirection::Asc));
        assert_eq!(sort.indicator("h"), None);

        sort.clear();
        assert!(!sort.is_active());
    }

    #[test]
    fn test_switching_column_resets_to_ascending() {
        let mut sort = SortState::<Record>::by("h", SortDirection::Desc, None);
        sort.activate("g", None);
        assert_eq!(sort.direction, SortDirection::Asc);
    }
}
