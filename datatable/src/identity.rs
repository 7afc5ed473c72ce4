//! Row identity resolution.
//!
//! Every row needs a stable key so selection and expansion survive sorting
//! and paging. Datasets either name a naturally unique field as the primary
//! key, or leave the default [`SYNTHETIC_KEY_FIELD`] in place and get a
//! random v4 UUID per row, generated once when the dataset is ingested.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::error::TableError;
use crate::row::Row;
use crate::value::Value;

/// Field name used for generated row keys.
pub const SYNTHETIC_KEY_FIELD: &str = "_dataTableId";

/// Identity of a row within one dataset.
///
/// Keys are compared by their text form, so an integer key `1` and a string
/// key `"1"` are the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(String);

impl RowKey {
    /// Creates a fresh random key (hyphenated v4 UUID, 36 characters).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the empty key given to rows without a key field.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RowKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&Value> for RowKey {
    fn from(v: &Value) -> Self {
        Self(v.to_string())
    }
}

impl From<Value> for RowKey {
    fn from(v: Value) -> Self {
        Self::from(&v)
    }
}

impl AsRef<str> for RowKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A dataset paired with the key of every row.
///
/// Built once per dataset reference by [`resolve`]. The rows themselves are
/// shared, never copied or modified.
#[derive(Debug, Clone)]
pub struct ResolvedRows<R> {
    rows: Arc<[R]>,
    keys: Vec<RowKey>,
    index: HashMap<RowKey, usize>,
    duplicates: Vec<(RowKey, usize, usize)>,
    synthetic: bool,
}

/// Resolves the key of every row in `rows`.
///
/// The key is read from `primary_key` unless it is [`SYNTHETIC_KEY_FIELD`]
/// and the data does not already carry that field, in which case every row
/// gets a generated key.
///
/// Duplicate keys do not fail resolution: the last row with a given key wins
/// key lookups and the collision is logged. Use
/// [`ResolvedRows::check_unique`] to surface it as an error.
pub fn resolve<R: Row>(rows: Arc<[R]>, primary_key: &str) -> ResolvedRows<R> {
    let synthetic = primary_key == SYNTHETIC_KEY_FIELD
        && !rows
            .first()
            .is_some_and(|row| row.has_field(SYNTHETIC_KEY_FIELD));

    let keys: Vec<RowKey> = if synthetic {
        rows.iter().map(|_| RowKey::generate()).collect()
    } else {
        let mut missing = 0usize;
        let keys = rows
            .iter()
            .map(|row| match row.field(primary_key) {
                Some(value) => RowKey::from(&value),
                None => {
                    missing += 1;
                    RowKey::default()
                }
            })
            .collect();
        if missing > 0 {
            log::warn!(
                "[identity] {} of {} rows have no '{}' field, using empty keys",
                missing,
                rows.len(),
                primary_key
            );
        }
        keys
    };

    let mut index = HashMap::with_capacity(keys.len());
    let mut duplicates = Vec::new();
    for (i, key) in keys.iter().enumerate() {
        if let Some(previous) = index.insert(key.clone(), i) {
            duplicates.push((key.clone(), previous, i));
        }
    }
    if !duplicates.is_empty() {
        log::warn!(
            "[identity] {} duplicate keys for primary key '{}', last row wins",
            duplicates.len(),
            primary_key
        );
    }

    log::debug!(
        "[identity] Resolved {} rows (primary key '{}', synthetic: {})",
        rows.len(),
        primary_key,
        synthetic
    );

    ResolvedRows {
        rows,
        keys,
        index,
        duplicates,
        synthetic,
    }
}

impl<R> ResolvedRows<R> {
    /// Returns the dataset reference these keys were resolved from.
    pub fn source(&self) -> &Arc<[R]> {
        &self.rows
    }

    /// Returns the rows in dataset order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the key of the row at `index`.
    pub fn key(&self, index: usize) -> Option<&RowKey> {
        self.keys.get(index)
    }

    /// Returns all keys in dataset order.
    pub fn keys(&self) -> &[RowKey] {
        &self.keys
    }

    /// Returns the dataset index of the row with `key`.
    pub fn position(&self, key: &RowKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Returns the row with `key`.
    pub fn row_by_key(&self, key: &RowKey) -> Option<&R> {
        self.position(key).and_then(|i| self.rows.get(i))
    }

    /// Returns `true` if the keys were generated rather than read from the rows.
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    /// Fails with the first duplicate key found during resolution.
    pub fn check_unique(&self) -> Result<(), TableError> {
        match self.duplicates.first() {
            Some((key, first, second)) => {
                Err(TableError::duplicate_key(key.clone(), *first, *second))
            }
            None => Ok(()),
        }
    }
}

impl<R> Default for ResolvedRows<R> {
    fn default() -> Self {
        Self {
            rows: Arc::from(Vec::new()),
            keys: Vec::new(),
            index: HashMap::new(),
            duplicates: Vec::new(),
            synthetic: false,
        }
    }
}
