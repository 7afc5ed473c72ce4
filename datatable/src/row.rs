//! Row trait and the map-backed Record row.

use std::collections::HashMap;

use crate::value::Value;

/// Trait for items that can be displayed as rows in a [`DataTable`](crate::DataTable).
///
/// The table only ever reads rows: it asks for a field by column id when it
/// needs to sort, key or display a cell. Rows are never mutated.
///
/// # Examples
///
/// ```
/// use datatable::{Row, Value};
///
/// #[derive(Clone)]
/// struct Country {
///     code: String,
///     population: i64,
/// }
///
/// impl Row for Country {
///     fn field(&self, id: &str) -> Option<Value> {
///         match id {
///             "code" => Some(self.code.as_str().into()),
///             "population" => Some(self.population.into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Row: Send + Sync + Clone + 'static {
    /// Returns the value of the field named `id`, or `None` if the row has no
    /// such field.
    fn field(&self, id: &str) -> Option<Value>;

    /// Returns `true` if the row carries a field named `id`.
    fn has_field(&self, id: &str) -> bool {
        self.field(id).is_some()
    }
}

/// A dynamic row backed by a field map.
///
/// # Example
///
/// ```
/// use datatable::{Record, Row, Value};
///
/// let row = Record::new()
///     .set("name", "Italy")
///     .set("population", 60_483_973i64);
///
/// assert_eq!(row.field("name"), Some(Value::from("Italy")));
/// assert!(!row.has_field("size"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Sets a field value in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Row for Record {
    fn field(&self, id: &str) -> Option<Value> {
        self.fields.get(id).cloned()
    }

    fn has_field(&self, id: &str) -> bool {
        self.fields.contains_key(id)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, Value>> for Record {
    fn from(fields: HashMap<String, Value>) -> Self {
        Self { fields }
    }
}
