//! Error types

use crate::identity::RowKey;

/// Errors raised while validating table configuration.
///
/// Configuration is checked eagerly when a table is built or an option is
/// changed, so a bad column or option never reaches the table state.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A column was declared without an id.
    #[error("Column at position {index} has no id")]
    MissingColumnId { index: usize },

    /// A column was declared without a label.
    #[error("Column '{id}' has no label")]
    MissingColumnLabel { id: String },

    /// Two columns share the same id.
    #[error("Column id '{id}' is used more than once")]
    DuplicateColumnId { id: String },

    /// A sort direction string was neither `asc` nor `desc`.
    #[error("Unknown sort direction '{0}', expected 'asc' or 'desc'")]
    UnknownSortDirection(String),

    /// The primary key field name is empty.
    #[error("Primary key field must not be empty")]
    EmptyPrimaryKey,

    /// A page size of zero was requested.
    #[error("Page size must be greater than zero")]
    ZeroPageSize,

    /// The allowed page sizes are empty or contain zero.
    #[error("Page size options must be non-empty and greater than zero, got {0:?}")]
    InvalidPageSizeOptions(Vec<usize>),

    /// Two selection actions share a label.
    #[error("Selection action '{label}' is declared more than once")]
    DuplicateAction { label: String },

    /// Options JSON could not be parsed.
    #[error("Invalid table options: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors returned by table operations.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Two rows in the current dataset resolve to the same key.
    #[error("Duplicate row key '{key}' at rows {first} and {second}")]
    DuplicateKey {
        key: RowKey,
        first: usize,
        second: usize,
    },

    /// No selection action has the requested label.
    #[error("Selection action '{0}' not found")]
    UnknownAction(String),
}

impl TableError {
    /// Creates a new duplicate key error.
    pub fn duplicate_key(key: RowKey, first: usize, second: usize) -> Self {
        Self::DuplicateKey { key, first, second }
    }
}
