use columnify_core::{SchemaError, ValueTypeError};

/// Error returned by a striping call.
///
/// Any error aborts the whole call; rows already striped in the same call
/// are discarded together with the partially built table.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// A required field or leaf was absent or null.
    #[error("null value in required field '{path}'")]
    NullInRequiredField { path: String },

    /// A list contained a null element.
    #[error("null element in list '{path}' at index {index}")]
    NullListElement { path: String, index: usize },

    /// A leaf value has no conversion to the column type.
    #[error("cannot convert {found} to {target_type} at '{path}'")]
    UnconvertibleValue {
        path: String,
        target_type: &'static str,
        found: String,
    },

    /// A value does not have the shape the schema expects at a group or
    /// list node (including a row root that is not a struct).
    #[error("value does not match schema at '{path}': {source}")]
    SchemaMismatch {
        path: String,
        #[source]
        source: ValueTypeError,
    },

    /// The requested row range does not fit the input.
    #[error("row range {begin}..{end} is out of bounds for {len} rows")]
    RowRangeOutOfBounds { begin: usize, end: usize, len: usize },
}

/// Error returned while building an Arrow batch from generic rows.
#[derive(Debug, thiserror::Error)]
pub enum ArrowConvertError {
    #[error("null value in non-nullable field '{field}'")]
    NullInNonNullableField { field: String },

    #[error("value does not match field '{field}': {source}")]
    TypeMismatch {
        field: String,
        #[source]
        source: ValueTypeError,
    },

    #[error("unsupported arrow data type: {0}")]
    UnsupportedDataType(String),

    #[error("array builder does not match data type {0}")]
    BuilderMismatch(String),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

/// Error returned by [`TableWriter`](crate::TableWriter).
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("table has no column for leaf '{path}'")]
    MissingColumn { path: String },

    #[error("column '{path}' holds {found} values, expected {expected}")]
    ColumnTypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("writer has no column for leaf '{path}'")]
    MissingColumnWriter { path: String },

    #[error("unsupported parquet column writer for '{path}'")]
    UnsupportedColumnWriter { path: String },
}
