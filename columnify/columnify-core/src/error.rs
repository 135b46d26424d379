//! Error types shared by schema adapters, the schema compiler and record
//! decoders.

/// Error returned while turning a source schema document into an
/// [`IntermediateSchema`](crate::IntermediateSchema) or compiling it further.
///
/// Every variant is fatal for the schema it was raised for: no record is
/// processed against a schema that failed.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema document could not be parsed at all.
    #[error("failed to parse {schema_type} schema: {source}")]
    Parse {
        schema_type: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The document parsed but is structurally invalid (missing keys,
    /// unresolved or self-referential named types, ...).
    #[error("invalid schema: {detail}")]
    Invalid { detail: String },

    /// An Avro construct that has no intermediate representation.
    #[error("unsupported schema shape for field '{field}': {detail}")]
    UnsupportedSchemaShape { field: String, detail: String },

    /// A BigQuery field type that has no intermediate representation.
    #[error("unsupported field type '{field_type}' for field '{field}'")]
    UnsupportedFieldType { field: String, field_type: String },

    /// An intermediate type the physical schema compiler cannot lay out.
    #[error("unsupported type at '{path}': {detail}")]
    UnsupportedType { path: String, detail: String },

    /// Two fields resolve to the same canonical column path.
    #[error("duplicate column path '{path}'")]
    DuplicatePath { path: String },
}

/// Error returned by record decoders.
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    /// Input bytes could not be decoded into records.
    #[error("failed to decode {record_type} record at line {line}: {source}")]
    RecordDecode {
        record_type: String,
        line: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Input that is decoded as a whole (CSV/TSV) could not be parsed.
    #[error("failed to decode {record_type} input: {source}")]
    InvalidInput {
        record_type: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A decoded record is not a key/value record.
    #[error("{record_type} record at line {line} is not a map, got {found}")]
    NotARecord {
        record_type: String,
        line: usize,
        found: &'static str,
    },
}

/// Error returned when a [`Value`](crate::Value) does not have the expected
/// variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, got {actual}")]
pub struct ValueTypeError {
    pub expected: String,
    pub actual: String,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
