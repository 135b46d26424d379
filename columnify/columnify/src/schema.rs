use std::{fs, path::Path};

use columnify_avro::avro_schema_to_intermediate;
use columnify_bigquery::bigquery_schema_to_intermediate;
use columnify_core::{IntermediateSchema, SchemaError, SchemaType};

use crate::error::ColumnifyError;

/// Parse a schema document of the given type.
pub fn schema_from_bytes(
    schema_type: SchemaType,
    content: &[u8],
) -> Result<IntermediateSchema, SchemaError> {
    match schema_type {
        SchemaType::Avro => avro_schema_to_intermediate(content),
        SchemaType::BigQuery => bigquery_schema_to_intermediate(content),
    }
}

/// Read and parse a schema file.
pub fn read_schema_file(
    schema_type: SchemaType,
    path: impl AsRef<Path>,
) -> Result<IntermediateSchema, ColumnifyError> {
    let path = path.as_ref();
    let content = fs::read(path).map_err(|source| ColumnifyError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let schema = schema_from_bytes(schema_type, &content)?;
    tracing::debug!(
        path = %path.display(),
        %schema_type,
        fields = schema.fields.len(),
        "loaded schema"
    );
    Ok(schema)
}
