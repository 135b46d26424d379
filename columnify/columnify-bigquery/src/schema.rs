use columnify_core::{
    DataTypeDef, ElementDef, FieldDef, FieldDefs, IntermediateSchema, SchemaError, TimeUnit,
};
use serde::Deserialize;

const SCHEMA_TYPE: &str = "bigquery";

#[derive(Debug, Deserialize)]
struct BigQueryField {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    fields: Vec<BigQueryField>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Nullable,
    Required,
    Repeated,
}

/// Derive an [`IntermediateSchema`] from the bytes of a BigQuery JSON
/// schema (an array of field descriptors). The resulting schema has an empty
/// name; BigQuery schemas carry no table name.
pub fn bigquery_schema_to_intermediate(
    schema_data: &[u8],
) -> Result<IntermediateSchema, SchemaError> {
    let fields: Vec<BigQueryField> =
        serde_json::from_slice(schema_data).map_err(|e| SchemaError::Parse {
            schema_type: SCHEMA_TYPE.to_string(),
            source: Box::new(e),
        })?;

    Ok(IntermediateSchema::new("", field_defs(&fields)?))
}

fn field_defs(fields: &[BigQueryField]) -> Result<FieldDefs, SchemaError> {
    fields
        .iter()
        .map(bigquery_field_to_field_def)
        .collect::<Result<Vec<_>, _>>()
        .map(Into::into)
}

fn bigquery_field_to_field_def(field: &BigQueryField) -> Result<FieldDef, SchemaError> {
    let data_type = bigquery_type_to_data_type_def(field)?;

    let def = match parse_mode(field)? {
        // Repeated fields are never null as a whole; an absent list is empty.
        Mode::Repeated => FieldDef::new(
            &field.name,
            DataTypeDef::List(Box::new(ElementDef::new(data_type, false))),
            false,
        ),
        Mode::Nullable => FieldDef::new(&field.name, data_type, true),
        Mode::Required => FieldDef::new(&field.name, data_type, false),
    };
    Ok(def)
}

fn parse_mode(field: &BigQueryField) -> Result<Mode, SchemaError> {
    let Some(mode) = field.mode.as_deref() else {
        return Ok(Mode::Nullable);
    };
    match mode.to_ascii_uppercase().as_str() {
        "" | "NULLABLE" => Ok(Mode::Nullable),
        "REQUIRED" => Ok(Mode::Required),
        "REPEATED" => Ok(Mode::Repeated),
        other => Err(SchemaError::Invalid {
            detail: format!("unknown mode '{other}' for field '{}'", field.name),
        }),
    }
}

fn bigquery_type_to_data_type_def(field: &BigQueryField) -> Result<DataTypeDef, SchemaError> {
    let dt = match field.field_type.to_ascii_uppercase().as_str() {
        "BOOLEAN" | "BOOL" => DataTypeDef::Bool,
        "INTEGER" | "INT64" | "NUMERIC" => DataTypeDef::I64,
        "FLOAT" | "FLOAT64" => DataTypeDef::F64,
        "STRING" => DataTypeDef::String,
        "BYTES" => DataTypeDef::Bytes,
        "DATE" => DataTypeDef::Date,
        "TIME" => DataTypeDef::Time(TimeUnit::Micros),
        "TIMESTAMP" => DataTypeDef::Timestamp(TimeUnit::Micros),
        "RECORD" | "STRUCT" => DataTypeDef::Struct(field_defs(&field.fields)?),
        _ => {
            return Err(SchemaError::UnsupportedFieldType {
                field: field.name.clone(),
                field_type: field.field_type.clone(),
            });
        }
    };
    Ok(dt)
}
