//! Convert an Avro record schema into an [`IntermediateSchema`].

use std::collections::HashSet;

use columnify_core::{DataTypeDef, FieldDef, FieldDefs, IntermediateSchema, SchemaError, TimeUnit};
use serde_json::{Map, Value as Json};

const SCHEMA_TYPE: &str = "avro";

/// Derive an [`IntermediateSchema`] from the bytes of an Avro JSON schema.
///
/// The document must be a `record`. Field order follows declaration order.
/// References to named types are rejected as invalid, which also rules out
/// recursive records.
pub fn avro_schema_to_intermediate(schema_data: &[u8]) -> Result<IntermediateSchema, SchemaError> {
    let doc: Json = serde_json::from_slice(schema_data).map_err(|e| SchemaError::Parse {
        schema_type: SCHEMA_TYPE.to_string(),
        source: Box::new(e),
    })?;

    let Json::Object(record) = &doc else {
        return Err(invalid("top-level schema must be a record object"));
    };
    if record.get("type").and_then(Json::as_str) != Some("record") {
        return Err(invalid("top-level schema type must be 'record'"));
    }

    let mut names = NamedTypes::default();
    let name = names.define(record)?;
    let fields = record_fields(record, &mut names)?;

    Ok(IntermediateSchema::new(name, fields))
}

/// Full names of the record types declared so far.
#[derive(Default)]
struct NamedTypes(HashSet<String>);

impl NamedTypes {
    fn define(&mut self, record: &Map<String, Json>) -> Result<String, SchemaError> {
        let name = record
            .get("name")
            .and_then(Json::as_str)
            .ok_or_else(|| invalid("record is missing a 'name'"))?;
        let full_name = match record.get("namespace").and_then(Json::as_str) {
            Some(ns) if !ns.is_empty() && !name.contains('.') => format!("{ns}.{name}"),
            _ => name.to_string(),
        };
        self.0.insert(name.to_string());
        self.0.insert(full_name);
        Ok(name.to_string())
    }

    fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }
}

fn record_fields(
    record: &Map<String, Json>,
    names: &mut NamedTypes,
) -> Result<FieldDefs, SchemaError> {
    let fields = record
        .get("fields")
        .and_then(Json::as_array)
        .ok_or_else(|| invalid("record is missing a 'fields' array"))?;

    fields
        .iter()
        .map(|f| avro_field_to_field_def(f, names))
        .collect::<Result<Vec<_>, _>>()
        .map(Into::into)
}

fn avro_field_to_field_def(field: &Json, names: &mut NamedTypes) -> Result<FieldDef, SchemaError> {
    let name = field
        .get("name")
        .and_then(Json::as_str)
        .ok_or_else(|| invalid("record field is missing a 'name'"))?;
    let ty = field
        .get("type")
        .ok_or_else(|| invalid(format!("field '{name}' is missing a 'type'")))?;

    let (ty, nullable) = split_nullable_union(name, ty)?;
    let data_type = avro_type_to_data_type_def(name, ty, names)?;
    Ok(FieldDef::new(name, data_type, nullable))
}

/// Unwrap `["null", T]` / `[T, "null"]` into `(T, true)`; any other type is
/// returned as `(type, false)`.
fn split_nullable_union<'a>(field: &str, ty: &'a Json) -> Result<(&'a Json, bool), SchemaError> {
    let Json::Array(branches) = ty else {
        return Ok((ty, false));
    };

    match branches.as_slice() {
        [a, b] if is_null(a) && !is_null(b) => Ok((b, true)),
        [a, b] if is_null(b) && !is_null(a) => Ok((a, true)),
        _ => Err(unsupported(
            field,
            format!(
                "only two-branch unions with a null branch are supported, got {} branches",
                branches.len()
            ),
        )),
    }
}

fn is_null(ty: &Json) -> bool {
    match ty {
        Json::String(s) => s == "null",
        Json::Object(o) => o.get("type").and_then(Json::as_str) == Some("null"),
        _ => false,
    }
}

fn avro_type_to_data_type_def(
    field: &str,
    ty: &Json,
    names: &mut NamedTypes,
) -> Result<DataTypeDef, SchemaError> {
    match ty {
        Json::String(name) => primitive_or_reference(field, name, names),
        Json::Array(_) => Err(unsupported(field, "nested unions are not supported")),
        Json::Object(obj) => {
            let type_name = obj
                .get("type")
                .and_then(Json::as_str)
                .ok_or_else(|| invalid(format!("type of field '{field}' has no 'type' name")))?;

            if let Some(logical) = obj.get("logicalType").and_then(Json::as_str) {
                return logical_type_to_data_type_def(field, logical, type_name);
            }

            match type_name {
                "record" => {
                    names.define(obj)?;
                    Ok(DataTypeDef::Struct(record_fields(obj, names)?))
                }
                "enum" | "fixed" | "map" | "array" => Err(unsupported(
                    field,
                    format!("'{type_name}' types are not supported"),
                )),
                other => primitive_or_reference(field, other, names),
            }
        }
        other => Err(invalid(format!(
            "type of field '{field}' must be a string, array or object, got {other}"
        ))),
    }
}

fn primitive_or_reference(
    field: &str,
    name: &str,
    names: &NamedTypes,
) -> Result<DataTypeDef, SchemaError> {
    let dt = match name {
        "boolean" => DataTypeDef::Bool,
        "int" => DataTypeDef::I32,
        "long" => DataTypeDef::I64,
        "float" => DataTypeDef::F32,
        "double" => DataTypeDef::F64,
        "bytes" => DataTypeDef::Bytes,
        "string" => DataTypeDef::String,
        "null" => return Err(unsupported(field, "a bare 'null' type has no column layout")),
        "record" | "enum" | "fixed" | "map" | "array" => {
            return Err(invalid(format!(
                "complex type '{name}' of field '{field}' must be declared as an object"
            )));
        }
        other if names.contains(other) => {
            return Err(invalid(format!(
                "field '{field}' references named type '{other}'; recursive schemas are not supported"
            )));
        }
        other => {
            return Err(invalid(format!(
                "field '{field}' references unknown type '{other}'"
            )));
        }
    };
    Ok(dt)
}

fn logical_type_to_data_type_def(
    field: &str,
    logical: &str,
    base: &str,
) -> Result<DataTypeDef, SchemaError> {
    let dt = match (logical, base) {
        ("date", "int") => DataTypeDef::Date,
        ("time-millis", "int") => DataTypeDef::Time(TimeUnit::Millis),
        ("time-micros", "long") => DataTypeDef::Time(TimeUnit::Micros),
        ("timestamp-millis", "long") => DataTypeDef::Timestamp(TimeUnit::Millis),
        ("timestamp-micros", "long") => DataTypeDef::Timestamp(TimeUnit::Micros),
        _ => {
            return Err(unsupported(
                field,
                format!("logical type '{logical}' on '{base}' is not supported"),
            ));
        }
    };
    Ok(dt)
}

fn invalid(detail: impl Into<String>) -> SchemaError {
    SchemaError::Invalid {
        detail: detail.into(),
    }
}

fn unsupported(field: &str, detail: impl Into<String>) -> SchemaError {
    SchemaError::UnsupportedSchemaShape {
        field: field.to_string(),
        detail: detail.into(),
    }
}
