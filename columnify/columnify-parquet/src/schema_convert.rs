use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, TimeUnit as ArrowTimeUnit};
use columnify_core::{DataTypeDef, ElementDef, FieldDef, FieldDefs, TimeUnit};

/// Timezone attached to timestamp columns.
pub const TIMESTAMP_TZ: &str = "+00:00";

/// Converts intermediate field definitions into an Arrow `Schema`.
///
/// Dates map to `Date32`, millisecond times to `Time32`, microsecond times
/// to `Time64` and timestamps to UTC `Timestamp`s of the same unit.
pub fn field_defs_to_arrow_schema(fields: &FieldDefs) -> Schema {
    let arrow_fields: Vec<Field> = fields.iter().map(field_def_to_arrow_field).collect();
    Schema::new(arrow_fields)
}

fn field_def_to_arrow_field(f: &FieldDef) -> Field {
    Field::new(
        &f.name,
        element_def_to_datatype(&f.element),
        f.element.nullable,
    )
}

fn element_def_to_datatype(elem: &ElementDef) -> DataType {
    match &elem.data_type {
        DataTypeDef::Bool => DataType::Boolean,
        DataTypeDef::I32 => DataType::Int32,
        DataTypeDef::I64 => DataType::Int64,
        DataTypeDef::F32 => DataType::Float32,
        DataTypeDef::F64 => DataType::Float64,
        DataTypeDef::String => DataType::Utf8,
        DataTypeDef::Bytes => DataType::Binary,
        DataTypeDef::Date => DataType::Date32,
        DataTypeDef::Time(TimeUnit::Millis) => DataType::Time32(ArrowTimeUnit::Millisecond),
        DataTypeDef::Time(TimeUnit::Micros) => DataType::Time64(ArrowTimeUnit::Microsecond),
        DataTypeDef::Timestamp(unit) => {
            DataType::Timestamp(arrow_time_unit(*unit), Some(Arc::from(TIMESTAMP_TZ)))
        }
        DataTypeDef::Struct(fields) => {
            let arrow_fields: Vec<Field> = fields.iter().map(field_def_to_arrow_field).collect();
            DataType::Struct(arrow_fields.into())
        }
        DataTypeDef::List(elem) => {
            let child_dt = element_def_to_datatype(elem);
            DataType::List(Arc::new(Field::new("item", child_dt, elem.nullable)))
        }
    }
}

fn arrow_time_unit(unit: TimeUnit) -> ArrowTimeUnit {
    match unit {
        TimeUnit::Millis => ArrowTimeUnit::Millisecond,
        TimeUnit::Micros => ArrowTimeUnit::Microsecond,
    }
}
