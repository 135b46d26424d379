//! Conversion from generic [`Value`] rows to an Arrow `RecordBatch`.
//!
//! Leaves go through the same coercion rules as striping, so a batch built
//! here stripes to the same table as the rows it came from.

mod append;
mod builder;
mod leaf;

use std::sync::Arc;

use arrow::{array::ArrayRef, datatypes::Schema, record_batch::RecordBatch};
use columnify_core::Value;

use crate::error::ArrowConvertError;

pub use leaf::leaf_type_for_datatype;

/// Convert rows to a `RecordBatch` with the given schema.
///
/// Each row must be a struct; members are looked up by field name (exact,
/// then canonical). Absent members are null. A null or absent list in a
/// non-nullable list field becomes an empty list.
pub fn rows_to_record_batch(
    schema: &Schema,
    rows: &[Value],
) -> Result<RecordBatch, ArrowConvertError> {
    let schema = Arc::new(schema.clone());
    if rows.is_empty() {
        return Ok(RecordBatch::new_empty(schema));
    }

    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let mut builder = builder::make_builder(field.data_type(), rows.len())?;
        for row in rows {
            let value = row
                .get_field(field.name())
                .map_err(|source| ArrowConvertError::TypeMismatch {
                    field: field.name().clone(),
                    source,
                })?
                .unwrap_or(&Value::Null);
            append::append_value_to_builder(&mut builder, field, value)?;
        }
        arrays.push(builder.finish());
    }

    Ok(RecordBatch::try_new(schema, arrays)?)
}
