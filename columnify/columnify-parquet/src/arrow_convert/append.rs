use arrow::{
    array::{
        ArrayBuilder, BinaryBuilder, BooleanBuilder, Date32Builder, Float32Builder,
        Float64Builder, Int32Builder, Int64Builder, ListBuilder, StringBuilder, StructBuilder,
        Time32MillisecondBuilder, Time64MicrosecondBuilder, TimestampMicrosecondBuilder,
        TimestampMillisecondBuilder,
    },
    datatypes::{DataType, Field, TimeUnit},
};
use columnify_core::{Value, ValueTypeError};

use super::leaf::leaf_type_for_datatype;
use crate::{
    coerce::{Scalar, coerce},
    error::ArrowConvertError,
    table::LeafValue,
};

macro_rules! cast_builder {
    ($b:expr, $T:ty) => {
        $b.as_any_mut()
            .downcast_mut::<$T>()
            .ok_or_else(|| ArrowConvertError::BuilderMismatch(stringify!($T).to_string()))?
    };
}

fn type_mismatch(field: &Field, source: ValueTypeError) -> ArrowConvertError {
    ArrowConvertError::TypeMismatch {
        field: field.name().clone(),
        source,
    }
}

fn append_leaf(
    builder: &mut Box<dyn ArrayBuilder>,
    field: &Field,
    leaf: LeafValue,
) -> Result<(), ArrowConvertError> {
    match (field.data_type(), leaf) {
        (DataType::Boolean, LeafValue::Boolean(v)) => {
            cast_builder!(builder, BooleanBuilder).append_value(v)
        }
        (DataType::Int32, LeafValue::Int32(v)) => cast_builder!(builder, Int32Builder).append_value(v),
        (DataType::Date32, LeafValue::Int32(v)) => cast_builder!(builder, Date32Builder).append_value(v),
        (DataType::Time32(_), LeafValue::Int32(v)) => {
            cast_builder!(builder, Time32MillisecondBuilder).append_value(v)
        }
        (DataType::Int64, LeafValue::Int64(v)) => cast_builder!(builder, Int64Builder).append_value(v),
        (DataType::Time64(_), LeafValue::Int64(v)) => {
            cast_builder!(builder, Time64MicrosecondBuilder).append_value(v)
        }
        (DataType::Timestamp(TimeUnit::Millisecond, _), LeafValue::Int64(v)) => {
            cast_builder!(builder, TimestampMillisecondBuilder).append_value(v)
        }
        (DataType::Timestamp(TimeUnit::Microsecond, _), LeafValue::Int64(v)) => {
            cast_builder!(builder, TimestampMicrosecondBuilder).append_value(v)
        }
        (DataType::Float32, LeafValue::Float(v)) => {
            cast_builder!(builder, Float32Builder).append_value(v)
        }
        (DataType::Float64, LeafValue::Double(v)) => {
            cast_builder!(builder, Float64Builder).append_value(v)
        }
        (DataType::Utf8, LeafValue::ByteArray(bytes)) => {
            let s = std::str::from_utf8(&bytes)
                .map_err(|_| type_mismatch(field, ValueTypeError::new("String", "Bytes")))?;
            cast_builder!(builder, StringBuilder).append_value(s)
        }
        (DataType::Binary, LeafValue::ByteArray(bytes)) => {
            cast_builder!(builder, BinaryBuilder).append_value(bytes)
        }
        (dt, leaf) => {
            return Err(type_mismatch(
                field,
                ValueTypeError::new(dt.to_string(), leaf.type_name()),
            ));
        }
    }
    Ok(())
}

/// Append a null at every level below `dt`. Used for absent values and for
/// the members of a null struct, where non-nullable children are masked by
/// the parent's null.
fn append_null(builder: &mut Box<dyn ArrayBuilder>, dt: &DataType) -> Result<(), ArrowConvertError> {
    match dt {
        DataType::Boolean => cast_builder!(builder, BooleanBuilder).append_null(),
        DataType::Int32 => cast_builder!(builder, Int32Builder).append_null(),
        DataType::Int64 => cast_builder!(builder, Int64Builder).append_null(),
        DataType::Float32 => cast_builder!(builder, Float32Builder).append_null(),
        DataType::Float64 => cast_builder!(builder, Float64Builder).append_null(),
        DataType::Utf8 => cast_builder!(builder, StringBuilder).append_null(),
        DataType::Binary => cast_builder!(builder, BinaryBuilder).append_null(),
        DataType::Date32 => cast_builder!(builder, Date32Builder).append_null(),
        DataType::Time32(_) => cast_builder!(builder, Time32MillisecondBuilder).append_null(),
        DataType::Time64(_) => cast_builder!(builder, Time64MicrosecondBuilder).append_null(),
        DataType::Timestamp(TimeUnit::Millisecond, _) => {
            cast_builder!(builder, TimestampMillisecondBuilder).append_null()
        }
        DataType::Timestamp(TimeUnit::Microsecond, _) => {
            cast_builder!(builder, TimestampMicrosecondBuilder).append_null()
        }
        DataType::List(_) => cast_builder!(builder, ListBuilder<Box<dyn ArrayBuilder>>).append(false),
        DataType::Struct(fields) => {
            let b = cast_builder!(builder, StructBuilder);
            for (i, child) in fields.iter().enumerate() {
                append_null(&mut b.field_builders_mut()[i], child.data_type())?;
            }
            b.append(false);
        }
        other => return Err(ArrowConvertError::UnsupportedDataType(other.to_string())),
    }
    Ok(())
}

pub(super) fn append_value_to_builder(
    builder: &mut Box<dyn ArrayBuilder>,
    field: &Field,
    value: &Value,
) -> Result<(), ArrowConvertError> {
    let dt = field.data_type();

    if value.is_null() {
        return match dt {
            DataType::List(_) if !field.is_nullable() => {
                cast_builder!(builder, ListBuilder<Box<dyn ArrayBuilder>>).append(true);
                Ok(())
            }
            _ if !field.is_nullable() => Err(ArrowConvertError::NullInNonNullableField {
                field: field.name().clone(),
            }),
            _ => append_null(builder, dt),
        };
    }

    if let Some(leaf_type) = leaf_type_for_datatype(dt) {
        let scalar = Scalar::from_value(value)
            .ok_or_else(|| type_mismatch(field, value.type_mismatch(leaf_type.name())))?;
        let leaf = coerce(scalar, leaf_type)
            .map_err(|e| type_mismatch(field, ValueTypeError::new(e.target_type, e.found)))?;
        return append_leaf(builder, field, leaf);
    }

    match dt {
        DataType::List(item) => {
            let items = value
                .try_list()
                .map_err(|source| type_mismatch(field, source))?;
            let b = cast_builder!(builder, ListBuilder<Box<dyn ArrayBuilder>>);
            for item_value in items {
                append_value_to_builder(b.values(), item, item_value)?;
            }
            b.append(true);
        }
        DataType::Struct(fields) => {
            let b = cast_builder!(builder, StructBuilder);
            for (i, child) in fields.iter().enumerate() {
                let child_value = value
                    .get_field(child.name())
                    .map_err(|source| type_mismatch(field, source))?
                    .unwrap_or(&Value::Null);
                append_value_to_builder(&mut b.field_builders_mut()[i], child, child_value)?;
            }
            b.append(true);
        }
        other => return Err(ArrowConvertError::UnsupportedDataType(other.to_string())),
    }
    Ok(())
}
