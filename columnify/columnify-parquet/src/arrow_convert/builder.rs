use arrow::{
    array::{
        ArrayBuilder, BinaryBuilder, BooleanBuilder, Date32Builder, Float32Builder,
        Float64Builder, Int32Builder, Int64Builder, ListBuilder, StringBuilder, StructBuilder,
        Time32MillisecondBuilder, Time64MicrosecondBuilder, TimestampMicrosecondBuilder,
        TimestampMillisecondBuilder,
    },
    datatypes::{DataType, TimeUnit},
};

use crate::error::ArrowConvertError;

pub(super) fn make_builder(
    dt: &DataType,
    capacity: usize,
) -> Result<Box<dyn ArrayBuilder>, ArrowConvertError> {
    Ok(match dt {
        DataType::Boolean => Box::new(BooleanBuilder::with_capacity(capacity)),
        DataType::Int32 => Box::new(Int32Builder::with_capacity(capacity)),
        DataType::Int64 => Box::new(Int64Builder::with_capacity(capacity)),
        DataType::Float32 => Box::new(Float32Builder::with_capacity(capacity)),
        DataType::Float64 => Box::new(Float64Builder::with_capacity(capacity)),
        DataType::Utf8 => Box::new(StringBuilder::with_capacity(capacity, 64)),
        DataType::Binary => Box::new(BinaryBuilder::with_capacity(capacity, 64)),
        DataType::Date32 => Box::new(Date32Builder::with_capacity(capacity)),
        DataType::Time32(TimeUnit::Millisecond) => {
            Box::new(Time32MillisecondBuilder::with_capacity(capacity))
        }
        DataType::Time64(TimeUnit::Microsecond) => {
            Box::new(Time64MicrosecondBuilder::with_capacity(capacity))
        }
        DataType::Timestamp(TimeUnit::Millisecond, _) => Box::new(
            TimestampMillisecondBuilder::with_capacity(capacity).with_data_type(dt.clone()),
        ),
        DataType::Timestamp(TimeUnit::Microsecond, _) => Box::new(
            TimestampMicrosecondBuilder::with_capacity(capacity).with_data_type(dt.clone()),
        ),
        DataType::List(field) => {
            let child = make_builder(field.data_type(), capacity.saturating_mul(4))?;
            Box::new(ListBuilder::new(child).with_field(field.clone()))
        }
        DataType::Struct(fields) => {
            let child_builders = fields
                .iter()
                .map(|f| make_builder(f.data_type(), capacity))
                .collect::<Result<Vec<_>, _>>()?;
            Box::new(StructBuilder::new(fields.clone(), child_builders))
        }
        other => return Err(ArrowConvertError::UnsupportedDataType(other.to_string())),
    })
}
