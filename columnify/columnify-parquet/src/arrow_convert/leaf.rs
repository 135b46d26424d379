use arrow::datatypes::{DataType, TimeUnit as ArrowTimeUnit};
use columnify_core::TimeUnit;

use crate::physical::LeafType;

/// Leaf type whose column representation an Arrow primitive type holds.
/// `None` for nested and unsupported types.
pub fn leaf_type_for_datatype(dt: &DataType) -> Option<LeafType> {
    Some(match dt {
        DataType::Boolean => LeafType::Bool,
        DataType::Int32 => LeafType::Int32,
        DataType::Int64 => LeafType::Int64,
        DataType::Float32 => LeafType::Float,
        DataType::Float64 => LeafType::Double,
        DataType::Utf8 => LeafType::String,
        DataType::Binary => LeafType::Binary,
        DataType::Date32 => LeafType::Date,
        DataType::Time32(ArrowTimeUnit::Millisecond) => LeafType::Time(TimeUnit::Millis),
        DataType::Time64(ArrowTimeUnit::Microsecond) => LeafType::Time(TimeUnit::Micros),
        DataType::Timestamp(ArrowTimeUnit::Millisecond, _) => LeafType::Timestamp(TimeUnit::Millis),
        DataType::Timestamp(ArrowTimeUnit::Microsecond, _) => LeafType::Timestamp(TimeUnit::Micros),
        _ => return None,
    })
}
