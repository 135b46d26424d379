use std::ops::Range;

use arrow::{
    array::{Array, AsArray, GenericListArray, OffsetSizeTrait, StructArray},
    datatypes::{
        DataType, Date32Type, Date64Type, Float32Type, Float64Type, Int8Type, Int16Type,
        Int32Type, Int64Type, Time32MillisecondType, Time32SecondType, Time64MicrosecondType,
        Time64NanosecondType, TimeUnit as ArrowTimeUnit, TimestampMicrosecondType,
        TimestampMillisecondType, TimestampNanosecondType, TimestampSecondType, UInt8Type,
        UInt16Type, UInt32Type, UInt64Type,
    },
    record_batch::RecordBatch,
};
use chrono::{DateTime, TimeDelta};
use columnify_core::{TimeUnit, ValueTypeError, canonical_name};

use super::{Cursor, check_range, stripe};
use crate::{coerce::Scalar, error::StripeError, physical::PhysicalSchema, table::Table};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// One row position inside an Arrow array.
#[derive(Clone, Copy)]
struct ArrowCursor<'a> {
    array: &'a dyn Array,
    row: usize,
}

impl<'a> ArrowCursor<'a> {
    fn mismatch(&self, expected: &str) -> ValueTypeError {
        ValueTypeError::new(expected, self.array.data_type().to_string())
    }

    fn list_bounds<O: OffsetSizeTrait>(&self, list: &'a GenericListArray<O>) -> (&'a dyn Array, usize, usize) {
        let offsets = list.value_offsets();
        let start = offsets[self.row].as_usize();
        let end = offsets[self.row + 1].as_usize();
        (list.values().as_ref(), start, end - start)
    }

    fn list(&self) -> Option<(&'a dyn Array, usize, usize)> {
        let array: &'a dyn Array = self.array;
        match array.data_type() {
            DataType::List(_) => Some(self.list_bounds(array.as_list::<i32>())),
            DataType::LargeList(_) => Some(self.list_bounds(array.as_list::<i64>())),
            _ => None,
        }
    }
}

impl<'a> Cursor for ArrowCursor<'a> {
    fn is_null(&self) -> bool {
        self.array.is_null(self.row)
    }

    fn field(&self, name: &str) -> Result<Option<Self>, ValueTypeError> {
        let array: &'a dyn Array = self.array;
        let Some(parent) = array.as_struct_opt() else {
            return Err(self.mismatch("Struct"));
        };

        let column = parent.column_by_name(name).or_else(|| {
            let wanted = canonical_name(name);
            parent
                .fields()
                .iter()
                .position(|f| canonical_name(f.name()) == wanted)
                .map(|i| parent.column(i))
        });

        Ok(column.map(|c| ArrowCursor {
            array: c.as_ref(),
            row: self.row,
        }))
    }

    fn list_len(&self) -> Result<usize, ValueTypeError> {
        self.list()
            .map(|(_, _, len)| len)
            .ok_or_else(|| self.mismatch("List"))
    }

    fn element(&self, index: usize) -> Option<Self> {
        let (values, start, len) = self.list()?;
        (index < len).then_some(ArrowCursor {
            array: values,
            row: start + index,
        })
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        let a = self.array;
        let i = self.row;
        Some(match a.data_type() {
            DataType::Boolean => Scalar::Bool(a.as_boolean().value(i)),
            DataType::Int8 => Scalar::Int(i64::from(a.as_primitive::<Int8Type>().value(i))),
            DataType::Int16 => Scalar::Int(i64::from(a.as_primitive::<Int16Type>().value(i))),
            DataType::Int32 => Scalar::Int(i64::from(a.as_primitive::<Int32Type>().value(i))),
            DataType::Int64 => Scalar::Int(a.as_primitive::<Int64Type>().value(i)),
            DataType::UInt8 => Scalar::UInt(u64::from(a.as_primitive::<UInt8Type>().value(i))),
            DataType::UInt16 => Scalar::UInt(u64::from(a.as_primitive::<UInt16Type>().value(i))),
            DataType::UInt32 => Scalar::UInt(u64::from(a.as_primitive::<UInt32Type>().value(i))),
            DataType::UInt64 => Scalar::UInt(a.as_primitive::<UInt64Type>().value(i)),
            DataType::Float32 => Scalar::F32(a.as_primitive::<Float32Type>().value(i)),
            DataType::Float64 => Scalar::F64(a.as_primitive::<Float64Type>().value(i)),
            DataType::Utf8 => Scalar::Str(a.as_string::<i32>().value(i)),
            DataType::LargeUtf8 => Scalar::Str(a.as_string::<i64>().value(i)),
            DataType::Binary => Scalar::Bytes(a.as_binary::<i32>().value(i)),
            DataType::LargeBinary => Scalar::Bytes(a.as_binary::<i64>().value(i)),
            DataType::Date32 => Scalar::EpochDays(a.as_primitive::<Date32Type>().value(i)),
            DataType::Date64 => {
                let millis = a.as_primitive::<Date64Type>().value(i);
                Scalar::EpochDays(i32::try_from(millis.div_euclid(MILLIS_PER_DAY)).ok()?)
            }
            DataType::Time32(ArrowTimeUnit::Second) => Scalar::Duration(TimeDelta::seconds(
                i64::from(a.as_primitive::<Time32SecondType>().value(i)),
            )),
            DataType::Time32(ArrowTimeUnit::Millisecond) => Scalar::Time(
                i64::from(a.as_primitive::<Time32MillisecondType>().value(i)),
                TimeUnit::Millis,
            ),
            DataType::Time64(ArrowTimeUnit::Microsecond) => Scalar::Time(
                a.as_primitive::<Time64MicrosecondType>().value(i),
                TimeUnit::Micros,
            ),
            DataType::Time64(ArrowTimeUnit::Nanosecond) => Scalar::Duration(
                TimeDelta::nanoseconds(a.as_primitive::<Time64NanosecondType>().value(i)),
            ),
            DataType::Timestamp(ArrowTimeUnit::Second, _) => Scalar::DateTime(
                DateTime::from_timestamp(a.as_primitive::<TimestampSecondType>().value(i), 0)?,
            ),
            DataType::Timestamp(ArrowTimeUnit::Millisecond, _) => Scalar::Timestamp(
                a.as_primitive::<TimestampMillisecondType>().value(i),
                TimeUnit::Millis,
            ),
            DataType::Timestamp(ArrowTimeUnit::Microsecond, _) => Scalar::Timestamp(
                a.as_primitive::<TimestampMicrosecondType>().value(i),
                TimeUnit::Micros,
            ),
            DataType::Timestamp(ArrowTimeUnit::Nanosecond, _) => Scalar::DateTime(
                DateTime::from_timestamp_nanos(a.as_primitive::<TimestampNanosecondType>().value(i)),
            ),
            _ => return None,
        })
    }

    fn describe(&self) -> String {
        self.array.data_type().to_string()
    }
}

/// Stripe rows `range` of `batch` against `schema`.
///
/// Columns are matched to schema fields by name, exactly first and then by
/// canonical name. Produces the same [`Table`] as
/// [`stripe_rows`](super::stripe_rows) over the equivalent generic rows.
pub fn stripe_columnar_batch(
    batch: &RecordBatch,
    schema: &PhysicalSchema,
    range: Range<usize>,
) -> Result<Table, StripeError> {
    check_range(&range, batch.num_rows())?;
    let count = range.len();

    let root = StructArray::from(batch.clone());
    let table = stripe(
        schema,
        range.map(|row| ArrowCursor { array: &root, row }),
    )?;
    tracing::debug!(rows = count, columns = table.num_columns(), "striped record batch");
    Ok(table)
}
