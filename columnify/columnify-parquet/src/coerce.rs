//! Conversion of leaf values into their column representation.
//!
//! Both striping entry points reduce a leaf to a [`Scalar`] first, so generic
//! rows and Arrow batches go through the same rules.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use columnify_core::{TimeUnit, Value};

use crate::{physical::LeafType, table::LeafValue};

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Borrowed view of a non-null leaf value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Int(i64),
    UInt(u64),
    F32(f32),
    F64(f64),
    Str(&'a str),
    Bytes(&'a [u8]),
    Date(NaiveDate),
    /// Days since the Unix epoch.
    EpochDays(i32),
    Duration(TimeDelta),
    DateTime(DateTime<Utc>),
    /// Time of day as an integer in the given unit.
    Time(i64, TimeUnit),
    /// Instant since the epoch as an integer in the given unit.
    Timestamp(i64, TimeUnit),
}

impl<'a> Scalar<'a> {
    /// Scalar view of a row value. Returns `None` for null, struct and list
    /// values.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        Some(match value {
            Value::Bool(v) => Scalar::Bool(*v),
            Value::I8(v) => Scalar::Int(i64::from(*v)),
            Value::I16(v) => Scalar::Int(i64::from(*v)),
            Value::I32(v) => Scalar::Int(i64::from(*v)),
            Value::I64(v) => Scalar::Int(*v),
            Value::U8(v) => Scalar::UInt(u64::from(*v)),
            Value::U16(v) => Scalar::UInt(u64::from(*v)),
            Value::U32(v) => Scalar::UInt(u64::from(*v)),
            Value::U64(v) => Scalar::UInt(*v),
            Value::F32(v) => Scalar::F32(*v),
            Value::F64(v) => Scalar::F64(*v),
            Value::String(v) => Scalar::Str(v),
            Value::Bytes(v) => Scalar::Bytes(v),
            Value::Date(v) => Scalar::Date(*v),
            Value::Duration(v) => Scalar::Duration(*v),
            Value::DateTime(v) => Scalar::DateTime(*v),
            Value::Null | Value::Struct(_) | Value::List(_) => return None,
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "signed integer",
            Scalar::UInt(_) => "unsigned integer",
            Scalar::F32(_) => "float32",
            Scalar::F64(_) => "float64",
            Scalar::Str(_) => "string",
            Scalar::Bytes(_) => "bytes",
            Scalar::Date(_) | Scalar::EpochDays(_) => "date",
            Scalar::Duration(_) | Scalar::Time(..) => "time",
            Scalar::DateTime(_) | Scalar::Timestamp(..) => "timestamp",
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match *self {
            Scalar::Int(v) => Some(v),
            Scalar::UInt(v) => Some(v as i64),
            Scalar::F32(v) => Some(v as i64),
            Scalar::F64(v) => Some(v as i64),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match *self {
            Scalar::F32(v) => Some(f64::from(v)),
            Scalar::F64(v) => Some(v),
            Scalar::Int(v) => Some(v as f64),
            Scalar::UInt(v) => Some(v as f64),
            _ => None,
        }
    }
}

/// Why a scalar could not be converted.
#[derive(Debug, Clone, PartialEq)]
pub struct Unconvertible {
    pub target_type: &'static str,
    pub found: String,
}

/// Convert `scalar` to the column representation of `target`.
///
/// Integer narrowing wraps and float-to-integer conversion truncates toward
/// zero. Float targets also accept integers.
pub fn coerce(scalar: Scalar<'_>, target: LeafType) -> Result<LeafValue, Unconvertible> {
    let converted = match target {
        LeafType::Bool => match scalar {
            Scalar::Bool(v) => Some(LeafValue::Boolean(v)),
            _ => None,
        },
        LeafType::Int32 => scalar.as_i64().map(|v| LeafValue::Int32(v as i32)),
        LeafType::Int64 => scalar.as_i64().map(LeafValue::Int64),
        LeafType::Float => match scalar {
            Scalar::F32(v) => Some(LeafValue::Float(v)),
            other => other.as_f64().map(|v| LeafValue::Float(v as f32)),
        },
        LeafType::Double => scalar.as_f64().map(LeafValue::Double),
        LeafType::String => match scalar {
            Scalar::Str(s) => Some(LeafValue::ByteArray(s.as_bytes().to_vec())),
            Scalar::Bytes(b) => std::str::from_utf8(b)
                .ok()
                .map(|s| LeafValue::ByteArray(s.as_bytes().to_vec())),
            _ => None,
        },
        LeafType::Binary => match scalar {
            Scalar::Str(s) => Some(LeafValue::ByteArray(s.as_bytes().to_vec())),
            Scalar::Bytes(b) => Some(LeafValue::ByteArray(b.to_vec())),
            _ => None,
        },
        LeafType::Date => match scalar {
            Scalar::Date(d) => Some(LeafValue::Int32(epoch_days(d))),
            Scalar::EpochDays(d) => Some(LeafValue::Int32(d)),
            Scalar::Int(_) | Scalar::UInt(_) => scalar.as_i64().map(|v| LeafValue::Int32(v as i32)),
            _ => None,
        },
        LeafType::Time(unit) => {
            let raw = match scalar {
                Scalar::Duration(d) => duration_in(d, unit),
                Scalar::Time(v, from) => Some(rescale(v, from, unit)),
                Scalar::Int(_) | Scalar::UInt(_) => scalar.as_i64(),
                _ => None,
            };
            raw.map(|v| match unit {
                TimeUnit::Millis => LeafValue::Int32(v as i32),
                TimeUnit::Micros => LeafValue::Int64(v),
            })
        }
        LeafType::Timestamp(unit) => match scalar {
            Scalar::DateTime(dt) => Some(LeafValue::Int64(match unit {
                TimeUnit::Millis => dt.timestamp_millis(),
                TimeUnit::Micros => dt.timestamp_micros(),
            })),
            Scalar::Timestamp(v, from) => Some(LeafValue::Int64(rescale(v, from, unit))),
            Scalar::Int(_) | Scalar::UInt(_) => scalar.as_i64().map(LeafValue::Int64),
            _ => None,
        },
    };

    converted.ok_or_else(|| Unconvertible {
        target_type: target.name(),
        found: scalar.kind().to_string(),
    })
}

fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

fn duration_in(d: TimeDelta, unit: TimeUnit) -> Option<i64> {
    match unit {
        TimeUnit::Millis => Some(d.num_milliseconds()),
        TimeUnit::Micros => d.num_microseconds(),
    }
}

fn rescale(v: i64, from: TimeUnit, to: TimeUnit) -> i64 {
    match (from, to) {
        (TimeUnit::Millis, TimeUnit::Micros) => v.saturating_mul(1_000),
        (TimeUnit::Micros, TimeUnit::Millis) => v.div_euclid(1_000),
        _ => v,
    }
}
