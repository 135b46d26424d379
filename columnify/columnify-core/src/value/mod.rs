//! Tagged record value tree produced by record decoders.

mod de;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use indexmap::IndexMap;

use crate::{error::ValueTypeError, schema::canonical_name};

/// Field map of a [`Value::Struct`], in source order.
pub type StructValue = IndexMap<String, Value>;

/// Value produced by record decoders.
///
/// Scalars keep their source width; conversion to a column type happens only
/// when a leaf is written.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(Arc<str>),
    Bytes(Arc<[u8]>),
    Date(NaiveDate),
    Duration(TimeDelta),
    DateTime(DateTime<Utc>),
    Struct(StructValue),
    List(Vec<Value>),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    pub fn bytes(b: impl AsRef<[u8]>) -> Self {
        Self::Bytes(Arc::from(b.as_ref()))
    }

    /// Build a struct value from `(name, value)` pairs.
    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::Struct(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Look up a struct member by name.
    ///
    /// An exact match wins; otherwise names are compared in canonical form so
    /// that `UserId` finds a member written as `userId`. Returns `Ok(None)`
    /// when the member is absent.
    pub fn get_field(&self, name: &str) -> Result<Option<&Value>, ValueTypeError> {
        let Value::Struct(fields) = self else {
            return Err(self.type_mismatch("Struct"));
        };
        if let Some(v) = fields.get(name) {
            return Ok(Some(v));
        }
        let wanted = canonical_name(name);
        Ok(fields
            .iter()
            .find(|(k, _)| canonical_name(k) == wanted)
            .map(|(_, v)| v))
    }

    pub fn try_list(&self) -> Result<&[Value], ValueTypeError> {
        match self {
            Value::List(items) => Ok(items),
            _ => Err(self.type_mismatch("List")),
        }
    }

    pub fn type_mismatch(&self, expected: impl Into<String>) -> ValueTypeError {
        ValueTypeError::new(expected, self.variant_name())
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::I8(_) => "I8",
            Value::I16(_) => "I16",
            Value::I32(_) => "I32",
            Value::I64(_) => "I64",
            Value::U8(_) => "U8",
            Value::U16(_) => "U16",
            Value::U32(_) => "U32",
            Value::U64(_) => "U64",
            Value::F32(_) => "F32",
            Value::F64(_) => "F64",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Date(_) => "Date",
            Value::Duration(_) => "Duration",
            Value::DateTime(_) => "DateTime",
            Value::Struct(_) => "Struct",
            Value::List(_) => "List",
        }
    }
}
