use std::ops::Range;

use columnify_core::{Value, ValueTypeError};

use super::{Cursor, check_range, stripe};
use crate::{coerce::Scalar, error::StripeError, physical::PhysicalSchema, table::Table};

impl Cursor for &Value {
    fn is_null(&self) -> bool {
        Value::is_null(self)
    }

    fn field(&self, name: &str) -> Result<Option<Self>, ValueTypeError> {
        self.get_field(name)
    }

    fn list_len(&self) -> Result<usize, ValueTypeError> {
        self.try_list().map(<[Value]>::len)
    }

    fn element(&self, index: usize) -> Option<Self> {
        match *self {
            Value::List(items) => items.get(index),
            _ => None,
        }
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        Scalar::from_value(self)
    }

    fn describe(&self) -> String {
        self.variant_name().to_string()
    }
}

/// Stripe `rows[range]` against `schema`.
///
/// Every row must be a [`Value::Struct`]; member names are matched exactly
/// first and then by canonical name. Members that the schema does not know
/// are ignored.
pub fn stripe_rows(
    rows: &[Value],
    schema: &PhysicalSchema,
    range: Range<usize>,
) -> Result<Table, StripeError> {
    check_range(&range, rows.len())?;
    let count = range.len();

    let table = stripe(schema, rows[range].iter())?;
    tracing::debug!(rows = count, columns = table.num_columns(), "striped rows");
    Ok(table)
}
