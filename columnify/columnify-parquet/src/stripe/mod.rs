//! Record striping: turning nested rows into per-leaf value, definition
//! level and repetition level columns.
//!
//! One level-computation core drives both entry points. It walks each row
//! with an explicit work stack and reads values through a [`Cursor`], which
//! is implemented once for generic [`Value`](columnify_core::Value) rows
//! ([`stripe_rows`]) and once for Arrow record batches
//! ([`stripe_columnar_batch`]).
//!
//! Level accounting:
//! - a present `OPTIONAL` node adds one definition level;
//! - every element of a `REPEATED` node adds one definition level, the list
//!   itself adds none;
//! - the first element of a list keeps the enclosing repetition level, later
//!   elements take the list's maximum repetition level;
//! - an absent optional branch, or an absent or empty list, writes one null
//!   placeholder to every leaf below it at the current levels.

mod columnar;
mod rows;

use std::ops::Range;

use columnify_core::ValueTypeError;
use parquet::basic::Repetition;

use crate::{
    coerce::{Scalar, coerce},
    error::StripeError,
    physical::{NodeKind, PhysicalSchema},
    table::Table,
};

pub use columnar::stripe_columnar_batch;
pub use rows::stripe_rows;

/// Read access to one position of a nested row.
pub(crate) trait Cursor: Copy {
    fn is_null(&self) -> bool;

    /// Struct member by field name, `Ok(None)` when absent. Fails when this
    /// position does not hold a struct.
    fn field(&self, name: &str) -> Result<Option<Self>, ValueTypeError>;

    /// Fails when this position does not hold a list.
    fn list_len(&self) -> Result<usize, ValueTypeError>;

    fn element(&self, index: usize) -> Option<Self>;

    /// `None` when this position does not hold a scalar.
    fn scalar(&self) -> Option<Scalar<'_>>;

    /// Description of the value for error messages.
    fn describe(&self) -> String;
}

#[derive(Clone, Copy)]
enum Frame<C> {
    /// A node together with its value; repeated nodes still hold the list.
    Node { node: usize, value: C, def: i16, rep: i16 },
    /// One element of a repeated node.
    Element { node: usize, value: C, def: i16, rep: i16 },
}

pub(crate) fn check_range(range: &Range<usize>, len: usize) -> Result<(), StripeError> {
    if range.start > range.end || range.end > len {
        return Err(StripeError::RowRangeOutOfBounds {
            begin: range.start,
            end: range.end,
            len,
        });
    }
    Ok(())
}

/// Stripe every row yielded by `rows` into a fresh [`Table`].
pub(crate) fn stripe<C: Cursor>(
    schema: &PhysicalSchema,
    rows: impl IntoIterator<Item = C>,
) -> Result<Table, StripeError> {
    let mut striper = Striper {
        schema,
        table: Table::new(schema),
        stack: Vec::new(),
    };
    for row in rows {
        striper.stripe_row(row)?;
    }
    Ok(striper.table)
}

struct Striper<'s, C> {
    schema: &'s PhysicalSchema,
    table: Table,
    stack: Vec<Frame<C>>,
}

impl<C: Cursor> Striper<'_, C> {
    fn stripe_row(&mut self, row: C) -> Result<(), StripeError> {
        self.stack.push(Frame::Node {
            node: 0,
            value: row,
            def: 0,
            rep: 0,
        });

        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Node {
                    node,
                    value,
                    def,
                    rep,
                } => {
                    let n = self.schema.node(node);
                    match (n.repetition, n.kind) {
                        (Repetition::REPEATED, _) => self.expand_list(node, value, def, rep)?,
                        (_, NodeKind::Leaf(_)) => self.write_leaf(node, value, def, rep)?,
                        (_, NodeKind::Group { .. }) => self.visit_members(node, value, def, rep)?,
                    }
                }
                Frame::Element {
                    node,
                    value,
                    def,
                    rep,
                } => match self.schema.node(node).kind {
                    NodeKind::Leaf(_) => self.write_leaf(node, value, def, rep)?,
                    NodeKind::Group { .. } => self.visit_members(node, value, def, rep)?,
                },
            }
        }
        Ok(())
    }

    fn visit_members(&mut self, node: usize, value: C, def: i16, rep: i16) -> Result<(), StripeError> {
        let schema = self.schema;
        let group = schema.node(node);

        for &child in group.children().iter().rev() {
            let member = schema.node(child);
            let found = value
                .field(&member.name)
                .map_err(|source| StripeError::SchemaMismatch {
                    path: group.path.clone(),
                    source,
                })?
                .filter(|v| !v.is_null());

            match (found, member.repetition) {
                (Some(v), Repetition::OPTIONAL) => self.stack.push(Frame::Node {
                    node: child,
                    value: v,
                    def: def + 1,
                    rep,
                }),
                (Some(v), _) => self.stack.push(Frame::Node {
                    node: child,
                    value: v,
                    def,
                    rep,
                }),
                (None, Repetition::REQUIRED) => {
                    return Err(StripeError::NullInRequiredField {
                        path: member.path.clone(),
                    });
                }
                (None, _) => self.write_placeholders(child, def, rep),
            }
        }
        Ok(())
    }

    fn expand_list(&mut self, node: usize, value: C, def: i16, rep: i16) -> Result<(), StripeError> {
        let schema = self.schema;
        let list = schema.node(node);
        let mismatch = |source| StripeError::SchemaMismatch {
            path: list.path.clone(),
            source,
        };

        let len = value.list_len().map_err(mismatch)?;
        if len == 0 {
            self.write_placeholders(node, def, rep);
            return Ok(());
        }

        for index in (0..len).rev() {
            let element = value
                .element(index)
                .ok_or_else(|| mismatch(ValueTypeError::new("List", value.describe())))?;
            if element.is_null() {
                return Err(StripeError::NullListElement {
                    path: list.path.clone(),
                    index,
                });
            }
            self.stack.push(Frame::Element {
                node,
                value: element,
                def: def + 1,
                rep: if index == 0 {
                    rep
                } else {
                    list.max_repetition_level
                },
            });
        }
        Ok(())
    }

    fn write_leaf(&mut self, node: usize, value: C, def: i16, rep: i16) -> Result<(), StripeError> {
        let schema = self.schema;
        let leaf = schema.node(node);
        let NodeKind::Leaf(leaf_type) = leaf.kind else {
            return Ok(());
        };

        let unconvertible = |found: String| StripeError::UnconvertibleValue {
            path: leaf.path.clone(),
            target_type: leaf_type.name(),
            found,
        };
        let scalar = value.scalar().ok_or_else(|| unconvertible(value.describe()))?;
        let converted = coerce(scalar, leaf_type).map_err(|e| unconvertible(e.found))?;

        let ordinal = leaf.leaf_range().start;
        self.table
            .column_at_mut(ordinal)
            .push(Some(converted), def, rep);
        Ok(())
    }

    fn write_placeholders(&mut self, node: usize, def: i16, rep: i16) {
        for ordinal in self.schema.node(node).leaf_range() {
            self.table.column_at_mut(ordinal).push(None, def, rep);
        }
    }
}
