//! Columnar layout for `columnify`.
//!
//! This crate turns an [`IntermediateSchema`](columnify_core::IntermediateSchema)
//! and decoded rows into Parquet:
//! 1. [`PhysicalSchema::compile`] flattens the schema into groups and leaves
//!    and derives the maximum definition and repetition level of every node.
//! 2. [`stripe_rows`] / [`stripe_columnar_batch`] shred generic rows or an
//!    Arrow `RecordBatch` into a [`Table`] of per-leaf values and levels.
//! 3. [`TableWriter`] writes each table as a Parquet row group.
//!
//! [`field_defs_to_arrow_schema`] and [`rows_to_record_batch`] bridge generic
//! rows to Arrow so both striping entry points can be fed the same data.
//!
//! # Typical Flow
//! ```rust
//! use columnify_core::{DataTypeDef, FieldDef, IntermediateSchema, Value};
//! use columnify_parquet::{PhysicalSchema, stripe_rows};
//!
//! let schema = IntermediateSchema::new(
//!     "r",
//!     vec![FieldDef::new("id", DataTypeDef::I64, false)],
//! );
//! let physical = PhysicalSchema::compile(&schema).unwrap();
//! let rows = vec![Value::record([("id", Value::I64(7))])];
//! let table = stripe_rows(&rows, &physical, 0..rows.len()).unwrap();
//! assert_eq!(table.num_rows(), 1);
//! ```
pub mod arrow_convert;
pub mod coerce;
pub mod error;
pub mod physical;
pub mod schema_convert;
pub mod stripe;
pub mod table;
pub mod writer;

pub use arrow_convert::rows_to_record_batch;
pub use error::{ArrowConvertError, StripeError, WriteError};
pub use physical::{LeafType, NodeKind, PhysicalNode, PhysicalSchema};
pub use schema_convert::field_defs_to_arrow_schema;
pub use stripe::{stripe_columnar_batch, stripe_rows};
pub use table::{Column, LeafValue, Table};
pub use writer::TableWriter;
