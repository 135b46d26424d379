//! Format-agnostic core types for `columnify`.
//!
//! This crate provides the intermediate schema model ([`IntermediateSchema`] /
//! [`FieldDef`] / [`DataTypeDef`]) that every schema adapter produces, and the
//! tagged [`Value`] tree that every record decoder produces. Neither depends on
//! Arrow or Parquet.

mod error;
mod record_type;
mod schema;
mod schema_type;
mod value;

pub use error::{DecoderError, SchemaError, ValueTypeError};
pub use record_type::RecordType;
pub use schema::{
    DataTypeDef, ElementDef, FieldDef, FieldDefs, IntermediateSchema, SchemaVisitor, TimeUnit,
    canonical_name, format_field_defs,
};
pub use schema_type::SchemaType;
pub use value::{StructValue, Value};
