//! Intermediate schema model shared by schema adapters and the physical
//! schema compiler.

mod format;
mod naming;
mod types;
mod visit;

pub use format::format_field_defs;
pub use naming::canonical_name;
pub use types::{DataTypeDef, ElementDef, FieldDef, FieldDefs, IntermediateSchema, TimeUnit};
pub use visit::SchemaVisitor;
