//! Avro schema adapter for the columnify pipeline.
//!
//! [`avro_schema_to_intermediate`] maps a JSON Avro record schema onto the
//! [`IntermediateSchema`](columnify_core::IntermediateSchema) used by the rest
//! of the pipeline.
//!
//! Supported shapes are the Avro primitive types, inline nested `record`
//! types, the nullable union `["null", T]` (either order), and the `date`,
//! `time-millis`, `time-micros`, `timestamp-millis` and `timestamp-micros`
//! logical types. Everything else is rejected with a
//! [`SchemaError`](columnify_core::SchemaError).

mod schema;

pub use schema::avro_schema_to_intermediate;
