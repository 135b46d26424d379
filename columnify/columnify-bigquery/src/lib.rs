//! BigQuery schema adapter for the columnify pipeline.
//!
//! [`bigquery_schema_to_intermediate`] maps the JSON array form of a BigQuery
//! table schema (as written by `bq show --schema`) onto an
//! [`IntermediateSchema`](columnify_core::IntermediateSchema).

mod schema;

pub use schema::bigquery_schema_to_intermediate;
