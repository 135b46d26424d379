//! Convert semi-structured records into Parquet.
//!
//! A [`Columnifier`] reads a schema document (Avro or BigQuery), compiles it
//! into a physical Parquet schema, decodes input records, stripes them into
//! columns in parallel and writes Parquet row groups.
//!
//! ```no_run
//! use columnify::{Columnifier, Config, RecordType, SchemaType};
//!
//! # fn main() -> Result<(), columnify::ColumnifyError> {
//! let config = Config::new(SchemaType::Avro, RecordType::Jsonl);
//! let out = std::fs::File::create("out.parquet")?;
//! let mut columnifier = Columnifier::from_schema_file("schema.avsc", &config, out)?;
//! columnifier.write_from_files(["records.jsonl"])?;
//! columnifier.close()?;
//! # Ok(())
//! # }
//! ```

mod columnifier;
mod config;
mod error;
mod schema;

pub use columnifier::Columnifier;
pub use config::{Codec, Config, DEFAULT_STRIPE_CHUNK_ROWS, ParquetConfig};
pub use error::ColumnifyError;
pub use schema::{read_schema_file, schema_from_bytes};

pub use columnify_avro as avro;
pub use columnify_bigquery as bigquery;
pub use columnify_core as core;
pub use columnify_core::{RecordType, SchemaType};
pub use columnify_parquet as parquet;
pub use columnify_record as record;
