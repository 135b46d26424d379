//! Record decoders for `columnify`.
//!
//! Line- and stream-oriented formats (JSON lines, LTSV, MessagePack) and Avro
//! container files decode into generic [`Value`](columnify_core::Value) rows.
//! Delimited formats (CSV, TSV) have no field names of their own and decode
//! positionally into an Arrow `RecordBatch` typed by the target schema.

mod avro;
mod decoder;
mod delimited;
mod jsonl;
mod ltsv;
mod msgpack;

pub use avro::AvroDecoder;
pub use decoder::{DecodedRecords, RecordDecoder, decoder_for};
pub use delimited::DelimitedDecoder;
pub use jsonl::JsonlDecoder;
pub use ltsv::LtsvDecoder;
pub use msgpack::MsgPackDecoder;
