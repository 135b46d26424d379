//! Decoder trait and record type dispatch.

use arrow::{datatypes::SchemaRef, record_batch::RecordBatch};
use columnify_core::{DecoderError, RecordType, Value};

use crate::{
    avro::AvroDecoder, delimited::DelimitedDecoder, jsonl::JsonlDecoder, ltsv::LtsvDecoder,
    msgpack::MsgPackDecoder,
};

/// Records decoded from one input buffer.
#[derive(Debug, Clone)]
pub enum DecodedRecords {
    /// Generic rows, one struct value per record.
    Rows(Vec<Value>),
    /// A typed columnar batch.
    Columnar(RecordBatch),
}

impl DecodedRecords {
    pub fn num_rows(&self) -> usize {
        match self {
            Self::Rows(rows) => rows.len(),
            Self::Columnar(batch) => batch.num_rows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }
}

/// Decodes a whole input buffer of one record format.
pub trait RecordDecoder: Send + Sync {
    /// Record format handled by this decoder.
    fn record_type(&self) -> RecordType;

    /// Decode every record in `data`.
    fn decode(&self, data: &[u8]) -> Result<DecodedRecords, DecoderError>;
}

/// Build the decoder for `record_type`.
///
/// `schema` is the Arrow form of the target schema; only the delimited
/// formats use it.
pub fn decoder_for(
    record_type: RecordType,
    schema: SchemaRef,
) -> Result<Box<dyn RecordDecoder>, DecoderError> {
    Ok(match record_type {
        RecordType::Jsonl => Box::new(JsonlDecoder),
        RecordType::Ltsv => Box::new(LtsvDecoder),
        RecordType::MsgPack => Box::new(MsgPackDecoder),
        RecordType::Csv => Box::new(DelimitedDecoder::csv(schema)),
        RecordType::Tsv => Box::new(DelimitedDecoder::tsv(schema)),
        RecordType::Avro => Box::new(AvroDecoder),
    })
}

/// Check that a decoded value is a record.
pub(crate) fn ensure_record(
    record_type: RecordType,
    line: usize,
    value: Value,
) -> Result<Value, DecoderError> {
    match value {
        Value::Struct(_) => Ok(value),
        other => Err(DecoderError::NotARecord {
            record_type: record_type.to_string(),
            line,
            found: other.variant_name(),
        }),
    }
}
