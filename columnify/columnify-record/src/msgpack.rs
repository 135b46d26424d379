use std::io::Cursor;

use columnify_core::{DecoderError, RecordType, Value};
use serde::Deserialize;

use crate::decoder::{DecodedRecords, RecordDecoder, ensure_record};

/// A concatenated stream of MessagePack maps, one per record.
///
/// Record positions in errors are 1-based record indexes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackDecoder;

impl RecordDecoder for MsgPackDecoder {
    fn record_type(&self) -> RecordType {
        RecordType::MsgPack
    }

    fn decode(&self, data: &[u8]) -> Result<DecodedRecords, DecoderError> {
        let mut cursor = Cursor::new(data);
        let mut rows = Vec::new();

        while (cursor.position() as usize) < data.len() {
            let index = rows.len() + 1;
            let mut de = rmp_serde::Deserializer::new(&mut cursor);
            let value = Value::deserialize(&mut de).map_err(|e| DecoderError::RecordDecode {
                record_type: RecordType::MsgPack.to_string(),
                line: index,
                source: e.into(),
            })?;
            rows.push(ensure_record(RecordType::MsgPack, index, value)?);
        }

        Ok(DecodedRecords::Rows(rows))
    }
}
