use columnify_core::{DecoderError, RecordType, Value};

use crate::decoder::{DecodedRecords, RecordDecoder, ensure_record};

/// One JSON object per line. Blank lines are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonlDecoder;

impl RecordDecoder for JsonlDecoder {
    fn record_type(&self) -> RecordType {
        RecordType::Jsonl
    }

    fn decode(&self, data: &[u8]) -> Result<DecodedRecords, DecoderError> {
        let decode_error = |line: usize, source: Box<dyn std::error::Error + Send + Sync>| {
            DecoderError::RecordDecode {
                record_type: RecordType::Jsonl.to_string(),
                line,
                source,
            }
        };

        let text = std::str::from_utf8(data).map_err(|e| decode_error(1, e.into()))?;
        let mut rows = Vec::new();
        let mut skipped = 0usize;

        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            if line.trim().is_empty() {
                skipped += 1;
                continue;
            }
            let value: Value =
                serde_json::from_str(line).map_err(|e| decode_error(line_no, e.into()))?;
            rows.push(ensure_record(RecordType::Jsonl, line_no, value)?);
        }

        if skipped > 0 {
            tracing::warn!(skipped, "skipped blank jsonl lines");
        }
        Ok(DecodedRecords::Rows(rows))
    }
}
