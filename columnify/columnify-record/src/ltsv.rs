use columnify_core::{DecoderError, RecordType, StructValue, Value};

use crate::decoder::{DecodedRecords, RecordDecoder};

/// Labeled tab-separated values: `label:value` pairs separated by tabs, one
/// record per line.
///
/// LTSV carries no types, so every value is typed by the first parse that
/// succeeds: bool, then integer, then float, then string. `0` and `1` stay
/// integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct LtsvDecoder;

impl RecordDecoder for LtsvDecoder {
    fn record_type(&self) -> RecordType {
        RecordType::Ltsv
    }

    fn decode(&self, data: &[u8]) -> Result<DecodedRecords, DecoderError> {
        let text = std::str::from_utf8(data).map_err(|e| DecoderError::RecordDecode {
            record_type: RecordType::Ltsv.to_string(),
            line: 1,
            source: e.into(),
        })?;

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                skipped += 1;
                continue;
            }
            rows.push(parse_line(line, i + 1)?);
        }

        if skipped > 0 {
            tracing::warn!(skipped, "skipped blank ltsv lines");
        }
        Ok(DecodedRecords::Rows(rows))
    }
}

fn parse_line(line: &str, line_no: usize) -> Result<Value, DecoderError> {
    let mut fields = StructValue::new();
    for pair in line.split('\t') {
        let (label, raw) = pair
            .split_once(':')
            .ok_or_else(|| DecoderError::RecordDecode {
                record_type: RecordType::Ltsv.to_string(),
                line: line_no,
                source: format!("field without label separator: '{pair}'").into(),
            })?;
        fields.insert(label.to_string(), typed_value(raw));
    }
    Ok(Value::Struct(fields))
}

fn typed_value(raw: &str) -> Value {
    if let Some(b) = parse_bool(raw) {
        return Value::Bool(b);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::I64(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::F64(f);
    }
    Value::string(raw)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
