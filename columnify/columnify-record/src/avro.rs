use apache_avro::{Reader, types::Value as AvroValue};
use chrono::{DateTime, NaiveDate, TimeDelta};
use columnify_core::{DecoderError, RecordType, StructValue, Value, ValueTypeError};

use crate::decoder::{DecodedRecords, RecordDecoder, ensure_record};

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Avro object container file. The writer schema comes from the file header.
///
/// Union values are replaced by the branch they hold, so an optional field
/// reads the same as in the other formats. Record positions in errors are
/// 1-based record indexes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvroDecoder;

impl RecordDecoder for AvroDecoder {
    fn record_type(&self) -> RecordType {
        RecordType::Avro
    }

    fn decode(&self, data: &[u8]) -> Result<DecodedRecords, DecoderError> {
        if data.is_empty() {
            return Ok(DecodedRecords::Rows(Vec::new()));
        }

        let reader = Reader::new(data).map_err(|e| DecoderError::InvalidInput {
            record_type: RecordType::Avro.to_string(),
            source: e.into(),
        })?;

        let mut rows = Vec::new();
        for (i, datum) in reader.enumerate() {
            let index = i + 1;
            let decode_error = |source: Box<dyn std::error::Error + Send + Sync>| {
                DecoderError::RecordDecode {
                    record_type: RecordType::Avro.to_string(),
                    line: index,
                    source,
                }
            };
            let value = datum
                .map_err(|e| decode_error(e.into()))
                .and_then(|v| from_avro(v).map_err(|e| decode_error(e.into())))?;
            rows.push(ensure_record(RecordType::Avro, index, value)?);
        }

        tracing::debug!(rows = rows.len(), "decoded avro container file");
        Ok(DecodedRecords::Rows(rows))
    }
}

fn from_avro(value: AvroValue) -> Result<Value, ValueTypeError> {
    Ok(match value {
        AvroValue::Null => Value::Null,
        AvroValue::Boolean(v) => Value::Bool(v),
        AvroValue::Int(v) => Value::I32(v),
        AvroValue::Long(v) => Value::I64(v),
        AvroValue::Float(v) => Value::F32(v),
        AvroValue::Double(v) => Value::F64(v),
        AvroValue::String(v) => Value::string(v),
        AvroValue::Enum(_, symbol) => Value::string(symbol),
        AvroValue::Bytes(v) | AvroValue::Fixed(_, v) => Value::bytes(v),
        AvroValue::Union(_, inner) => from_avro(*inner)?,
        AvroValue::Array(items) => Value::List(
            items
                .into_iter()
                .map(from_avro)
                .collect::<Result<_, _>>()?,
        ),
        AvroValue::Map(entries) => {
            let mut fields: StructValue = entries
                .into_iter()
                .map(|(k, v)| Ok((k, from_avro(v)?)))
                .collect::<Result<_, ValueTypeError>>()?;
            fields.sort_keys();
            Value::Struct(fields)
        }
        AvroValue::Record(fields) => Value::Struct(
            fields
                .into_iter()
                .map(|(k, v)| Ok((k, from_avro(v)?)))
                .collect::<Result<_, ValueTypeError>>()?,
        ),
        AvroValue::Date(days) => NaiveDate::from_num_days_from_ce_opt(
            days.saturating_add(UNIX_EPOCH_DAYS_FROM_CE),
        )
        .map(Value::Date)
        .ok_or_else(|| out_of_range("date", days))?,
        AvroValue::TimeMillis(v) => Value::Duration(TimeDelta::milliseconds(i64::from(v))),
        AvroValue::TimeMicros(v) => Value::Duration(TimeDelta::microseconds(v)),
        AvroValue::TimestampMillis(v) | AvroValue::LocalTimestampMillis(v) => {
            DateTime::from_timestamp_millis(v)
                .map(Value::DateTime)
                .ok_or_else(|| out_of_range("timestamp-millis", v))?
        }
        AvroValue::TimestampMicros(v) | AvroValue::LocalTimestampMicros(v) => {
            DateTime::from_timestamp_micros(v)
                .map(Value::DateTime)
                .ok_or_else(|| out_of_range("timestamp-micros", v))?
        }
        AvroValue::TimestampNanos(v) | AvroValue::LocalTimestampNanos(v) => {
            Value::DateTime(DateTime::from_timestamp_nanos(v))
        }
        AvroValue::Uuid(v) => Value::string(v.to_string()),
        other => {
            return Err(ValueTypeError::new(
                "a value with a column representation",
                format!("{other:?}"),
            ));
        }
    })
}

fn out_of_range(kind: &str, raw: impl std::fmt::Display) -> ValueTypeError {
    ValueTypeError::new(format!("{kind} in range"), raw.to_string())
}
