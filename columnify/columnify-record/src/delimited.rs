use std::io::Cursor;

use arrow::{
    compute::concat_batches, csv::ReaderBuilder, datatypes::SchemaRef, error::ArrowError,
    record_batch::RecordBatch,
};
use columnify_core::{DecoderError, RecordType};

use crate::decoder::{DecodedRecords, RecordDecoder};

const BATCH_SIZE: usize = 8192;

/// Header-less CSV or TSV. Columns are matched to the top-level schema
/// fields by position and parsed into their Arrow types.
#[derive(Debug, Clone)]
pub struct DelimitedDecoder {
    schema: SchemaRef,
    delimiter: u8,
    record_type: RecordType,
}

impl DelimitedDecoder {
    pub fn csv(schema: SchemaRef) -> Self {
        Self {
            schema,
            delimiter: b',',
            record_type: RecordType::Csv,
        }
    }

    pub fn tsv(schema: SchemaRef) -> Self {
        Self {
            schema,
            delimiter: b'\t',
            record_type: RecordType::Tsv,
        }
    }

    fn read_batch(&self, data: &[u8]) -> Result<RecordBatch, ArrowError> {
        let reader = ReaderBuilder::new(self.schema.clone())
            .with_header(false)
            .with_delimiter(self.delimiter)
            .with_batch_size(BATCH_SIZE)
            .build(Cursor::new(data))?;
        let batches = reader.collect::<Result<Vec<_>, _>>()?;
        concat_batches(&self.schema, &batches)
    }
}

impl RecordDecoder for DelimitedDecoder {
    fn record_type(&self) -> RecordType {
        self.record_type
    }

    fn decode(&self, data: &[u8]) -> Result<DecodedRecords, DecoderError> {
        let batch = self
            .read_batch(data)
            .map_err(|e| DecoderError::InvalidInput {
                record_type: self.record_type.to_string(),
                source: e.into(),
            })?;
        Ok(DecodedRecords::Columnar(batch))
    }
}
