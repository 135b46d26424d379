//! Record-to-Parquet conversion pipeline.

use std::{fs, io::Write, ops::Range, path::Path, sync::Arc};

use columnify_core::IntermediateSchema;
use columnify_parquet::{
    PhysicalSchema, StripeError, Table, TableWriter, field_defs_to_arrow_schema,
    stripe_columnar_batch, stripe_rows,
};
use columnify_record::{DecodedRecords, RecordDecoder, decoder_for};
use rayon::prelude::*;

use crate::{config::Config, error::ColumnifyError, schema::read_schema_file};

/// Converts decoded records into a Parquet file written to `W`.
///
/// Input is striped in ranges of `stripe_chunk_rows` rows on the rayon pool;
/// striped ranges are concatenated in input order and buffered until
/// `row_group_size` rows are available, then written as one row group.
pub struct Columnifier<W: Write + Send> {
    physical: PhysicalSchema,
    decoder: Box<dyn RecordDecoder>,
    writer: TableWriter<W>,
    pending: Table,
    pending_rows: usize,
    row_group_size: usize,
    stripe_chunk_rows: usize,
}

impl<W: Write + Send> Columnifier<W> {
    pub fn try_new(
        schema: &IntermediateSchema,
        config: &Config,
        sink: W,
    ) -> Result<Self, ColumnifyError> {
        config.validate()?;

        let physical = PhysicalSchema::compile(schema)?;
        let arrow_schema = Arc::new(field_defs_to_arrow_schema(&schema.fields));
        let decoder = decoder_for(config.record_type, arrow_schema)?;
        let writer = TableWriter::try_new(sink, &physical, config.parquet.writer_properties())?;

        tracing::debug!(
            record_type = %config.record_type,
            columns = physical.num_leaves(),
            row_group_size = config.parquet.row_group_size,
            compression = %config.parquet.compression,
            "columnifier ready"
        );

        Ok(Self {
            pending: Table::new(&physical),
            physical,
            decoder,
            writer,
            pending_rows: 0,
            row_group_size: config.parquet.row_group_size,
            stripe_chunk_rows: config.stripe_chunk_rows,
        })
    }

    /// Read the schema from `schema_path` and build a columnifier for it.
    pub fn from_schema_file(
        schema_path: impl AsRef<Path>,
        config: &Config,
        sink: W,
    ) -> Result<Self, ColumnifyError> {
        let schema = read_schema_file(config.schema_type, schema_path)?;
        Self::try_new(&schema, config, sink)
    }

    pub fn physical_schema(&self) -> &PhysicalSchema {
        &self.physical
    }

    /// Decode and convert every record in `data`. Returns the number of
    /// records consumed.
    ///
    /// All records are striped before any of them is buffered or written, so
    /// a failing record leaves the output unchanged.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, ColumnifyError> {
        let records = self.decoder.decode(data)?;
        let total = records.num_rows();

        let striped = self
            .row_group_segments(total)
            .into_iter()
            .map(|segment| Ok((segment.len(), self.stripe_parallel(&records, segment)?)))
            .collect::<Result<Vec<_>, ColumnifyError>>()?;

        for (rows, table) in striped {
            self.pending.append(table);
            self.pending_rows += rows;
            if self.pending_rows >= self.row_group_size {
                self.flush()?;
            }
        }
        Ok(total)
    }

    /// Convert the records of every file in order. Returns the number of
    /// records consumed.
    pub fn write_from_files<P: AsRef<Path>>(
        &mut self,
        paths: impl IntoIterator<Item = P>,
    ) -> Result<usize, ColumnifyError> {
        let mut total = 0;
        for path in paths {
            let path = path.as_ref();
            let data = fs::read(path).map_err(|source| ColumnifyError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
            let rows = self.write(&data)?;
            tracing::info!(path = %path.display(), rows, "converted input file");
            total += rows;
        }
        Ok(total)
    }

    /// Write buffered rows and the file footer, and return the sink.
    pub fn close(mut self) -> Result<W, ColumnifyError> {
        self.flush()?;
        tracing::info!(rows = self.writer.rows_written(), "finished parquet file");
        Ok(self.writer.into_inner()?)
    }

    fn flush(&mut self) -> Result<(), ColumnifyError> {
        if self.pending_rows == 0 {
            return Ok(());
        }
        let table = std::mem::replace(&mut self.pending, Table::new(&self.physical));
        self.pending_rows = 0;
        self.writer.write_table(&table)?;
        Ok(())
    }

    /// Split `0..total` so that every segment ends where a row group fills
    /// up, counting the rows already pending.
    fn row_group_segments(&self, total: usize) -> Vec<Range<usize>> {
        let mut segments = Vec::new();
        let mut buffered = self.pending_rows;
        let mut start = 0;
        while start < total {
            let end = total.min(start + self.row_group_size - buffered);
            segments.push(start..end);
            buffered = (buffered + end - start) % self.row_group_size;
            start = end;
        }
        segments
    }

    fn stripe_parallel(
        &self,
        records: &DecodedRecords,
        range: Range<usize>,
    ) -> Result<Table, StripeError> {
        let chunks: Vec<Range<usize>> = range
            .clone()
            .step_by(self.stripe_chunk_rows)
            .map(|begin| begin..range.end.min(begin + self.stripe_chunk_rows))
            .collect();
        tracing::debug!(rows = range.len(), chunks = chunks.len(), "striping");

        let physical = &self.physical;
        let tables = chunks
            .into_par_iter()
            .map(|chunk| match records {
                DecodedRecords::Rows(rows) => stripe_rows(rows, physical, chunk),
                DecodedRecords::Columnar(batch) => stripe_columnar_batch(batch, physical, chunk),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Table::concat(tables))
    }
}
