use std::io::Write;

use parquet::{
    column::writer::ColumnWriter,
    data_type::ByteArray,
    file::{
        properties::WriterProperties,
        writer::{SerializedColumnWriter, SerializedFileWriter},
    },
};

use crate::{
    error::WriteError,
    physical::PhysicalSchema,
    table::{Column, LeafValue, Table},
};

/// Writes striped [`Table`]s into a Parquet file, one row group per table.
///
/// Levels are passed to the column writers exactly as striping produced
/// them.
pub struct TableWriter<W: Write + Send> {
    writer: SerializedFileWriter<W>,
    leaf_paths: Vec<String>,
    rows_written: usize,
    row_groups_written: usize,
}

impl<W: Write + Send> TableWriter<W> {
    pub fn try_new(
        sink: W,
        schema: &PhysicalSchema,
        props: WriterProperties,
    ) -> Result<Self, WriteError> {
        let parquet_schema = schema.to_parquet_schema()?;
        let writer = SerializedFileWriter::new(sink, parquet_schema, props.into())?;
        Ok(Self {
            writer,
            leaf_paths: schema.leaves().map(|leaf| leaf.path.clone()).collect(),
            rows_written: 0,
            row_groups_written: 0,
        })
    }

    /// Write `table` as one row group. Empty tables are skipped.
    pub fn write_table(&mut self, table: &Table) -> Result<(), WriteError> {
        let rows = table.num_rows();
        if rows == 0 {
            return Ok(());
        }

        let mut row_group = self.writer.next_row_group()?;
        for path in &self.leaf_paths {
            let column = table
                .column(path)
                .ok_or_else(|| WriteError::MissingColumn { path: path.clone() })?;
            let mut column_writer = row_group
                .next_column()?
                .ok_or_else(|| WriteError::MissingColumnWriter { path: path.clone() })?;
            write_column(&mut column_writer, path, column)?;
            column_writer.close()?;
        }
        row_group.close()?;

        self.rows_written += rows;
        self.row_groups_written += 1;
        tracing::info!(
            rows,
            row_group = self.row_groups_written,
            "wrote parquet row group"
        );
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Write the footer and return the underlying sink.
    pub fn into_inner(self) -> Result<W, WriteError> {
        Ok(self.writer.into_inner()?)
    }

    /// Write the footer.
    pub fn close(self) -> Result<(), WriteError> {
        self.writer.close()?;
        Ok(())
    }
}

fn write_column(
    column_writer: &mut SerializedColumnWriter<'_>,
    path: &str,
    column: &Column,
) -> Result<(), WriteError> {
    let def = Some(column.definition_levels.as_slice());
    let rep = Some(column.repetition_levels.as_slice());

    match column_writer.untyped() {
        ColumnWriter::BoolColumnWriter(w) => {
            let values = typed_values(path, column, "BOOLEAN", |v| match v {
                LeafValue::Boolean(b) => Some(*b),
                _ => None,
            })?;
            w.write_batch(&values, def, rep)?;
        }
        ColumnWriter::Int32ColumnWriter(w) => {
            let values = typed_values(path, column, "INT32", |v| match v {
                LeafValue::Int32(i) => Some(*i),
                _ => None,
            })?;
            w.write_batch(&values, def, rep)?;
        }
        ColumnWriter::Int64ColumnWriter(w) => {
            let values = typed_values(path, column, "INT64", |v| match v {
                LeafValue::Int64(i) => Some(*i),
                _ => None,
            })?;
            w.write_batch(&values, def, rep)?;
        }
        ColumnWriter::FloatColumnWriter(w) => {
            let values = typed_values(path, column, "FLOAT", |v| match v {
                LeafValue::Float(f) => Some(*f),
                _ => None,
            })?;
            w.write_batch(&values, def, rep)?;
        }
        ColumnWriter::DoubleColumnWriter(w) => {
            let values = typed_values(path, column, "DOUBLE", |v| match v {
                LeafValue::Double(f) => Some(*f),
                _ => None,
            })?;
            w.write_batch(&values, def, rep)?;
        }
        ColumnWriter::ByteArrayColumnWriter(w) => {
            let values = typed_values(path, column, "BYTE_ARRAY", |v| match v {
                LeafValue::ByteArray(b) => Some(ByteArray::from(b.clone())),
                _ => None,
            })?;
            w.write_batch(&values, def, rep)?;
        }
        _ => {
            return Err(WriteError::UnsupportedColumnWriter {
                path: path.to_string(),
            });
        }
    }
    Ok(())
}

/// Non-null values of `column`, which sit exactly at the entries whose
/// definition level is the column maximum.
fn typed_values<T>(
    path: &str,
    column: &Column,
    expected: &'static str,
    extract: impl Fn(&LeafValue) -> Option<T>,
) -> Result<Vec<T>, WriteError> {
    column
        .values
        .iter()
        .flatten()
        .map(|v| {
            extract(v).ok_or_else(|| WriteError::ColumnTypeMismatch {
                path: path.to_string(),
                expected,
                found: v.type_name(),
            })
        })
        .collect()
}
