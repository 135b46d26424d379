use std::{
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Args;
use columnify::{Codec, Columnifier, Config, ParquetConfig, RecordType, SchemaType};
use indicatif::{ProgressBar, ProgressStyle};

use super::{parse_record_type, parse_schema_type};

#[derive(Args)]
pub struct ConvertArgs {
    /// Input record files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Schema type: avro | bigquery
    #[arg(long, value_parser = parse_schema_type)]
    schema_type: SchemaType,

    /// Path to the schema file
    #[arg(long)]
    schema_file: PathBuf,

    /// Record type: avro | csv | jsonl | ltsv | msgpack | tsv
    #[arg(long, value_parser = parse_record_type, default_value = "jsonl")]
    record_type: RecordType,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Parquet data page size in bytes
    #[arg(long, default_value_t = 8 * 1024)]
    parquet_page_size: usize,

    /// Rows per Parquet row group
    #[arg(long, default_value_t = 128 * 1024)]
    parquet_row_group_size: usize,

    /// Compression codec: UNCOMPRESSED | SNAPPY | GZIP | LZ4 | ZSTD
    #[arg(long, value_parser = parse_codec, default_value = "SNAPPY")]
    parquet_compression_codec: Codec,

    /// Rows striped per parallel task
    #[arg(long, default_value_t = columnify::DEFAULT_STRIPE_CHUNK_ROWS)]
    stripe_chunk_rows: usize,
}

impl ConvertArgs {
    pub fn run(self) -> Result<()> {
        let config = Config::new(self.schema_type, self.record_type)
            .with_parquet(ParquetConfig {
                page_size: self.parquet_page_size,
                row_group_size: self.parquet_row_group_size,
                compression: self.parquet_compression_codec,
            })
            .with_stripe_chunk_rows(self.stripe_chunk_rows);

        let sink: Box<dyn Write + Send> = match &self.output {
            Some(path) => Box::new(BufWriter::new(
                fs::File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?,
            )),
            None => Box::new(BufWriter::new(io::stdout())),
        };
        let mut columnifier = Columnifier::from_schema_file(&self.schema_file, &config, sink)?;

        let pb = ProgressBar::new(self.inputs.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}",
            )?
            .progress_chars("=>-"),
        );

        let mut rows = 0;
        for input in &self.inputs {
            rows += columnifier
                .write_from_files([input])
                .with_context(|| format!("failed to convert {}", input.display()))?;
            pb.set_message(format!("{rows} rows"));
            pb.inc(1);
        }

        let mut sink = columnifier.close()?;
        sink.flush()?;
        pb.finish_with_message(format!("{rows} rows"));
        tracing::info!(rows, files = self.inputs.len(), "conversion finished");
        Ok(())
    }
}

fn parse_codec(raw: &str) -> Result<Codec, String> {
    raw.parse()
}
