use std::{fmt, str::FromStr};

use columnify_core::{RecordType, SchemaType};
use parquet::{
    basic::{Compression, GzipLevel, ZstdLevel},
    file::properties::WriterProperties,
};

use crate::error::ColumnifyError;

/// Default number of rows striped per parallel task.
pub const DEFAULT_STRIPE_CHUNK_ROWS: usize = 4096;

/// Conversion settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub schema_type: SchemaType,
    pub record_type: RecordType,
    pub parquet: ParquetConfig,
    /// Rows per striping task. Ranges of this size are striped in parallel
    /// and concatenated in input order.
    pub stripe_chunk_rows: usize,
}

impl Config {
    pub fn new(schema_type: SchemaType, record_type: RecordType) -> Self {
        Self {
            schema_type,
            record_type,
            parquet: ParquetConfig::default(),
            stripe_chunk_rows: DEFAULT_STRIPE_CHUNK_ROWS,
        }
    }

    pub fn with_parquet(mut self, parquet: ParquetConfig) -> Self {
        self.parquet = parquet;
        self
    }

    pub fn with_stripe_chunk_rows(mut self, rows: usize) -> Self {
        self.stripe_chunk_rows = rows;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ColumnifyError> {
        if self.stripe_chunk_rows == 0 {
            return Err(ColumnifyError::InvalidConfig(
                "stripe_chunk_rows must be positive".into(),
            ));
        }
        if self.parquet.row_group_size == 0 {
            return Err(ColumnifyError::InvalidConfig(
                "row_group_size must be positive".into(),
            ));
        }
        if self.parquet.page_size == 0 {
            return Err(ColumnifyError::InvalidConfig(
                "page_size must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Parquet output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParquetConfig {
    /// Data page size limit in bytes.
    pub page_size: usize,
    /// Rows per row group.
    pub row_group_size: usize,
    pub compression: Codec,
}

impl Default for ParquetConfig {
    fn default() -> Self {
        Self {
            page_size: 8 * 1024,
            row_group_size: 128 * 1024,
            compression: Codec::Snappy,
        }
    }
}

impl ParquetConfig {
    pub fn writer_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_data_page_size_limit(self.page_size)
            .set_max_row_group_size(self.row_group_size)
            .set_compression(self.compression.into())
            .build()
    }
}

/// Column chunk compression codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Codec {
    Uncompressed,
    #[default]
    Snappy,
    Gzip,
    Lz4,
    Zstd,
}

impl Codec {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uncompressed => "UNCOMPRESSED",
            Self::Snappy => "SNAPPY",
            Self::Gzip => "GZIP",
            Self::Lz4 => "LZ4",
            Self::Zstd => "ZSTD",
        }
    }
}

impl FromStr for Codec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UNCOMPRESSED" => Ok(Self::Uncompressed),
            "SNAPPY" => Ok(Self::Snappy),
            "GZIP" => Ok(Self::Gzip),
            "LZ4" => Ok(Self::Lz4),
            "ZSTD" => Ok(Self::Zstd),
            other => Err(format!("unsupported compression codec: {other}")),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Codec> for Compression {
    fn from(codec: Codec) -> Self {
        match codec {
            Codec::Uncompressed => Compression::UNCOMPRESSED,
            Codec::Snappy => Compression::SNAPPY,
            Codec::Gzip => Compression::GZIP(GzipLevel::default()),
            Codec::Lz4 => Compression::LZ4_RAW,
            Codec::Zstd => Compression::ZSTD(ZstdLevel::default()),
        }
    }
}
