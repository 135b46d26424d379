//! Error type for the conversion pipeline.

use std::path::PathBuf;

use columnify_core::{DecoderError, SchemaError};
use columnify_parquet::{StripeError, WriteError};

/// Errors produced by [`Columnifier`](crate::Columnifier).
///
/// Any error aborts the conversion; the output is not a valid Parquet file
/// unless [`Columnifier::close`](crate::Columnifier::close) succeeded.
#[derive(Debug, thiserror::Error)]
pub enum ColumnifyError {
    /// I/O error on the output sink or stdin.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An input or schema file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Decode(#[from] DecoderError),

    #[error(transparent)]
    Stripe(#[from] StripeError),

    #[error(transparent)]
    Write(#[from] WriteError),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
