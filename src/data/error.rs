use std::path::PathBuf;

use thiserror::Error;

/// Why a facility file could not be turned into records.
///
/// Every variant is fatal for the load in progress: the dashboard keeps
/// whatever it was showing before and reports the message.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("reading arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("required column '{0}' is missing")]
    MissingColumn(String),

    #[error("row {row}: '{value}' in column {column} is not a coordinate")]
    InvalidCoordinate {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("expected a top-level JSON array of records")]
    NotAnArray,

    #[error("JSON row {0} is not an object")]
    NotARecord(usize),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}
