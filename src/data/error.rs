use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a data file into a [`Table`](super::model::Table).
///
/// Every variant is fatal at startup: without a table there is nothing to show.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("reading parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("decoding arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing column '{column}'")]
    MissingColumn { column: String },

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedType { column: String, data_type: String },

    #[error("row {row}: column '{column}' value '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: empty year label")]
    EmptyYear { row: usize },
}

/// A selector that is neither `All` nor one of the table's years.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("selector '{selector}' is not 'All' or a year present in the dataset")]
pub struct InvalidSelectorError {
    pub selector: String,
}
