use thiserror::Error;

/// Errors surfaced while resolving, reading or converting a dataset.
///
/// Errors raised by the file system, the CSV reader or the Arrow / Parquet
/// layer are passed through untouched; only column-count problems and bad
/// catalog entries originate in this crate.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Label count does not match the number of columns in the data.
    #[error("length mismatch: expected axis has {found} elements, new values have {expected} elements")]
    ShapeMismatch { expected: usize, found: usize },

    /// A column does not have as many values as the rest of the table.
    #[error("column '{column}' has {found} values, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

pub type Result<T> = std::result::Result<T, LoadError>;
