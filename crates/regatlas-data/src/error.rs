//! Error types for data operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while reading indicator and CPI tables.
///
/// Loading code never surfaces these for absent data: the store logs them
/// and leaves the affected slice unavailable. They reach callers only from
/// the explicit `from_csv` / `from_frame` constructors and from parsing of
/// programmer-supplied names.
#[derive(Debug, Error)]
pub enum DataError {
    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// A table lacks its entity key column
    #[error("Missing column '{column}' in {}", path.display())]
    MissingColumn {
        /// Expected column name
        column: String,
        /// Source the table was read from
        path: PathBuf,
    },

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Unknown entity set name
    #[error("Unknown entity set: {0} (expected 'regions' or 'districts')")]
    UnknownEntitySet(String),

    /// Unknown data type name
    #[error("Unknown data type: {0}")]
    UnknownDataType(String),
}
