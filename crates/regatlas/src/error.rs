//! Error types for the facade.

use regatlas_data::DataError;
use regatlas_legend::ExportError;
use regatlas_metrics::MetricsError;
use thiserror::Error;

/// Result type alias for atlas operations.
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Errors that can occur in atlas operations.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// Data loading or parsing error
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Invalid metric request
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),

    /// Export error
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// GeoJSON input without a feature list
    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),
}
