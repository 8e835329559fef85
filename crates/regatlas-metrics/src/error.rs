//! Error types for derived metrics.

use regatlas_data::EntitySet;
use thiserror::Error;

/// Result type alias for metric operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors raised for invalid metric requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// Comparison mode other than `absolute` or `relative`.
    #[error("Invalid comparison mode: {0}")]
    InvalidMode(String),

    /// Display mode other than `absolute` or `relative`.
    #[error("Invalid display mode: {0}")]
    InvalidDisplayMode(String),
}

/// Reasons a cumulative inflation factor cannot be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InflationError {
    /// No CPI table is loaded for the entity set.
    #[error("No CPI table loaded for {0}")]
    NoTable(EntitySet),

    /// The entity has no CPI row.
    #[error("No CPI data for entity: {0}")]
    UnknownEntity(String),

    /// The year is not a column of the CPI table.
    #[error("Year {0} is not covered by the CPI table")]
    MissingYear(i32),

    /// A factor inside the chained range is missing.
    #[error("Missing CPI factor for {entity} in {year}")]
    MissingFactor {
        /// Entity name
        entity: String,
        /// Year without a factor
        year: i32,
    },

    /// The chained product is zero or not finite.
    #[error("Cumulative inflation factor is not finite")]
    NonFinite,
}
