//! Export of value tables, legends and map reports.
//!
//! Everything exportable implements [`Exporter`] and can be written as CSV,
//! compact JSON or pretty-printed JSON.

use crate::legend::{Legend, LegendItem};
use chrono::{DateTime, Utc};
use regatlas_data::EntityValues;
use regatlas_metrics::DeltaValues;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output was not valid UTF-8.
    #[error("Invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Unknown format name.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    #[default]
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty" | "pretty-json" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// One entity and its value; `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRecord {
    /// Entity name.
    pub entity: String,
    /// Value.
    pub value: Option<f64>,
}

/// Values of one map layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    /// Property the values belong to (data type id or `delta`).
    pub property: String,
    /// Displayed year.
    pub year: i32,
    /// Rows, in entity name order.
    pub records: Vec<ValueRecord>,
}

impl ValueTable {
    /// Table of plain values.
    pub fn from_values(property: impl Into<String>, year: i32, values: &EntityValues) -> Self {
        Self {
            property: property.into(),
            year,
            records: values
                .iter()
                .map(|(entity, &value)| ValueRecord {
                    entity: entity.clone(),
                    value: Some(value),
                })
                .collect(),
        }
    }

    /// Table of deltas.
    pub fn from_deltas(year: i32, deltas: &DeltaValues) -> Self {
        Self {
            property: "delta".to_string(),
            year,
            records: deltas
                .iter()
                .map(|(entity, &value)| ValueRecord {
                    entity: entity.clone(),
                    value,
                })
                .collect(),
        }
    }
}

/// A legend together with the values it classifies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapReport {
    /// Report generation timestamp.
    pub generated_at: DateTime<Utc>,

    /// Legend of the layer.
    pub legend: Legend,

    /// Values of the layer.
    pub values: ValueTable,
}

impl MapReport {
    /// Create a report stamped with the current time.
    pub fn new(legend: Legend, values: ValueTable) -> Self {
        Self {
            generated_at: Utc::now(),
            legend,
            values,
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn csv_rows<T: Serialize>(rows: &[T]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in rows {
        wtr.serialize(row)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

fn json<T: Serialize>(value: &T, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(value)?),
        _ => Ok(serde_json::to_string(value)?),
    }
}

impl Exporter for ValueTable {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => csv_rows(&self.records),
            _ => json(self, format),
        }
    }
}

impl Exporter for Legend {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => csv_rows::<LegendItem>(&self.items()),
            _ => json(self, format),
        }
    }
}

impl Exporter for MapReport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut output = String::new();

                output.push_str(&format!("# Title: {}\n", self.legend.title));
                output.push_str(&format!("# Property: {}\n", self.values.property));
                output.push_str(&format!("# Year: {}\n", self.values.year));
                output.push_str(&format!("# Generated: {}\n", self.generated_at.to_rfc3339()));

                output.push_str(&csv_rows(&self.values.records)?);
                Ok(output)
            }
            _ => json(self, format),
        }
    }
}
