//! Per-year indicator tables backed by polars DataFrames.

use crate::entity::EntitySet;
use crate::error::{DataError, Result};
use crate::indicator::IndicatorKind;
use crate::value::{normalize_number, normalize_text};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

/// Mapping from entity name to a numeric value.
pub type EntityValues = BTreeMap<String, f64>;

/// Read a CSV file with a header row, inferring column types from all rows.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Extract `key column → normalized value` pairs from two columns of a frame.
///
/// String columns go through text normalization, every other dtype is cast
/// to `Float64`. Rows with a null key or a missing value are skipped. When a
/// key repeats, the first occurrence wins.
pub(crate) fn column_values(
    df: &DataFrame,
    key_column: &str,
    value_column: &str,
) -> Result<EntityValues> {
    let keys = df.column(key_column)?.cast(&DataType::String)?;
    let keys = keys.str()?;
    let column = df.column(value_column)?;

    let mut values = EntityValues::new();

    if column.dtype() == &DataType::String {
        let cells = column.str()?;
        for i in 0..df.height() {
            let (Some(key), Some(cell)) = (keys.get(i), cells.get(i)) else {
                continue;
            };
            if let Some(value) = normalize_text(cell) {
                values.entry(key.trim().to_string()).or_insert(value);
            }
        }
    } else {
        let cells = column.cast(&DataType::Float64)?;
        let cells = cells.f64()?;
        for i in 0..df.height() {
            let (Some(key), Some(cell)) = (keys.get(i), cells.get(i)) else {
                continue;
            };
            if let Some(value) = normalize_number(cell) {
                values.entry(key.trim().to_string()).or_insert(value);
            }
        }
    }

    Ok(values)
}

/// One year of indicator data for one entity set.
#[derive(Debug, Clone)]
pub struct IndicatorTable {
    entity_set: EntitySet,
    frame: DataFrame,
}

impl IndicatorTable {
    /// Wrap a DataFrame, checking that the entity key column is present.
    pub fn from_frame(frame: DataFrame, entity_set: EntitySet) -> Result<Self> {
        let key = entity_set.key_column();
        if frame.column(key).is_err() {
            return Err(DataError::MissingColumn {
                column: key.to_string(),
                path: "<frame>".into(),
            });
        }
        Ok(Self { entity_set, frame })
    }

    /// Read a table from a CSV file.
    pub fn from_csv<P: AsRef<Path>>(path: P, entity_set: EntitySet) -> Result<Self> {
        let path = path.as_ref();
        let frame = read_csv(path)?;
        Self::from_frame(frame, entity_set).map_err(|err| match err {
            DataError::MissingColumn { column, .. } => DataError::MissingColumn {
                column,
                path: path.to_path_buf(),
            },
            other => other,
        })
    }

    /// Entity set of this table.
    pub const fn entity_set(&self) -> EntitySet {
        self.entity_set
    }

    /// Underlying DataFrame.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Headers of the indicator columns, in file order.
    ///
    /// Both entity key columns are excluded regardless of the table's own
    /// entity set.
    pub fn indicator_columns(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .filter(|name| {
                !EntitySet::all()
                    .iter()
                    .any(|set| set.key_column() == name.as_str())
            })
            .collect()
    }

    /// Header of the column holding `kind`, if present.
    pub fn column_for(&self, kind: &IndicatorKind) -> Option<String> {
        let columns = self.indicator_columns();
        if let Some(exact) = columns.iter().find(|c| c.as_str() == kind.column_name()) {
            return Some(exact.clone());
        }
        columns
            .into_iter()
            .find(|c| &IndicatorKind::from_column(c) == kind)
    }

    /// Normalized values of one indicator, or an empty map when the column
    /// is absent or cannot be read.
    pub fn values(&self, kind: &IndicatorKind) -> EntityValues {
        let Some(column) = self.column_for(kind) else {
            return EntityValues::new();
        };

        match column_values(&self.frame, self.entity_set.key_column(), &column) {
            Ok(values) => values,
            Err(err) => {
                tracing::debug!(%kind, %column, error = %err, "unreadable indicator column");
                EntityValues::new()
            }
        }
    }
}
