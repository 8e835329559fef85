//! Consumer price index tables.
//!
//! One table per entity set: a key column with entity names and one column
//! per year whose header parses as an integer. Cells hold the year-over-year
//! index in percent (108.5 means prices grew 8.5% from that year to the
//! next) and are stored as fractions.

use crate::config::DataConfig;
use crate::entity::EntitySet;
use crate::error::{DataError, Result};
use crate::table::{column_values, read_csv};
use polars::prelude::DataFrame;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

/// Year-over-year price factors for one entity set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpiTable {
    years: BTreeSet<i32>,
    factors: HashMap<String, BTreeMap<i32, f64>>,
}

impl CpiTable {
    /// Build a table from a DataFrame with percentage cells.
    pub fn from_frame(frame: &DataFrame, set: EntitySet) -> Result<Self> {
        let key = set.key_column();
        if frame.column(key).is_err() {
            return Err(DataError::MissingColumn {
                column: key.to_string(),
                path: "<frame>".into(),
            });
        }

        let mut table = Self::default();

        for name in frame.get_column_names() {
            let Ok(year) = name.trim().parse::<i32>() else {
                continue;
            };
            table.years.insert(year);

            for (entity, percent) in column_values(frame, key, name.as_str())? {
                table
                    .factors
                    .entry(entity)
                    .or_default()
                    .insert(year, percent / 100.0);
            }
        }

        Ok(table)
    }

    /// Read a table from a CSV file.
    pub fn from_csv<P: AsRef<Path>>(path: P, set: EntitySet) -> Result<Self> {
        let path = path.as_ref();
        let frame = read_csv(path)?;
        Self::from_frame(&frame, set).map_err(|err| match err {
            DataError::MissingColumn { column, .. } => DataError::MissingColumn {
                column,
                path: path.to_path_buf(),
            },
            other => other,
        })
    }

    /// Build a table from `(entity, year, percent)` triples.
    pub fn from_percentages<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, i32, f64)>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (entity, year, percent) in rows {
            table.years.insert(year);
            table
                .factors
                .entry(entity.into())
                .or_default()
                .insert(year, percent / 100.0);
        }
        table
    }

    /// Years present as columns.
    pub fn years(&self) -> Vec<i32> {
        self.years.iter().copied().collect()
    }

    /// Whether the year is a column of the table.
    pub fn has_year(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    /// Whether the entity has a row.
    pub fn has_entity(&self, entity: &str) -> bool {
        self.factors.contains_key(entity)
    }

    /// Factor for growth from `year` to `year + 1`.
    pub fn factor(&self, entity: &str, year: i32) -> Option<f64> {
        self.factors.get(entity)?.get(&year).copied()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Returns true if the table has no entities.
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

/// CPI tables of both entity sets; either may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpiTables {
    regions: Option<CpiTable>,
    districts: Option<CpiTable>,
}

impl CpiTables {
    /// Wrap already built tables.
    pub const fn new(regions: Option<CpiTable>, districts: Option<CpiTable>) -> Self {
        Self { regions, districts }
    }

    /// Load both tables from the data directory. A missing or malformed
    /// file leaves that entity set without CPI data.
    pub fn load(config: &DataConfig) -> Self {
        let load_one = |set: EntitySet| {
            let path = config.cpi_path(set);
            if !path.exists() {
                tracing::debug!(%set, path = %path.display(), "CPI table not found");
                return None;
            }
            match CpiTable::from_csv(&path, set) {
                Ok(table) => {
                    tracing::info!(%set, entities = table.len(), "CPI table loaded");
                    Some(table)
                }
                Err(err) => {
                    tracing::warn!(%set, path = %path.display(), error = %err, "failed to load CPI table");
                    None
                }
            }
        };

        Self {
            regions: load_one(EntitySet::Regions),
            districts: load_one(EntitySet::Districts),
        }
    }

    /// Table of an entity set.
    pub const fn for_set(&self, set: EntitySet) -> Option<&CpiTable> {
        match set {
            EntitySet::Regions => self.regions.as_ref(),
            EntitySet::Districts => self.districts.as_ref(),
        }
    }
}
