//! Indicator store: all loaded indicator tables.

use crate::catalog::IndicatorMetadata;
use crate::config::{DataConfig, default_year_of};
use crate::entity::EntitySet;
use crate::indicator::IndicatorKind;
use crate::table::{EntityValues, IndicatorTable};
use std::collections::BTreeMap;

/// Read-only collection of indicator tables keyed by (year, entity set).
///
/// Built once at startup; queries never mutate it.
#[derive(Debug, Clone, Default)]
pub struct IndicatorStore {
    years: Vec<i32>,
    regions: BTreeMap<i32, IndicatorTable>,
    districts: BTreeMap<i32, IndicatorTable>,
}

impl IndicatorStore {
    /// Create an empty store for the given years.
    pub fn new(mut years: Vec<i32>) -> Self {
        years.sort_unstable();
        years.dedup();
        Self {
            years,
            regions: BTreeMap::new(),
            districts: BTreeMap::new(),
        }
    }

    /// Load every configured (year, entity set) table from the data directory.
    ///
    /// A missing file leaves the slice absent. A malformed file is logged and
    /// skipped the same way, so loading never fails.
    pub fn load(config: &DataConfig) -> Self {
        let mut store = Self::new(config.years.clone());

        for &year in &config.years {
            for set in EntitySet::all() {
                let path = config.indicator_path(year, set);
                if !path.exists() {
                    tracing::debug!(year, %set, path = %path.display(), "indicator table not found");
                    continue;
                }

                match IndicatorTable::from_csv(&path, set) {
                    Ok(table) => {
                        store.tables_mut(set).insert(year, table);
                    }
                    Err(err) => {
                        tracing::warn!(
                            year,
                            %set,
                            path = %path.display(),
                            error = %err,
                            "failed to load indicator table"
                        );
                    }
                }
            }
        }

        tracing::info!(
            regions = store.regions.len(),
            districts = store.districts.len(),
            "indicator tables loaded"
        );

        store
    }

    /// Add a table, returning the store. Years outside the configured list
    /// are added to it.
    pub fn with_table(mut self, year: i32, table: IndicatorTable) -> Self {
        if !self.years.contains(&year) {
            self.years.push(year);
            self.years.sort_unstable();
        }
        let set = table.entity_set();
        self.tables_mut(set).insert(year, table);
        self
    }

    fn tables(&self, set: EntitySet) -> &BTreeMap<i32, IndicatorTable> {
        match set {
            EntitySet::Regions => &self.regions,
            EntitySet::Districts => &self.districts,
        }
    }

    fn tables_mut(&mut self, set: EntitySet) -> &mut BTreeMap<i32, IndicatorTable> {
        match set {
            EntitySet::Regions => &mut self.regions,
            EntitySet::Districts => &mut self.districts,
        }
    }

    /// Configured years, ascending.
    pub fn available_years(&self) -> &[i32] {
        &self.years
    }

    /// Years that actually have a table for the entity set.
    pub fn loaded_years(&self, set: EntitySet) -> Vec<i32> {
        self.tables(set).keys().copied().collect()
    }

    /// The year shown by default.
    pub fn default_year(&self) -> i32 {
        default_year_of(&self.years)
    }

    /// Table for a year and entity set.
    pub fn table(&self, year: i32, set: EntitySet) -> Option<&IndicatorTable> {
        self.tables(set).get(&year)
    }

    /// Indicator metadata discovered from the most recent non-empty regions
    /// table, scanning configured years newest first.
    pub fn available_indicators(&self) -> Vec<IndicatorMetadata> {
        self.years
            .iter()
            .rev()
            .filter_map(|year| self.regions.get(year))
            .find(|table| !table.is_empty())
            .map(|table| {
                table
                    .indicator_columns()
                    .iter()
                    .map(|column| IndicatorMetadata::from_column(column))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Values of one indicator for a year and entity set.
    ///
    /// Returns an empty map for an unconfigured year, an absent or empty
    /// table, or an absent column.
    pub fn get_indicator_data(
        &self,
        kind: &IndicatorKind,
        year: i32,
        set: EntitySet,
    ) -> EntityValues {
        if !self.years.contains(&year) {
            return EntityValues::new();
        }

        match self.table(year, set) {
            Some(table) if !table.is_empty() => table.values(kind),
            _ => EntityValues::new(),
        }
    }
}
