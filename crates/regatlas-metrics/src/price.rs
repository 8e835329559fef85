//! Price Adjustment
//!
//! Restates monetary values in the prices of another year by chaining the
//! per-entity year-over-year CPI factors.
//!
//! For `from < to` the factor is `cpi[from] * cpi[from + 1] * ... * cpi[to - 1]`,
//! for `from > to` it is the inverse of the chain over `to..from`.

use crate::error::InflationError;
use regatlas_data::{CpiTables, EntitySet, EntityValues};

/// Year whose prices are used when no other base is chosen.
pub const BASE_YEAR: i32 = 2023;

/// First year offered as a price base when no CPI table is loaded.
const FALLBACK_FIRST_YEAR: i32 = 2000;

/// Chains CPI factors over borrowed CPI tables.
#[derive(Debug, Clone, Copy)]
pub struct PriceAdjuster<'a> {
    cpi: &'a CpiTables,
}

impl<'a> PriceAdjuster<'a> {
    /// Create an adjuster over loaded CPI tables.
    pub const fn new(cpi: &'a CpiTables) -> Self {
        Self { cpi }
    }

    /// Cumulative price factor between two years for one entity.
    ///
    /// Any missing factor inside the range fails the whole chain; a partial
    /// product is never returned.
    pub fn try_cumulative_inflation(
        &self,
        entity: &str,
        from_year: i32,
        to_year: i32,
        set: EntitySet,
    ) -> Result<f64, InflationError> {
        let table = self.cpi.for_set(set).ok_or(InflationError::NoTable(set))?;

        if !table.has_entity(entity) {
            return Err(InflationError::UnknownEntity(entity.to_string()));
        }
        for year in [from_year, to_year] {
            if !table.has_year(year) {
                return Err(InflationError::MissingYear(year));
            }
        }

        if from_year == to_year {
            return Ok(1.0);
        }

        let (start, end) = if from_year < to_year {
            (from_year, to_year)
        } else {
            (to_year, from_year)
        };

        let mut product = 1.0;
        for year in start..end {
            let factor = table
                .factor(entity, year)
                .ok_or_else(|| InflationError::MissingFactor {
                    entity: entity.to_string(),
                    year,
                })?;
            product *= factor;
        }

        if !product.is_finite() || product == 0.0 {
            return Err(InflationError::NonFinite);
        }

        if from_year < to_year {
            Ok(product)
        } else {
            Ok(1.0 / product)
        }
    }

    /// Cumulative price factor, falling back to 1.0 when it cannot be
    /// computed.
    pub fn cumulative_inflation(
        &self,
        entity: &str,
        from_year: i32,
        to_year: i32,
        set: EntitySet,
    ) -> f64 {
        self.try_cumulative_inflation(entity, from_year, to_year, set)
            .unwrap_or_else(|err| {
                tracing::debug!(entity, from_year, to_year, error = %err, "using neutral price factor");
                1.0
            })
    }

    /// Restate a value observed in `data_year` in prices of `target_year`.
    ///
    /// Missing values stay missing and zero stays zero.
    pub fn adjust_value(
        &self,
        value: Option<f64>,
        entity: &str,
        data_year: i32,
        target_year: i32,
        set: EntitySet,
    ) -> Option<f64> {
        match value {
            None => None,
            Some(v) if v == 0.0 => Some(v),
            Some(v) => Some(v * self.cumulative_inflation(entity, data_year, target_year, set)),
        }
    }

    /// Restate every value of a mapping, each by its own entity's factor.
    pub fn adjust_values(
        &self,
        values: &EntityValues,
        data_year: i32,
        target_year: i32,
        set: EntitySet,
    ) -> EntityValues {
        values
            .iter()
            .filter_map(|(entity, &value)| {
                self.adjust_value(Some(value), entity, data_year, target_year, set)
                    .map(|adjusted| (entity.clone(), adjusted))
            })
            .collect()
    }

    /// Years selectable as a price base: the CPI columns of the entity set,
    /// or `2000..=2023` when no table is loaded.
    pub fn available_base_years(&self, set: EntitySet) -> Vec<i32> {
        match self.cpi.for_set(set) {
            Some(table) => table.years(),
            None => (FALLBACK_FIRST_YEAR..=BASE_YEAR).collect(),
        }
    }
}
