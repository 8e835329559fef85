//! Layer Values
//!
//! The numbers a map layer shows for one indicator. Values and deltas are
//! always taken on the same basis: shares of total volume when shares are
//! displayed, otherwise raw values restated in the adjustment year's prices
//! for monetary kinds.

use crate::delta::{DeltaMode, DeltaValues, DisplayMode, delta_between, uses_share_delta};
use crate::price::PriceAdjuster;
use crate::share::relative_share;
use regatlas_data::{CpiTables, EntitySet, EntityValues, IndicatorKind, IndicatorStore};

/// Whether the values displayed for `kind` are shares of total volume.
pub fn shows_shares(kind: &IndicatorKind, display: DisplayMode) -> bool {
    display == DisplayMode::Relative && *kind != IndicatorKind::TotalVolume
}

/// Display settings of a layer over borrowed tables.
#[derive(Debug, Clone, Copy)]
pub struct LayerView<'a> {
    store: &'a IndicatorStore,
    adjuster: PriceAdjuster<'a>,
    set: EntitySet,
    display: DisplayMode,
    adjustment_year: Option<i32>,
}

impl<'a> LayerView<'a> {
    /// Raw values of one entity set, unadjusted.
    pub const fn new(store: &'a IndicatorStore, cpi: &'a CpiTables, set: EntitySet) -> Self {
        Self {
            store,
            adjuster: PriceAdjuster::new(cpi),
            set,
            display: DisplayMode::Absolute,
            adjustment_year: None,
        }
    }

    /// Set the display mode.
    pub const fn display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    /// Restate monetary values in another year's prices.
    pub const fn adjust_to(mut self, year: Option<i32>) -> Self {
        self.adjustment_year = year;
        self
    }

    /// Values of `kind` in `year` as displayed.
    pub fn values(&self, kind: &IndicatorKind, year: i32) -> EntityValues {
        if shows_shares(kind, self.display) {
            return relative_share(self.store, kind, year, self.set);
        }

        let values = self.store.get_indicator_data(kind, year, self.set);
        match self.adjustment_year {
            Some(target) if kind.is_monetary() => {
                self.adjuster.adjust_values(&values, year, target, self.set)
            }
            _ => values,
        }
    }

    /// Deltas of the displayed values between `current_year` and
    /// `compare_year`.
    ///
    /// Share deltas are in percentage points whatever `mode` says.
    pub fn deltas(
        &self,
        kind: &IndicatorKind,
        current_year: i32,
        compare_year: i32,
        mode: DeltaMode,
    ) -> DeltaValues {
        let mode = if uses_share_delta(kind, self.display) {
            DeltaMode::Absolute
        } else {
            mode
        };
        delta_between(
            &self.values(kind, current_year),
            &self.values(kind, compare_year),
            mode,
        )
    }
}
