//! Per-entity yearly series for analytics panels.

use crate::price::PriceAdjuster;
use crate::share::relative_share;
use regatlas_data::{EntitySet, IndicatorKind, IndicatorStore};
use serde::{Deserialize, Serialize};

/// One year of an entity series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Year of observation.
    pub year: i32,
    /// Value, `None` when the entity has no value that year.
    pub value: Option<f64>,
}

/// Values of `kind` for one entity over every configured year.
///
/// With an adjuster and an adjustment year, monetary values are restated in
/// that year's prices.
pub fn entity_series(
    store: &IndicatorStore,
    kind: &IndicatorKind,
    entity: &str,
    set: EntitySet,
    adjustment: Option<(&PriceAdjuster<'_>, i32)>,
) -> Vec<SeriesPoint> {
    store
        .available_years()
        .iter()
        .map(|&year| {
            let value = store.get_indicator_data(kind, year, set).get(entity).copied();
            let value = match adjustment {
                Some((adjuster, target_year)) if kind.is_monetary() => {
                    adjuster.adjust_value(value, entity, year, target_year, set)
                }
                _ => value,
            };
            SeriesPoint { year, value }
        })
        .collect()
}

/// Share of `kind` in the entity's total volume over every configured year.
pub fn entity_share_series(
    store: &IndicatorStore,
    kind: &IndicatorKind,
    entity: &str,
    set: EntitySet,
) -> Vec<SeriesPoint> {
    store
        .available_years()
        .iter()
        .map(|&year| SeriesPoint {
            year,
            value: relative_share(store, kind, year, set).get(entity).copied(),
        })
        .collect()
}
