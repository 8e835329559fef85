//! Year-over-year comparison.
//!
//! Deltas are computed over the union of entities of both years. An entity
//! missing on either side maps to `None`.

use crate::error::{MetricsError, Result};
use crate::share::relative_share;
use regatlas_data::{EntitySet, EntityValues, IndicatorKind, IndicatorStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Entity name to an optional delta.
pub type DeltaValues = BTreeMap<String, Option<f64>>;

/// How two years are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaMode {
    /// Difference of values
    #[default]
    Absolute,
    /// Difference in percent of the comparison value
    Relative,
}

impl DeltaMode {
    /// Identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Relative => "relative",
        }
    }
}

impl fmt::Display for DeltaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeltaMode {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "absolute" => Ok(Self::Absolute),
            "relative" => Ok(Self::Relative),
            other => Err(MetricsError::InvalidMode(other.to_string())),
        }
    }
}

/// How indicator values are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Raw values
    #[default]
    Absolute,
    /// Share of the entity's total volume
    Relative,
}

impl DisplayMode {
    /// Identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Relative => "relative",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "absolute" => Ok(Self::Absolute),
            "relative" => Ok(Self::Relative),
            other => Err(MetricsError::InvalidDisplayMode(other.to_string())),
        }
    }
}

/// Delta of one pair of values.
///
/// Relative deltas against a zero comparison value are 0.
pub fn compute_delta(current: Option<f64>, compare: Option<f64>, mode: DeltaMode) -> Option<f64> {
    let (current, compare) = (current?, compare?);
    Some(match mode {
        DeltaMode::Absolute => current - compare,
        DeltaMode::Relative if compare == 0.0 => 0.0,
        DeltaMode::Relative => (current - compare) / compare * 100.0,
    })
}

/// Deltas over the union of entities of two mappings.
pub fn delta_between(current: &EntityValues, compare: &EntityValues, mode: DeltaMode) -> DeltaValues {
    current
        .keys()
        .chain(compare.keys())
        .map(|entity| {
            let delta = compute_delta(
                current.get(entity).copied(),
                compare.get(entity).copied(),
                mode,
            );
            (entity.clone(), delta)
        })
        .collect()
}

/// Compare an indicator between `year_a` (current) and `year_b` (reference).
pub fn delta(
    store: &IndicatorStore,
    kind: &IndicatorKind,
    year_a: i32,
    year_b: i32,
    mode: DeltaMode,
    set: EntitySet,
) -> DeltaValues {
    let current = store.get_indicator_data(kind, year_a, set);
    let compare = store.get_indicator_data(kind, year_b, set);
    delta_between(&current, &compare, mode)
}

/// Compare the shares of an indicator in total volume between two years.
pub fn delta_on_shares(
    store: &IndicatorStore,
    kind: &IndicatorKind,
    year_a: i32,
    year_b: i32,
    mode: DeltaMode,
    set: EntitySet,
) -> DeltaValues {
    let current = relative_share(store, kind, year_a, set);
    let compare = relative_share(store, kind, year_b, set);
    delta_between(&current, &compare, mode)
}

/// Whether comparisons of `kind` run on shares (in percentage points)
/// rather than on raw values.
pub fn uses_share_delta(kind: &IndicatorKind, display: DisplayMode) -> bool {
    display == DisplayMode::Relative
        && *kind != IndicatorKind::TotalVolume
        && !kind.is_absolute_only()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polars::prelude::*;
    use regatlas_data::IndicatorTable;
    use rstest::rstest;

    fn store() -> IndicatorStore {
        let y2020 = df!(
            "region" => ["Москва", "Тыва", "Алтай"],
            "Сфера услуг" => [Some(100.0), Some(0.0), Some(10.0)],
            "Суммарный объем" => [400.0, 100.0, 100.0],
        )
        .unwrap();
        let y2023 = df!(
            "region" => ["Москва", "Тыва", "Крым"],
            "Сфера услуг" => [150.0, 20.0, 5.0],
            "Суммарный объем" => [500.0, 100.0, 50.0],
        )
        .unwrap();
        IndicatorStore::new(vec![2020, 2023])
            .with_table(2020, IndicatorTable::from_frame(y2020, EntitySet::Regions).unwrap())
            .with_table(2023, IndicatorTable::from_frame(y2023, EntitySet::Regions).unwrap())
    }

    #[rstest]
    #[case(Some(150.0), Some(100.0), DeltaMode::Absolute, Some(50.0))]
    #[case(Some(150.0), Some(100.0), DeltaMode::Relative, Some(50.0))]
    #[case(Some(20.0), Some(0.0), DeltaMode::Relative, Some(0.0))]
    #[case(None, Some(1.0), DeltaMode::Absolute, None)]
    #[case(Some(1.0), None, DeltaMode::Relative, None)]
    fn test_compute_delta(
        #[case] current: Option<f64>,
        #[case] compare: Option<f64>,
        #[case] mode: DeltaMode,
        #[case] expected: Option<f64>,
    ) {
        assert_eq!(compute_delta(current, compare, mode), expected);
    }

    #[test]
    fn test_delta_over_union() {
        let deltas = delta(
            &store(),
            &IndicatorKind::Services,
            2023,
            2020,
            DeltaMode::Absolute,
            EntitySet::Regions,
        );

        assert_eq!(deltas.len(), 4);
        assert_eq!(deltas["Москва"], Some(50.0));
        assert_eq!(deltas["Тыва"], Some(20.0));
        assert_eq!(deltas["Алтай"], None);
        assert_eq!(deltas["Крым"], None);
    }

    #[test]
    fn test_delta_on_shares() {
        let deltas = delta_on_shares(
            &store(),
            &IndicatorKind::Services,
            2023,
            2020,
            DeltaMode::Absolute,
            EntitySet::Regions,
        );

        assert_relative_eq!(deltas["Москва"].unwrap(), 30.0 - 25.0, epsilon = 1e-12);
        assert_relative_eq!(deltas["Тыва"].unwrap(), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("relative".parse::<DeltaMode>().unwrap(), DeltaMode::Relative);
        assert_eq!(
            "percent".parse::<DeltaMode>(),
            Err(MetricsError::InvalidMode("percent".to_string()))
        );
        assert!("share".parse::<DisplayMode>().is_err());
    }

    #[rstest]
    #[case(IndicatorKind::Services, DisplayMode::Relative, true)]
    #[case(IndicatorKind::Services, DisplayMode::Absolute, false)]
    #[case(IndicatorKind::TotalVolume, DisplayMode::Relative, false)]
    #[case(IndicatorKind::Salary, DisplayMode::Relative, false)]
    #[case(IndicatorKind::Population, DisplayMode::Relative, false)]
    fn test_uses_share_delta(
        #[case] kind: IndicatorKind,
        #[case] display: DisplayMode,
        #[case] expected: bool,
    ) {
        assert_eq!(uses_share_delta(&kind, display), expected);
    }
}
