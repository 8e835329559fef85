//! Dominant Sector
//!
//! Classifies each entity by the economic sector with the largest share of
//! its total production volume. When no sector reaches
//! [`DIVERSIFIED_THRESHOLD`] percent the economy is diversified.

use crate::share::share_of;
use regatlas_data::{EntitySet, IndicatorKind, IndicatorStore};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Share (percent) a sector needs to be dominant.
pub const DIVERSIFIED_THRESHOLD: f64 = 25.0;

/// Color shown for entities without a sector class.
pub const UNDETERMINED_COLOR: &str = "#808080";

/// Economic sectors, in tie-break priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sector {
    /// Mining industry
    Mining,
    /// Manufacturing industry
    Manufacturing,
    /// Agriculture
    Agriculture,
    /// Services
    Services,
}

impl Sector {
    /// All sectors in priority order.
    pub const fn all() -> [Self; 4] {
        [
            Self::Mining,
            Self::Manufacturing,
            Self::Agriculture,
            Self::Services,
        ]
    }

    /// Indicator holding the sector's production volume.
    pub const fn indicator(&self) -> IndicatorKind {
        match self {
            Self::Mining => IndicatorKind::MiningIndustry,
            Self::Manufacturing => IndicatorKind::ManufacturingIndustry,
            Self::Agriculture => IndicatorKind::Agriculture,
            Self::Services => IndicatorKind::Services,
        }
    }
}

/// Outcome of the dominant sector classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectorClass {
    /// One sector holds the largest share, at least the threshold
    Dominant(Sector),
    /// No sector reaches the threshold
    Diversified,
    /// Total volume is zero or unknown
    Undetermined,
}

impl SectorClass {
    /// Classes shown in the categorical legend, in legend order.
    pub const fn legend_classes() -> [Self; 5] {
        [
            Self::Dominant(Sector::Mining),
            Self::Dominant(Sector::Manufacturing),
            Self::Dominant(Sector::Agriculture),
            Self::Dominant(Sector::Services),
            Self::Diversified,
        ]
    }

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Dominant(Sector::Mining) => "Добывающая",
            Self::Dominant(Sector::Manufacturing) => "Обрабатывающая",
            Self::Dominant(Sector::Agriculture) => "Сельское хозяйство",
            Self::Dominant(Sector::Services) => "Сфера услуг",
            Self::Diversified => "Диверсифицированная",
            Self::Undetermined => "Не определен",
        }
    }

    /// Legend color; undetermined entities have none.
    pub const fn color(&self) -> Option<&'static str> {
        match self {
            Self::Dominant(Sector::Mining) => Some("#ff6b6b"),
            Self::Dominant(Sector::Manufacturing) => Some("#4ecdc4"),
            Self::Dominant(Sector::Agriculture) => Some("#45b7d1"),
            Self::Dominant(Sector::Services) => Some("#96ceb4"),
            Self::Diversified => Some("#feca57"),
            Self::Undetermined => None,
        }
    }

    /// Color used when rendering, gray for undetermined entities.
    pub fn display_color(&self) -> &'static str {
        self.color().unwrap_or(UNDETERMINED_COLOR)
    }
}

impl fmt::Display for SectorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SectorClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Shares of each sector in `total`, in [`Sector::all`] order.
///
/// Returns `None` when the total is absent or not positive. Missing sector
/// values count as 0.
pub fn sector_shares(total: Option<f64>, values: [Option<f64>; 4]) -> Option<[f64; 4]> {
    let total = total.filter(|t| *t > 0.0)?;
    Some(values.map(|value| share_of(value.unwrap_or(0.0), total)))
}

/// Classify one entity from its total volume and sector values.
pub fn classify(total: Option<f64>, values: [Option<f64>; 4]) -> SectorClass {
    let Some(shares) = sector_shares(total, values) else {
        return SectorClass::Undetermined;
    };

    let mut best: Option<(Sector, f64)> = None;
    for (sector, share) in Sector::all().into_iter().zip(shares) {
        if best.is_none_or(|(_, max)| share > max) {
            best = Some((sector, share));
        }
    }

    match best {
        Some((sector, share)) if share >= DIVERSIFIED_THRESHOLD => SectorClass::Dominant(sector),
        _ => SectorClass::Diversified,
    }
}

/// Dominant sector of every entity appearing in any sector table.
pub fn dominant_sector(
    store: &IndicatorStore,
    year: i32,
    set: EntitySet,
) -> BTreeMap<String, SectorClass> {
    let sector_values =
        Sector::all().map(|sector| store.get_indicator_data(&sector.indicator(), year, set));
    let totals = store.get_indicator_data(&IndicatorKind::TotalVolume, year, set);

    let entities: BTreeSet<&String> = sector_values
        .iter()
        .flat_map(|values| values.keys())
        .collect();

    entities
        .into_iter()
        .map(|entity| {
            let values = sector_values.each_ref().map(|values| values.get(entity).copied());
            let class = classify(totals.get(entity).copied(), values);
            (entity.clone(), class)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use regatlas_data::IndicatorTable;
    use rstest::rstest;

    #[rstest]
    #[case([Some(40.0), Some(20.0), Some(20.0), Some(20.0)], SectorClass::Dominant(Sector::Mining))]
    #[case([Some(20.0), Some(20.0), Some(20.0), Some(20.0)], SectorClass::Diversified)]
    #[case([Some(10.0), Some(30.0), Some(30.0), Some(5.0)], SectorClass::Dominant(Sector::Manufacturing))]
    #[case([None, None, Some(25.0), None], SectorClass::Dominant(Sector::Agriculture))]
    #[case([None, None, None, None], SectorClass::Diversified)]
    fn test_classify(#[case] values: [Option<f64>; 4], #[case] expected: SectorClass) {
        assert_eq!(classify(Some(100.0), values), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(0.0))]
    #[case(Some(-5.0))]
    fn test_undetermined(#[case] total: Option<f64>) {
        assert_eq!(
            classify(total, [Some(40.0), None, None, None]),
            SectorClass::Undetermined
        );
    }

    #[test]
    fn test_shares_sum_at_most_hundred() {
        let shares = sector_shares(Some(200.0), [Some(50.0), Some(30.0), None, Some(70.0)]).unwrap();
        assert!(shares.iter().sum::<f64>() <= 100.0);
    }

    #[test]
    fn test_labels_and_colors() {
        let labels: Vec<&str> = SectorClass::legend_classes().iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Добывающая",
                "Обрабатывающая",
                "Сельское хозяйство",
                "Сфера услуг",
                "Диверсифицированная"
            ]
        );
        assert_eq!(SectorClass::Undetermined.color(), None);
        assert_eq!(SectorClass::Undetermined.display_color(), "#808080");
        assert_eq!(SectorClass::Diversified.color(), Some("#feca57"));
    }

    #[test]
    fn test_dominant_sector_from_store() {
        let frame = df!(
            "region" => ["Кузбасс", "Москва", "Крым"],
            "Добывающая промышленность" => [Some(60.0), Some(5.0), None],
            "Сфера услуг" => [Some(20.0), Some(70.0), Some(10.0)],
            "Суммарный объем" => [Some(100.0), Some(100.0), None],
        )
        .unwrap();
        let store = IndicatorStore::new(vec![2023])
            .with_table(2023, IndicatorTable::from_frame(frame, EntitySet::Regions).unwrap());

        let sectors = dominant_sector(&store, 2023, EntitySet::Regions);
        assert_eq!(sectors["Кузбасс"], SectorClass::Dominant(Sector::Mining));
        assert_eq!(sectors["Москва"], SectorClass::Dominant(Sector::Services));
        assert_eq!(sectors["Крым"], SectorClass::Undetermined);
    }
}
