//! Share of an indicator in the entity's total production volume.

use regatlas_data::{EntitySet, EntityValues, IndicatorKind, IndicatorStore};

/// Percentage of `value` in `total`, or 0 when the total is zero.
pub fn share_of(value: f64, total: f64) -> f64 {
    if total == 0.0 { 0.0 } else { value / total * 100.0 }
}

/// Share of `kind` in `total_volume` for every entity present in both
/// tables. Entities missing from either side are absent from the result.
pub fn relative_share(
    store: &IndicatorStore,
    kind: &IndicatorKind,
    year: i32,
    set: EntitySet,
) -> EntityValues {
    let values = store.get_indicator_data(kind, year, set);
    let totals = store.get_indicator_data(&IndicatorKind::TotalVolume, year, set);

    values
        .into_iter()
        .filter_map(|(entity, value)| {
            let total = *totals.get(&entity)?;
            Some((entity, share_of(value, total)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polars::prelude::*;
    use regatlas_data::IndicatorTable;

    fn store() -> IndicatorStore {
        let frame = df!(
            "region" => ["Москва", "Тыва", "Алтай", "Крым"],
            "Добывающая промышленность" => [Some(50.0), Some(30.0), Some(5.0), None],
            "Суммарный объем" => [Some(1000.0), Some(0.0), None, Some(100.0)],
        )
        .unwrap();
        IndicatorStore::new(vec![2023])
            .with_table(2023, IndicatorTable::from_frame(frame, EntitySet::Regions).unwrap())
    }

    #[test]
    fn test_relative_share() {
        let shares = relative_share(&store(), &IndicatorKind::MiningIndustry, 2023, EntitySet::Regions);

        assert_relative_eq!(shares["Москва"], 5.0);
        assert_eq!(shares.get("Тыва"), Some(&0.0));
        assert!(!shares.contains_key("Алтай"));
        assert!(!shares.contains_key("Крым"));
    }

    #[test]
    fn test_unknown_year() {
        let shares = relative_share(&store(), &IndicatorKind::MiningIndustry, 2020, EntitySet::Regions);
        assert!(shares.is_empty());
    }
}
