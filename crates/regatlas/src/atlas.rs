//! The loaded state of the engine and its query interface.

use regatlas_data::{
    Case, CpiTables, DataConfig, DataTypeInfo, EntitySet, EntityValues, IndicatorCatalog,
    IndicatorKind, IndicatorMetadata, IndicatorStore,
};
use regatlas_legend::{Legend, LegendBuilder, LegendRequest};
use regatlas_metrics::{
    DeltaMode, DeltaValues, InflationError, IndicatorSummary, PriceAdjuster, RankedEntity,
    SectorClass, SeriesPoint,
};
use std::collections::BTreeMap;

/// Indicator tables, CPI tables and the indicator catalog, loaded once.
///
/// Every query is a pure function of its arguments and the loaded tables.
#[derive(Debug, Clone, Default)]
pub struct Atlas {
    store: IndicatorStore,
    cpi: CpiTables,
    catalog: IndicatorCatalog,
}

impl Atlas {
    /// Load every table named by the configuration.
    pub fn load(config: DataConfig) -> Self {
        tracing::info!(data_dir = %config.data_dir.display(), "loading atlas data");
        let store = IndicatorStore::load(&config);
        let cpi = CpiTables::load(&config);
        Self::from_parts(store, cpi)
    }

    /// Assemble an atlas from already loaded tables.
    pub fn from_parts(store: IndicatorStore, cpi: CpiTables) -> Self {
        let catalog = IndicatorCatalog::from_store(&store);
        tracing::debug!(indicators = catalog.len(), "indicator catalog built");
        Self {
            store,
            cpi,
            catalog,
        }
    }

    /// Indicator tables.
    pub const fn store(&self) -> &IndicatorStore {
        &self.store
    }

    /// CPI tables.
    pub const fn cpi(&self) -> &CpiTables {
        &self.cpi
    }

    /// Indicator catalog.
    pub const fn catalog(&self) -> &IndicatorCatalog {
        &self.catalog
    }

    /// Rebuild the catalog from the indicator tables.
    pub fn refresh_catalog(&mut self) {
        self.catalog.refresh(&self.store);
    }

    /// Configured years.
    pub fn available_years(&self) -> &[i32] {
        self.store.available_years()
    }

    /// The year shown by default.
    pub fn default_year(&self) -> i32 {
        self.store.default_year()
    }

    /// Indicators discovered in the data.
    pub fn available_indicators(&self) -> &[IndicatorMetadata] {
        self.catalog.indicators()
    }

    /// Every selectable data type.
    pub fn data_types(&self) -> Vec<DataTypeInfo> {
        self.catalog.data_types()
    }

    /// Data types selectable in a case.
    pub fn filtered_data_types(&self, case: Option<Case>) -> Vec<DataTypeInfo> {
        self.catalog.filtered_data_types(case)
    }

    /// Values of an indicator.
    pub fn get_value(&self, kind: &IndicatorKind, year: i32, set: EntitySet) -> EntityValues {
        self.store.get_indicator_data(kind, year, set)
    }

    /// Shares of an indicator in total volume.
    pub fn relative_share(&self, kind: &IndicatorKind, year: i32, set: EntitySet) -> EntityValues {
        regatlas_metrics::relative_share(&self.store, kind, year, set)
    }

    /// Deltas of an indicator between two years.
    pub fn delta(
        &self,
        kind: &IndicatorKind,
        year_a: i32,
        year_b: i32,
        mode: DeltaMode,
        set: EntitySet,
    ) -> DeltaValues {
        regatlas_metrics::delta(&self.store, kind, year_a, year_b, mode, set)
    }

    /// Deltas of an indicator's shares between two years.
    pub fn delta_on_shares(
        &self,
        kind: &IndicatorKind,
        year_a: i32,
        year_b: i32,
        mode: DeltaMode,
        set: EntitySet,
    ) -> DeltaValues {
        regatlas_metrics::delta_on_shares(&self.store, kind, year_a, year_b, mode, set)
    }

    /// Dominant sector of every entity.
    pub fn dominant_sector(&self, year: i32, set: EntitySet) -> BTreeMap<String, SectorClass> {
        regatlas_metrics::dominant_sector(&self.store, year, set)
    }

    /// Price adjuster over the loaded CPI tables.
    pub const fn price_adjuster(&self) -> PriceAdjuster<'_> {
        PriceAdjuster::new(&self.cpi)
    }

    /// Cumulative price factor, or the reason it cannot be computed.
    pub fn try_cumulative_inflation(
        &self,
        entity: &str,
        from_year: i32,
        to_year: i32,
        set: EntitySet,
    ) -> Result<f64, InflationError> {
        self.price_adjuster()
            .try_cumulative_inflation(entity, from_year, to_year, set)
    }

    /// Cumulative price factor, 1.0 when it cannot be computed.
    pub fn cumulative_inflation(
        &self,
        entity: &str,
        from_year: i32,
        to_year: i32,
        set: EntitySet,
    ) -> f64 {
        self.price_adjuster()
            .cumulative_inflation(entity, from_year, to_year, set)
    }

    /// Restate a value in another year's prices.
    pub fn adjust_value(
        &self,
        value: Option<f64>,
        entity: &str,
        data_year: i32,
        target_year: i32,
        set: EntitySet,
    ) -> Option<f64> {
        self.price_adjuster()
            .adjust_value(value, entity, data_year, target_year, set)
    }

    /// Legend builder over the loaded tables.
    pub const fn legend_builder(&self) -> LegendBuilder<'_> {
        LegendBuilder::new(&self.store, &self.catalog, &self.cpi)
    }

    /// Legend for a map request.
    pub fn build_legend(&self, request: &LegendRequest) -> Legend {
        self.legend_builder().build(request)
    }

    /// Yearly series of one entity, optionally restated in another year's
    /// prices.
    pub fn entity_series(
        &self,
        kind: &IndicatorKind,
        entity: &str,
        set: EntitySet,
        adjustment_year: Option<i32>,
    ) -> Vec<SeriesPoint> {
        let adjuster = self.price_adjuster();
        let adjustment = adjustment_year.map(|year| (&adjuster, year));
        regatlas_metrics::entity_series(&self.store, kind, entity, set, adjustment)
    }

    /// Yearly share of `kind` in the entity's total volume; `None` for
    /// kinds that are not production sectors.
    pub fn entity_share_series(
        &self,
        kind: &IndicatorKind,
        entity: &str,
        set: EntitySet,
    ) -> Option<Vec<SeriesPoint>> {
        kind.supports_share_display()
            .then(|| regatlas_metrics::entity_share_series(&self.store, kind, entity, set))
    }

    /// Summary of an indicator over the entities of a year.
    pub fn summarize(
        &self,
        kind: &IndicatorKind,
        year: i32,
        set: EntitySet,
    ) -> Option<IndicatorSummary> {
        regatlas_metrics::summarize(&self.get_value(kind, year, set))
    }

    /// The `n` entities with the largest values.
    pub fn top_n(
        &self,
        kind: &IndicatorKind,
        year: i32,
        set: EntitySet,
        n: usize,
    ) -> Vec<RankedEntity> {
        regatlas_metrics::top_n(&self.get_value(kind, year, set), n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polars::prelude::*;
    use regatlas_data::{CpiTable, DataType, IndicatorTable};

    fn atlas() -> Atlas {
        let frame = df!(
            "region" => ["Москва", "Тыва"],
            "Среднемесячная номинальная ЗП" => [120_000.0, 50_000.0],
            "Суммарный объем" => [1000.0, 10.0],
        )
        .unwrap();
        let store = IndicatorStore::new(vec![2022, 2023])
            .with_table(2023, IndicatorTable::from_frame(frame, EntitySet::Regions).unwrap());
        let cpi = CpiTables::new(
            Some(CpiTable::from_percentages([
                ("Москва", 2022, 110.0),
                ("Москва", 2023, 105.0),
            ])),
            None,
        );
        Atlas::from_parts(store, cpi)
    }

    #[test]
    fn test_catalog_is_built() {
        let atlas = atlas();
        assert_eq!(atlas.available_indicators().len(), 2);
        assert_eq!(atlas.data_types().len(), 4);
        assert_eq!(atlas.default_year(), 2023);
    }

    #[test]
    fn test_refresh_catalog() {
        let mut atlas = Atlas::default();
        assert!(atlas.available_indicators().is_empty());
        atlas.refresh_catalog();
        assert!(atlas.available_indicators().is_empty());
    }

    #[test]
    fn test_inflation_queries() {
        let atlas = atlas();
        assert_relative_eq!(
            atlas.cumulative_inflation("Москва", 2022, 2023, EntitySet::Regions),
            1.1
        );
        assert_eq!(
            atlas.cumulative_inflation("Тыва", 2022, 2023, EntitySet::Regions),
            1.0
        );
        assert!(
            atlas
                .try_cumulative_inflation("Тыва", 2022, 2023, EntitySet::Regions)
                .is_err()
        );
        assert_eq!(
            atlas.adjust_value(None, "Москва", 2022, 2023, EntitySet::Regions),
            None
        );
    }

    #[test]
    fn test_series_and_summary() {
        let atlas = atlas();
        let series = atlas.entity_series(
            &IndicatorKind::Salary,
            "Москва",
            EntitySet::Regions,
            Some(2022),
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].value, None);
        assert_relative_eq!(series[1].value.unwrap(), 120_000.0 / 1.1, epsilon = 1e-6);

        let summary = atlas
            .summarize(&IndicatorKind::Salary, 2023, EntitySet::Regions)
            .unwrap();
        assert_eq!(summary.max_entity, "Москва");
        assert_eq!(
            atlas.top_n(&IndicatorKind::Salary, 2023, EntitySet::Regions, 1)[0].entity,
            "Москва"
        );
    }

    #[test]
    fn test_share_series() {
        let frame = df!(
            "region" => ["Москва"],
            "Сфера услуг" => [250.0],
            "Суммарный объем" => [1000.0],
        )
        .unwrap();
        let store = IndicatorStore::new(vec![2022, 2023])
            .with_table(2023, IndicatorTable::from_frame(frame, EntitySet::Regions).unwrap());
        let atlas = Atlas::from_parts(store, CpiTables::default());

        let series = atlas
            .entity_share_series(&IndicatorKind::Services, "Москва", EntitySet::Regions)
            .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].value, None);
        assert_relative_eq!(series[1].value.unwrap(), 25.0);

        assert!(
            atlas
                .entity_share_series(&IndicatorKind::Salary, "Москва", EntitySet::Regions)
                .is_none()
        );
        assert!(
            atlas
                .entity_share_series(&IndicatorKind::TotalVolume, "Москва", EntitySet::Regions)
                .is_none()
        );
    }

    #[test]
    fn test_build_legend() {
        let atlas = atlas();
        let legend = atlas.build_legend(&LegendRequest::new(DataType::Indicator(
            IndicatorKind::Salary,
        )));
        assert_eq!(legend.title, "Среднемесячная номинальная ЗП, руб.");
    }
}
