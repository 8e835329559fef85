//! Legend Builder
//!
//! Chooses a legend strategy for a map request and assembles the legend
//! from the loaded indicator and CPI tables.
//!
//! Without a comparison year the legend describes the displayed values:
//! nothing, dominant sectors, quantiles of the raw (optionally price
//! adjusted) values, or fixed share bands. With a comparison year it
//! describes the deltas, on raw values or on shares.

use crate::breaks::{DeltaScale, delta_classes, delta_colors};
use crate::classes::{FALLBACK_CLASSES, quantile_classes};
use crate::format::with_suffixes;
use crate::legend::Legend;
use crate::palette;
use regatlas_data::{
    CpiTables, DataType, EntitySet, IndicatorCatalog, IndicatorKind, IndicatorStore,
};
use regatlas_metrics::{
    DeltaMode, DeltaValues, DisplayMode, LayerView, SectorClass, shows_shares, uses_share_delta,
};

/// Title of the legend for an indicator missing from the catalog.
const LOADING_TITLE: &str = "Данные загружаются...";

/// Breakpoints of the relative share legend.
const RELATIVE_SHARE_CLASSES: [f64; 7] = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 100.0];

/// A comparison against another year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    /// Reference year.
    pub year: i32,
    /// How values are compared.
    pub mode: DeltaMode,
}

/// Everything that determines a legend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendRequest {
    /// What the layer shows.
    pub data_type: DataType,
    /// Entity set of the layer.
    pub entity_set: EntitySet,
    /// Displayed year; the store's default year when absent.
    pub year: Option<i32>,
    /// Optional comparison year and mode.
    pub comparison: Option<Comparison>,
    /// Raw values or shares.
    pub display: DisplayMode,
    /// Restate monetary values in this year's prices.
    pub adjustment_year: Option<i32>,
}

impl LegendRequest {
    /// A request for the regions layer with default settings.
    pub const fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            entity_set: EntitySet::Regions,
            year: None,
            comparison: None,
            display: DisplayMode::Absolute,
            adjustment_year: None,
        }
    }

    /// Set the entity set.
    pub const fn entity_set(mut self, set: EntitySet) -> Self {
        self.entity_set = set;
        self
    }

    /// Set the displayed year.
    pub const fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Compare against another year.
    pub const fn compare(mut self, year: i32, mode: DeltaMode) -> Self {
        self.comparison = Some(Comparison { year, mode });
        self
    }

    /// Set the display mode.
    pub const fn display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    /// Restate monetary values in another year's prices.
    pub const fn adjust_to(mut self, year: i32) -> Self {
        self.adjustment_year = Some(year);
        self
    }

    /// Strategy serving this request.
    pub fn strategy(&self) -> LegendStrategy {
        let kind = match &self.data_type {
            DataType::None => return LegendStrategy::NoData,
            DataType::DominantSector => return LegendStrategy::Categorical,
            DataType::Indicator(kind) => kind,
        };

        match self.comparison {
            Some(_) if uses_share_delta(kind, self.display) => LegendStrategy::ShareDelta,
            Some(_) => LegendStrategy::Delta,
            None if shows_shares(kind, self.display) => LegendStrategy::RelativeShare,
            None => LegendStrategy::Continuous,
        }
    }
}

/// Kinds of legends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegendStrategy {
    /// Plain gray map
    NoData,
    /// Dominant sector categories
    Categorical,
    /// Quantiles of raw values
    Continuous,
    /// Fixed bands of shares in total volume
    RelativeShare,
    /// Deltas of raw values
    Delta,
    /// Deltas of shares in percentage points
    ShareDelta,
}

/// The legend of the plain map.
pub fn no_data_legend() -> Legend {
    Legend::continuous(
        vec![0.0, 1.0],
        vec![palette::NO_DATA.to_string()],
        "none",
        "Нет данных",
    )
}

/// The categorical legend of the dominant sector map.
pub fn dominant_sector_legend() -> Legend {
    let categories = SectorClass::legend_classes();
    Legend {
        classes: (0..=categories.len()).map(|i| i as f64).collect(),
        colorscale: categories
            .iter()
            .filter_map(|c| c.color())
            .map(str::to_string)
            .collect(),
        color_prop: DataType::DominantSector.to_string(),
        title: "Преобладающий сектор экономики".to_string(),
        unit: None,
        categorical: true,
        labels: categories.iter().map(|c| c.label().to_string()).collect(),
    }
}

/// Legend for deltas in the range `[min, max]`; `None` selects the default
/// breakpoints of the scale.
pub fn delta_legend(range: Option<(f64, f64)>, scale: DeltaScale) -> Legend {
    let (classes, title) = match range {
        Some((min, max)) => (delta_classes(min, max, scale), scale.title()),
        None => (scale.default_classes().to_vec(), scale.default_title()),
    };
    let colors = delta_colors(&classes);
    Legend::continuous(classes, colors, "delta", title)
}

/// Delta legend over the entities present in both years.
fn legend_of_deltas(deltas: &DeltaValues, scale: DeltaScale) -> Legend {
    let present = deltas.values().filter_map(|delta| *delta);
    let range = present.clone().reduce(f64::min).zip(present.reduce(f64::max));
    delta_legend(range, scale)
}

/// Builds legends over borrowed tables.
#[derive(Debug, Clone, Copy)]
pub struct LegendBuilder<'a> {
    store: &'a IndicatorStore,
    catalog: &'a IndicatorCatalog,
    cpi: &'a CpiTables,
}

impl<'a> LegendBuilder<'a> {
    /// Create a builder.
    pub const fn new(
        store: &'a IndicatorStore,
        catalog: &'a IndicatorCatalog,
        cpi: &'a CpiTables,
    ) -> Self {
        Self {
            store,
            catalog,
            cpi,
        }
    }

    /// Layer values of one entity set, raw and unadjusted until configured.
    pub const fn layer_view(&self, set: EntitySet) -> LayerView<'a> {
        LayerView::new(self.store, self.cpi, set)
    }

    /// Build the legend for a request.
    pub fn build(&self, request: &LegendRequest) -> Legend {
        let strategy = request.strategy();
        tracing::debug!(data_type = %request.data_type, ?strategy, "building legend");

        let set = request.entity_set;
        match (&request.data_type, request.comparison) {
            (DataType::Indicator(kind), Some(comparison)) => {
                let year = request.year.unwrap_or_else(|| self.store.default_year());
                if strategy == LegendStrategy::ShareDelta {
                    return self.share_delta_legend_info(kind, year, comparison.year, set);
                }
                let deltas = self
                    .layer_view(set)
                    .display(request.display)
                    .adjust_to(request.adjustment_year)
                    .deltas(kind, year, comparison.year, comparison.mode);
                legend_of_deltas(&deltas, DeltaScale::from_mode(comparison.mode))
            }
            (data_type, _) => self.legend_info_with_adjustment(
                data_type,
                request.display,
                set,
                request.adjustment_year,
                request.year,
            ),
        }
    }

    /// Legend of the displayed values of a data type.
    ///
    /// Quantiles are taken over the values of `target_year` (the default year
    /// when absent), restated in `adjustment_year` prices for monetary kinds.
    pub fn legend_info(
        &self,
        data_type: &DataType,
        set: EntitySet,
        adjustment_year: Option<i32>,
        target_year: Option<i32>,
    ) -> Legend {
        let kind = match data_type {
            DataType::None => return no_data_legend(),
            DataType::DominantSector => return dominant_sector_legend(),
            DataType::Indicator(kind) => kind,
        };

        let Some(meta) = self.catalog.get(kind) else {
            return Legend::continuous(
                FALLBACK_CLASSES.to_vec(),
                palette::cycled(&palette::DEFAULT_SEQUENTIAL, FALLBACK_CLASSES.len() - 1),
                kind.as_str(),
                with_suffixes(LOADING_TITLE.to_string(), adjustment_year, target_year),
            );
        };

        let classes = self.continuous_classes(kind, set, adjustment_year, target_year);
        let colors = palette::cycled(palette::sequential(kind), classes.len() - 1);
        let title = with_suffixes(
            format!("{}, {}", meta.label, meta.unit),
            adjustment_year,
            target_year,
        );

        Legend::continuous(classes, colors, kind.as_str(), title)
    }

    fn continuous_classes(
        &self,
        kind: &IndicatorKind,
        set: EntitySet,
        adjustment_year: Option<i32>,
        target_year: Option<i32>,
    ) -> Vec<f64> {
        let year = target_year.unwrap_or_else(|| self.store.default_year());
        let values = self
            .layer_view(set)
            .adjust_to(adjustment_year)
            .values(kind, year);
        quantile_classes(values.into_values())
    }

    /// Legend of the values as displayed in a mode: fixed share bands when
    /// shares are shown, otherwise [`legend_info`](Self::legend_info).
    pub fn legend_info_with_adjustment(
        &self,
        data_type: &DataType,
        display: DisplayMode,
        set: EntitySet,
        adjustment_year: Option<i32>,
        target_year: Option<i32>,
    ) -> Legend {
        match data_type {
            DataType::Indicator(kind) if shows_shares(kind, display) => {
                let label = self
                    .catalog
                    .get(kind)
                    .map_or_else(|| kind.column_name().to_string(), |m| m.label.clone());
                let title = with_suffixes(
                    format!("Доля {} в регионе, %", label),
                    adjustment_year,
                    target_year,
                );
                Legend::continuous(
                    RELATIVE_SHARE_CLASSES.to_vec(),
                    palette::RELATIVE_SHARE.iter().map(|c| c.to_string()).collect(),
                    kind.as_str(),
                    title,
                )
                .with_unit("%")
            }
            _ => self.legend_info(data_type, set, adjustment_year, target_year),
        }
    }

    /// Legend of deltas of raw values between `current_year` and
    /// `compare_year`, over entities present in both years.
    ///
    /// [`build`](Self::build) compares the values as displayed instead,
    /// shares or restated prices included.
    pub fn delta_legend_info(
        &self,
        kind: &IndicatorKind,
        current_year: i32,
        compare_year: i32,
        mode: DeltaMode,
        set: EntitySet,
    ) -> Legend {
        let deltas = self
            .layer_view(set)
            .deltas(kind, current_year, compare_year, mode);
        legend_of_deltas(&deltas, DeltaScale::from_mode(mode))
    }

    /// Legend of share deltas in percentage points between `current_year`
    /// and `compare_year`.
    pub fn share_delta_legend_info(
        &self,
        kind: &IndicatorKind,
        current_year: i32,
        compare_year: i32,
        set: EntitySet,
    ) -> Legend {
        let deltas = self
            .layer_view(set)
            .display(DisplayMode::Relative)
            .deltas(kind, current_year, compare_year, DeltaMode::Absolute);
        legend_of_deltas(&deltas, DeltaScale::SharePoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polars::prelude::*;
    use regatlas_data::{CpiTable, DataType, IndicatorTable};

    fn store() -> IndicatorStore {
        let y2020 = df!(
            "region" => ["A", "B", "C", "D", "E"],
            "Валовой региональный продукт" => [8.0, 18.0, 28.0, 38.0, 48.0],
            "Сфера услуг" => [10.0, 20.0, 30.0, 40.0, 50.0],
            "Суммарный объем" => [100.0, 100.0, 100.0, 100.0, 100.0],
        )
        .unwrap();
        let y2023 = df!(
            "region" => ["A", "B", "C", "D", "E"],
            "Валовой региональный продукт" => [10.0, 20.0, 30.0, 40.0, 50.0],
            "Сфера услуг" => [12.0, 21.0, 30.0, 39.0, 48.0],
            "Суммарный объем" => [100.0, 100.0, 100.0, 100.0, 100.0],
        )
        .unwrap();
        IndicatorStore::new(vec![2020, 2023])
            .with_table(2020, IndicatorTable::from_frame(y2020, EntitySet::Regions).unwrap())
            .with_table(2023, IndicatorTable::from_frame(y2023, EntitySet::Regions).unwrap())
    }

    fn cpi() -> CpiTables {
        let rows = ["A", "B", "C", "D", "E"]
            .into_iter()
            .flat_map(|e| [(e, 2022, 200.0), (e, 2023, 100.0)]);
        CpiTables::new(Some(CpiTable::from_percentages(rows)), None)
    }

    #[test]
    fn test_none_legend_shape() {
        let legend = no_data_legend();
        assert_eq!(legend.classes, vec![0.0, 1.0]);
        assert_eq!(legend.colorscale, vec!["#808080"]);
        assert_eq!(legend.color_prop, "none");
        assert_eq!(legend.title, "Нет данных");
        assert!(legend.unit.is_none());
    }

    #[test]
    fn test_dominant_sector_legend() {
        let legend = dominant_sector_legend();
        assert!(legend.categorical);
        assert_eq!(legend.classes, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(legend.labels.len(), 5);
        assert_eq!(legend.colorscale.len(), 5);
        assert!(legend.is_consistent());
    }

    #[test]
    fn test_strategies() {
        let gdp = DataType::Indicator(IndicatorKind::Gdp);
        let services = DataType::Indicator(IndicatorKind::Services);

        assert_eq!(
            LegendRequest::new(DataType::None).compare(2020, DeltaMode::Absolute).strategy(),
            LegendStrategy::NoData
        );
        assert_eq!(
            LegendRequest::new(DataType::DominantSector)
                .compare(2020, DeltaMode::Absolute)
                .strategy(),
            LegendStrategy::Categorical
        );
        assert_eq!(LegendRequest::new(gdp.clone()).strategy(), LegendStrategy::Continuous);
        assert_eq!(
            LegendRequest::new(services.clone())
                .display(DisplayMode::Relative)
                .strategy(),
            LegendStrategy::RelativeShare
        );
        assert_eq!(
            LegendRequest::new(services)
                .display(DisplayMode::Relative)
                .compare(2020, DeltaMode::Relative)
                .strategy(),
            LegendStrategy::ShareDelta
        );
        assert_eq!(
            LegendRequest::new(gdp)
                .display(DisplayMode::Relative)
                .compare(2020, DeltaMode::Relative)
                .strategy(),
            LegendStrategy::Delta
        );
    }

    #[test]
    fn test_continuous_legend() {
        let store = store();
        let catalog = IndicatorCatalog::from_store(&store);
        let cpi = CpiTables::default();
        let builder = LegendBuilder::new(&store, &catalog, &cpi);

        let legend = builder.build(&LegendRequest::new(DataType::Indicator(IndicatorKind::Gdp)));
        assert_eq!(legend.classes.len(), 6);
        assert_relative_eq!(legend.classes[1], 18.0, epsilon = 1e-9);
        assert_eq!(legend.colorscale, palette::cycled(palette::sequential(&IndicatorKind::Gdp), 5));
        assert_eq!(legend.title, "Валовой региональный продукт, млн руб.");
        assert_eq!(legend.color_prop, "gdp");
        assert!(legend.is_consistent());
    }

    #[test]
    fn test_adjusted_legend() {
        let store = store();
        let catalog = IndicatorCatalog::from_store(&store);
        let cpi = cpi();
        let builder = LegendBuilder::new(&store, &catalog, &cpi);

        let request = LegendRequest::new(DataType::Indicator(IndicatorKind::Gdp))
            .year(2023)
            .adjust_to(2022);
        let legend = builder.build(&request);

        // 2023 values in 2022 prices are halved.
        assert_relative_eq!(legend.classes[0], 5.0, epsilon = 1e-9);
        assert_relative_eq!(legend.classes[5], 25.0, epsilon = 1e-9);
        assert_eq!(
            legend.title,
            "Валовой региональный продукт, млн руб. (в ценах 2022 г.) (2023 год)"
        );
    }

    #[test]
    fn test_unknown_indicator_legend() {
        let store = store();
        let catalog = IndicatorCatalog::from_store(&store);
        let cpi = CpiTables::default();
        let builder = LegendBuilder::new(&store, &catalog, &cpi);

        let legend = builder.build(&LegendRequest::new(DataType::Indicator(IndicatorKind::Salary)));
        assert_eq!(legend.title, "Данные загружаются...");
        assert_eq!(legend.classes, FALLBACK_CLASSES.to_vec());
        assert_eq!(legend.colorscale.len(), 5);
    }

    #[test]
    fn test_relative_share_legend() {
        let store = store();
        let catalog = IndicatorCatalog::from_store(&store);
        let cpi = CpiTables::default();
        let builder = LegendBuilder::new(&store, &catalog, &cpi);

        let request = LegendRequest::new(DataType::Indicator(IndicatorKind::Services))
            .display(DisplayMode::Relative)
            .year(2023);
        let legend = builder.build(&request);
        assert_eq!(legend.classes, RELATIVE_SHARE_CLASSES.to_vec());
        assert_eq!(legend.colorscale.len(), 6);
        assert_eq!(legend.unit.as_deref(), Some("%"));
        assert_eq!(legend.title, "Доля Сфера услуг в регионе, % (2023 год)");
    }

    #[test]
    fn test_delta_legend() {
        let store = store();
        let catalog = IndicatorCatalog::from_store(&store);
        let cpi = CpiTables::default();
        let builder = LegendBuilder::new(&store, &catalog, &cpi);

        let legend = builder.delta_legend_info(
            &IndicatorKind::Gdp,
            2023,
            2020,
            DeltaMode::Absolute,
            EntitySet::Regions,
        );
        assert_eq!(
            legend.classes,
            vec![-4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0]
        );
        assert_eq!(legend.color_prop, "delta");
        assert_eq!(legend.title, "Абсолютное изменение");
        assert!(legend.is_consistent());
    }

    #[test]
    fn test_adjusted_delta_legend() {
        let store = store();
        let catalog = IndicatorCatalog::from_store(&store);
        let cpi = cpi();
        let builder = LegendBuilder::new(&store, &catalog, &cpi);

        // 2023 values halve in 2022 prices; 2020 has no CPI chain and stays.
        let request = LegendRequest::new(DataType::Indicator(IndicatorKind::Gdp))
            .year(2023)
            .compare(2020, DeltaMode::Absolute)
            .adjust_to(2022);
        let legend = builder.build(&request);
        assert_eq!(legend.classes, delta_classes(-23.0, -3.0, DeltaScale::Absolute));
        assert!(legend.is_consistent());
    }

    #[test]
    fn test_share_delta_legend() {
        let store = store();
        let catalog = IndicatorCatalog::from_store(&store);
        let cpi = CpiTables::default();
        let builder = LegendBuilder::new(&store, &catalog, &cpi);

        let request = LegendRequest::new(DataType::Indicator(IndicatorKind::Services))
            .display(DisplayMode::Relative)
            .year(2023)
            .compare(2020, DeltaMode::Relative);
        let legend = builder.build(&request);
        assert_eq!(legend.classes[8], 4.0);
        assert_eq!(legend.title, "Изменение доли (п.п.)");
    }

    #[test]
    fn test_default_delta_legend_without_overlap() {
        let store = store();
        let catalog = IndicatorCatalog::from_store(&store);
        let cpi = CpiTables::default();
        let builder = LegendBuilder::new(&store, &catalog, &cpi);

        let legend = builder.delta_legend_info(
            &IndicatorKind::Gdp,
            2023,
            2015,
            DeltaMode::Relative,
            EntitySet::Regions,
        );
        assert_eq!(legend.classes, DeltaScale::Relative.default_classes().to_vec());
        assert_eq!(legend.title, "Изменение (%)");
        assert_eq!(legend.colorscale.len(), 8);
    }
}
