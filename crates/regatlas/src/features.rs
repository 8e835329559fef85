//! Feature Join
//!
//! Attaches computed values onto the features of a GeoJSON
//! FeatureCollection. Features are matched to entities by their `name`
//! property; geometry is never read or written.

use crate::atlas::Atlas;
use crate::error::{AtlasError, Result};
use regatlas_data::{DataType, EntitySet, EntityValues, IndicatorKind};
use regatlas_legend::{Comparison, LegendRequest, ValueTable};
use regatlas_metrics::{DeltaMode, DeltaValues, DisplayMode, LayerView, SectorClass};
use serde_json::{Map, Value};

/// Property holding the entity name of a feature.
pub const NAME_PROPERTY: &str = "name";

/// Property holding the comparison delta.
pub const DELTA_PROPERTY: &str = "delta";

const UNKNOWN_NAME: &str = "Unknown";

/// What a map layer shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapQuery {
    /// Data type of the layer.
    pub data_type: DataType,
    /// Displayed year.
    pub year: i32,
    /// Optional comparison year and mode.
    pub comparison: Option<Comparison>,
    /// Raw values or shares.
    pub display: DisplayMode,
    /// Restate monetary values in this year's prices.
    pub adjustment_year: Option<i32>,
}

impl MapQuery {
    /// A query for one year with absolute display and no comparison.
    pub const fn new(data_type: DataType, year: i32) -> Self {
        Self {
            data_type,
            year,
            comparison: None,
            display: DisplayMode::Absolute,
            adjustment_year: None,
        }
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

    /// The legend request describing the same layer.
    pub fn legend_request(&self, set: EntitySet) -> LegendRequest {
        LegendRequest {
            data_type: self.data_type.clone(),
            entity_set: set,
            year: Some(self.year),
            comparison: self.comparison,
            display: self.display,
            adjustment_year: self.adjustment_year,
        }
    }
}

fn feature_name(feature: &Value) -> Option<&str> {
    feature.get("properties")?.get(NAME_PROPERTY)?.as_str()
}

/// Properties object of a feature, created when absent. `None` when the
/// feature is not an object.
fn properties_mut(feature: &mut Value) -> Option<&mut Map<String, Value>> {
    let properties = feature
        .as_object_mut()?
        .entry("properties")
        .or_insert_with(|| Value::Object(Map::new()));
    if !properties.is_object() {
        *properties = Value::Object(Map::new());
    }
    properties.as_object_mut()
}

impl Atlas {
    /// Attach the values of a map layer onto every feature of a GeoJSON
    /// FeatureCollection.
    ///
    /// Returns the number of annotated features.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::InvalidGeoJson`] when the document has no
    /// `features` array.
    pub fn annotate_features(
        &self,
        geojson: &mut Value,
        query: &MapQuery,
        set: EntitySet,
    ) -> Result<usize> {
        let features = geojson
            .get_mut("features")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| AtlasError::InvalidGeoJson("missing \"features\" array".to_string()))?;

        let annotated = match &query.data_type {
            DataType::None => features
                .iter_mut()
                .filter_map(properties_mut)
                .map(|properties| {
                    let name = properties
                        .remove(NAME_PROPERTY)
                        .unwrap_or_else(|| Value::from(UNKNOWN_NAME));
                    properties.clear();
                    properties.insert(NAME_PROPERTY.to_string(), name);
                })
                .count(),
            DataType::DominantSector => {
                let sectors = self.dominant_sector(query.year, set);
                let property = query.data_type.as_str();
                let mut count = 0;
                for feature in features.iter_mut() {
                    let class = feature_name(feature)
                        .and_then(|name| sectors.get(name).copied())
                        .unwrap_or(SectorClass::Undetermined);
                    if let Some(properties) = properties_mut(feature) {
                        properties.insert(property.to_string(), Value::from(class.label()));
                        count += 1;
                    }
                }
                count
            }
            DataType::Indicator(kind) => {
                let displayed = self.displayed_values(kind, query, set);
                let deltas = query
                    .comparison
                    .map(|comparison| self.comparison_deltas(kind, query, comparison, set));
                let property = query.data_type.as_str();

                let mut count = 0;
                for feature in features.iter_mut() {
                    let name = feature_name(feature).map(str::to_string);
                    let Some(properties) = properties_mut(feature) else {
                        continue;
                    };
                    let value = name.as_deref().and_then(|n| displayed.get(n).copied());
                    properties.insert(property.to_string(), Value::from(value));
                    if let Some(deltas) = &deltas {
                        let delta = name.as_deref().and_then(|n| deltas.get(n).copied().flatten());
                        properties.insert(DELTA_PROPERTY.to_string(), Value::from(delta));
                    }
                    count += 1;
                }
                count
            }
        };

        tracing::debug!(
            data_type = %query.data_type,
            year = query.year,
            set = set.as_str(),
            annotated,
            "annotated features"
        );
        Ok(annotated)
    }

    /// Display settings of a map layer over the loaded tables.
    pub fn layer_view(&self, query: &MapQuery, set: EntitySet) -> LayerView<'_> {
        self.legend_builder()
            .layer_view(set)
            .display(query.display)
            .adjust_to(query.adjustment_year)
    }

    /// Values shown on the map: shares in relative display, otherwise raw
    /// values restated in the adjustment year's prices when monetary.
    pub fn displayed_values(
        &self,
        kind: &IndicatorKind,
        query: &MapQuery,
        set: EntitySet,
    ) -> EntityValues {
        self.layer_view(query, set).values(kind, query.year)
    }

    /// Deltas shown on the map, both years taken as displayed.
    pub fn comparison_deltas(
        &self,
        kind: &IndicatorKind,
        query: &MapQuery,
        comparison: Comparison,
        set: EntitySet,
    ) -> DeltaValues {
        self.layer_view(query, set)
            .deltas(kind, query.year, comparison.year, comparison.mode)
    }

    /// The values a map layer colors: deltas when comparing, otherwise the
    /// displayed values. Empty for layers without numbers.
    pub fn layer_table(&self, query: &MapQuery, set: EntitySet) -> ValueTable {
        let Some(kind) = query.data_type.indicator() else {
            return ValueTable::from_values(
                query.data_type.as_str(),
                query.year,
                &EntityValues::new(),
            );
        };

        match query.comparison {
            Some(comparison) => ValueTable::from_deltas(
                query.year,
                &self.comparison_deltas(kind, query, comparison, set),
            ),
            None => ValueTable::from_values(
                query.data_type.as_str(),
                query.year,
                &self.displayed_values(kind, query, set),
            ),
        }
    }
}
