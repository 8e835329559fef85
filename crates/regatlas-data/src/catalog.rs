//! Indicator Catalog
//!
//! Describes the indicator columns present in the loaded data and the
//! selectable data types built on top of them. The catalog is an owned value:
//! callers rebuild it with [`IndicatorCatalog::refresh`] after loading.

use crate::case::Case;
use crate::error::DataError;
use crate::indicator::IndicatorKind;
use crate::store::IndicatorStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metadata of one indicator column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorMetadata {
    /// Indicator kind (unique identifier)
    #[serde(rename = "type")]
    pub kind: IndicatorKind,
    /// Display label, the column header verbatim
    pub label: String,
    /// Unit of measurement
    pub unit: String,
    /// Description shown next to the label
    pub description: String,
}

impl IndicatorMetadata {
    /// Build metadata from a column header.
    pub fn from_column(header: &str) -> Self {
        Self {
            kind: IndicatorKind::from_column(header),
            label: header.to_string(),
            unit: IndicatorKind::unit_for_column(header).to_string(),
            description: header.to_string(),
        }
    }
}

/// What a map layer shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DataType {
    /// Plain map without data
    None,
    /// Dominant economic sector per entity
    DominantSector,
    /// A numeric indicator
    Indicator(IndicatorKind),
}

impl DataType {
    /// Identifier used at the presentation boundary.
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::DominantSector => "dominant_sector",
            Self::Indicator(kind) => kind.as_str(),
        }
    }

    /// The indicator kind, if this is a numeric layer.
    pub const fn indicator(&self) -> Option<&IndicatorKind> {
        match self {
            Self::Indicator(kind) => Some(kind),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(DataError::UnknownDataType(s.to_string())),
            "none" => Ok(Self::None),
            "dominant_sector" => Ok(Self::DominantSector),
            other => Ok(Self::Indicator(IndicatorKind::from(other))),
        }
    }
}

impl From<DataType> for String {
    fn from(data_type: DataType) -> Self {
        data_type.as_str().to_string()
    }
}

impl TryFrom<String> for DataType {
    type Error = DataError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Label and description of a selectable data type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTypeInfo {
    /// Data type identifier
    #[serde(rename = "type")]
    pub data_type: DataType,
    /// Display label
    pub label: String,
    /// Description
    pub description: String,
}

/// Indicator metadata discovered from an [`IndicatorStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicatorCatalog {
    indicators: Vec<IndicatorMetadata>,
}

impl IndicatorCatalog {
    /// Discover the indicators of a store.
    pub fn from_store(store: &IndicatorStore) -> Self {
        Self {
            indicators: store.available_indicators(),
        }
    }

    /// Re-scan the store, replacing the discovered metadata.
    pub fn refresh(&mut self, store: &IndicatorStore) {
        self.indicators = store.available_indicators();
    }

    /// All discovered indicators, in column order.
    pub fn indicators(&self) -> &[IndicatorMetadata] {
        &self.indicators
    }

    /// Metadata of one indicator.
    pub fn get(&self, kind: &IndicatorKind) -> Option<&IndicatorMetadata> {
        self.indicators.iter().find(|m| &m.kind == kind)
    }

    /// Number of discovered indicators.
    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    /// Returns true if no indicators were discovered.
    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Every selectable data type: `none`, `dominant_sector`, then the
    /// discovered indicators.
    pub fn data_types(&self) -> Vec<DataTypeInfo> {
        let mut types = vec![
            DataTypeInfo {
                data_type: DataType::None,
                label: "Без данных".to_string(),
                description: "Простая карта без данных".to_string(),
            },
            DataTypeInfo {
                data_type: DataType::DominantSector,
                label: "Преобладающий сектор экономики".to_string(),
                description: "Определение доминирующего сектора экономики в регионе"
                    .to_string(),
            },
        ];

        types.extend(self.indicators.iter().map(|m| DataTypeInfo {
            data_type: DataType::Indicator(m.kind.clone()),
            label: m.label.clone(),
            description: m.description.clone(),
        }));

        types
    }

    /// Label of a data type, if it is selectable.
    pub fn label(&self, data_type: &DataType) -> Option<String> {
        self.data_types()
            .into_iter()
            .find(|info| &info.data_type == data_type)
            .map(|info| info.label)
    }

    /// Data types selectable in a case: always `none`, followed by the
    /// case's allowed types that exist in the data. `None` selects every
    /// data type.
    pub fn filtered_data_types(&self, case: Option<Case>) -> Vec<DataTypeInfo> {
        let all = self.data_types();
        let Some(case) = case else {
            return all;
        };

        let mut filtered: Vec<DataTypeInfo> = all
            .iter()
            .filter(|info| info.data_type == DataType::None)
            .cloned()
            .collect();

        for allowed in case.allowed_data_types() {
            if let Some(info) = all.iter().find(|info| info.data_type == allowed) {
                filtered.push(info.clone());
            }
        }

        filtered
    }
}

/// Short label used in compact selectors.
pub fn short_label(label: &str) -> &str {
    match label {
        "Среднемесячная номинальная ЗП" => "Средняя ЗП",
        "Валовой региональный продукт" => "ВРП",
        "ВРП на душу населения" => "ВРП на душу",
        "Добывающая промышленность" => "Добывающая пром.",
        "Обрабатывающая промышленность" => "Обрабатывающая пром.",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> IndicatorCatalog {
        IndicatorCatalog {
            indicators: [
                "Население",
                "Среднемесячная номинальная ЗП",
                "Добывающая промышленность",
                "Суммарный объем",
            ]
            .into_iter()
            .map(IndicatorMetadata::from_column)
            .collect(),
        }
    }

    #[test]
    fn test_metadata_from_column() {
        let meta = IndicatorMetadata::from_column("Валовой региональный продукт");
        assert_eq!(meta.kind, IndicatorKind::Gdp);
        assert_eq!(meta.label, "Валовой региональный продукт");
        assert_eq!(meta.unit, "млн руб.");
        assert_eq!(meta.description, meta.label);
    }

    #[test]
    fn test_data_types_prefix() {
        let types = catalog().data_types();
        assert_eq!(types.len(), 6);
        assert_eq!(types[0].data_type, DataType::None);
        assert_eq!(types[1].data_type, DataType::DominantSector);
        assert_eq!(
            types[2].data_type,
            DataType::Indicator(IndicatorKind::Population)
        );
    }

    #[test]
    fn test_filtered_by_case() {
        let catalog = catalog();

        let eco = catalog.filtered_data_types(Some(Case::Eco));
        let ids: Vec<&str> = eco.iter().map(|t| t.data_type.as_str()).collect();
        assert_eq!(ids, vec!["none", "salary"]);

        let production = catalog.filtered_data_types(Some(Case::Production));
        let ids: Vec<&str> = production.iter().map(|t| t.data_type.as_str()).collect();
        assert_eq!(
            ids,
            vec!["none", "mining_industry", "total_volume", "dominant_sector"]
        );

        assert_eq!(catalog.filtered_data_types(None).len(), 6);
    }

    #[test]
    fn test_get_and_label() {
        let catalog = catalog();
        assert!(catalog.get(&IndicatorKind::Salary).is_some());
        assert!(catalog.get(&IndicatorKind::Gdp).is_none());
        assert_eq!(
            catalog.label(&DataType::Indicator(IndicatorKind::Population)),
            Some("Население".to_string())
        );
        assert_eq!(catalog.label(&DataType::Indicator(IndicatorKind::Gdp)), None);
    }

    #[test]
    fn test_data_type_parsing() {
        assert_eq!("none".parse::<DataType>().unwrap(), DataType::None);
        assert_eq!(
            "dominant_sector".parse::<DataType>().unwrap(),
            DataType::DominantSector
        );
        assert_eq!(
            "gdp".parse::<DataType>().unwrap(),
            DataType::Indicator(IndicatorKind::Gdp)
        );
        assert!("  ".parse::<DataType>().is_err());
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("Валовой региональный продукт"), "ВРП");
        assert_eq!(short_label("Население"), "Население");
    }
}
