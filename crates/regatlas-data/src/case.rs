//! Cases: named bundles of data types selectable together.

use crate::catalog::DataType;
use crate::error::DataError;
use crate::indicator::IndicatorKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Case selected when none is requested.
pub const DEFAULT_CASE: Case = Case::Eco;

/// A thematic selection filter over data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Case {
    /// Income and gross regional product, adjustable for inflation
    Eco,
    /// Population dynamics
    Population,
    /// Production structure
    Production,
}

impl Case {
    /// Returns all cases.
    pub const fn all() -> [Self; 3] {
        [Self::Eco, Self::Population, Self::Production]
    }

    /// Identifier.
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Eco => "eco",
            Self::Population => "population",
            Self::Production => "production",
        }
    }

    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Eco => "Экономические показатели",
            Self::Population => "Динамика населения",
            Self::Production => "Структура производства",
        }
    }

    /// Longer description.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Eco => {
                "Анализ среднедушевых доходов, ВРП и ВРП на душу населения с поправкой на инфляцию"
            }
            Self::Population => "Анализ изменения численности населения по регионам",
            Self::Production => "Изменение структуры промышленности по регионам",
        }
    }

    /// Data types allowed in this case, in display order.
    pub fn allowed_data_types(&self) -> Vec<DataType> {
        let indicators = match self {
            Self::Eco => vec![
                IndicatorKind::Salary,
                IndicatorKind::Gdp,
                IndicatorKind::GdpPerCapita,
            ],
            Self::Population => vec![IndicatorKind::Population],
            Self::Production => vec![
                IndicatorKind::MiningIndustry,
                IndicatorKind::ManufacturingIndustry,
                IndicatorKind::Agriculture,
                IndicatorKind::Services,
                IndicatorKind::TotalVolume,
            ],
        };

        let mut types: Vec<DataType> = indicators.into_iter().map(DataType::Indicator).collect();
        if matches!(self, Self::Production) {
            types.push(DataType::DominantSector);
        }
        types
    }

    /// Whether a data type may be selected in this case.
    pub fn allows(&self, data_type: &DataType) -> bool {
        *data_type == DataType::None || self.allowed_data_types().contains(data_type)
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Case {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|case| case.id() == s.trim())
            .ok_or_else(|| DataError::Parse(format!("Unknown case: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_case() {
        assert_eq!(DEFAULT_CASE, Case::Eco);
    }

    #[test]
    fn test_allowed_counts() {
        assert_eq!(Case::Eco.allowed_data_types().len(), 3);
        assert_eq!(Case::Population.allowed_data_types().len(), 1);
        assert_eq!(Case::Production.allowed_data_types().len(), 6);
    }

    #[test]
    fn test_allows() {
        assert!(Case::Eco.allows(&DataType::None));
        assert!(Case::Eco.allows(&DataType::Indicator(IndicatorKind::Gdp)));
        assert!(!Case::Eco.allows(&DataType::DominantSector));
        assert!(Case::Production.allows(&DataType::DominantSector));
    }

    #[test]
    fn test_parse() {
        assert_eq!("production".parse::<Case>().unwrap(), Case::Production);
        assert!("free".parse::<Case>().is_err());
    }
}
