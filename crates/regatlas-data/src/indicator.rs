//! Indicator kinds and the fixed column mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit used for columns without an entry in the unit table.
pub const DEFAULT_UNIT: &str = "ед.";

/// A named economic metric stored as one column of an indicator table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum IndicatorKind {
    /// Population
    Population,

    /// Average monthly nominal salary
    Salary,

    /// Gross regional product
    Gdp,

    /// Gross regional product per capita
    GdpPerCapita,

    /// Mining output
    MiningIndustry,

    /// Manufacturing output
    ManufacturingIndustry,

    /// Agricultural output
    Agriculture,

    /// Water supply
    WaterSupply,

    /// Energy supply
    EnergySupply,

    /// Services
    Services,

    /// Total production volume, the denominator of relative shares
    TotalVolume,

    /// A column outside the fixed mapping
    Custom(String),
}

impl IndicatorKind {
    /// Returns all kinds of the fixed mapping.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Population,
            Self::Salary,
            Self::Gdp,
            Self::GdpPerCapita,
            Self::MiningIndustry,
            Self::ManufacturingIndustry,
            Self::Agriculture,
            Self::WaterSupply,
            Self::EnergySupply,
            Self::Services,
            Self::TotalVolume,
        ]
    }

    /// Snake-case identifier.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Population => "population",
            Self::Salary => "salary",
            Self::Gdp => "gdp",
            Self::GdpPerCapita => "gdp_per_capita",
            Self::MiningIndustry => "mining_industry",
            Self::ManufacturingIndustry => "manufacturing_industry",
            Self::Agriculture => "agriculture",
            Self::WaterSupply => "water_supply",
            Self::EnergySupply => "energy_supply",
            Self::Services => "services",
            Self::TotalVolume => "total_volume",
            Self::Custom(name) => name,
        }
    }

    /// Header of the table column holding this indicator.
    pub fn column_name(&self) -> &str {
        match self {
            Self::Population => "Население",
            Self::Salary => "Среднемесячная номинальная ЗП",
            Self::Gdp => "Валовой региональный продукт",
            Self::GdpPerCapita => "ВРП на душу населения",
            Self::MiningIndustry => "Добывающая промышленность",
            Self::ManufacturingIndustry => "Обрабатывающая промышленность",
            Self::Agriculture => "Сельское хозяйство",
            Self::WaterSupply => "Водоснабжение",
            Self::EnergySupply => "Электроснабжение",
            Self::Services => "Сфера услуг",
            Self::TotalVolume => "Суммарный объем",
            Self::Custom(name) => name,
        }
    }

    /// Resolve the kind of a table column header.
    ///
    /// Headers outside the fixed mapping become [`IndicatorKind::Custom`]
    /// named by the lowercased header with spaces replaced by underscores.
    pub fn from_column(header: &str) -> Self {
        Self::all()
            .into_iter()
            .find(|kind| kind.column_name() == header)
            .unwrap_or_else(|| Self::Custom(header.to_lowercase().replace(' ', "_")))
    }

    /// Unit of measurement for a column header.
    pub fn unit_for_column(header: &str) -> &'static str {
        match header {
            "Население" => "тыс. чел.",
            "Среднемесячная номинальная ЗП" => "руб.",
            "Валовой региональный продукт" => "млн руб.",
            "ВРП на душу населения" => "тыс. руб.",
            _ => DEFAULT_UNIT,
        }
    }

    /// Whether values of this kind are money and can be price adjusted.
    pub const fn is_monetary(&self) -> bool {
        !matches!(self, Self::Population | Self::Custom(_))
    }

    /// Whether this kind is exempt from share-delta mode.
    pub const fn is_absolute_only(&self) -> bool {
        matches!(
            self,
            Self::Salary | Self::Gdp | Self::GdpPerCapita | Self::Population
        )
    }

    /// Production kinds that can be shown as a share of total volume.
    pub const fn supports_share_display(&self) -> bool {
        matches!(
            self,
            Self::MiningIndustry
                | Self::ManufacturingIndustry
                | Self::Agriculture
                | Self::Services
                | Self::WaterSupply
                | Self::EnergySupply
        )
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for IndicatorKind {
    fn from(s: &str) -> Self {
        Self::all()
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .unwrap_or_else(|| Self::Custom(s.to_string()))
    }
}

impl From<String> for IndicatorKind {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<IndicatorKind> for String {
    fn from(kind: IndicatorKind) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for IndicatorKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}
