//! The two supported entity sets.

use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A set of territorial entities that indicator tables are keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitySet {
    /// Federal subjects (regions).
    Regions,

    /// Federal districts.
    Districts,
}

impl EntitySet {
    /// Returns both entity sets.
    pub const fn all() -> [Self; 2] {
        [Self::Regions, Self::Districts]
    }

    /// Name of the key column holding entity names.
    pub const fn key_column(&self) -> &'static str {
        match self {
            Self::Regions => "region",
            Self::Districts => "federal_district",
        }
    }

    /// File name of the per-year indicator table.
    pub fn indicator_file_name(&self, year: i32) -> String {
        match self {
            Self::Regions => format!("regions_data_{year}.csv"),
            Self::Districts => format!("federal_districts_data_{year}.csv"),
        }
    }

    /// File name of the CPI table.
    pub const fn cpi_file_name(&self) -> &'static str {
        match self {
            Self::Regions => "regional_cpi.csv",
            Self::Districts => "federal_cpi.csv",
        }
    }

    /// Short lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regions => "regions",
            Self::Districts => "districts",
        }
    }
}

impl fmt::Display for EntitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntitySet {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regions" | "region" => Ok(Self::Regions),
            "districts" | "district" | "federal_districts" | "federal_district" => {
                Ok(Self::Districts)
            }
            _ => Err(DataError::UnknownEntitySet(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_columns() {
        assert_eq!(EntitySet::Regions.key_column(), "region");
        assert_eq!(EntitySet::Districts.key_column(), "federal_district");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            EntitySet::Regions.indicator_file_name(2020),
            "regions_data_2020.csv"
        );
        assert_eq!(
            EntitySet::Districts.indicator_file_name(2005),
            "federal_districts_data_2005.csv"
        );
        assert_eq!(EntitySet::Districts.cpi_file_name(), "federal_cpi.csv");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("regions".parse::<EntitySet>().unwrap(), EntitySet::Regions);
        assert_eq!(
            "Districts".parse::<EntitySet>().unwrap(),
            EntitySet::Districts
        );
        assert!(matches!(
            "oblasts".parse::<EntitySet>(),
            Err(DataError::UnknownEntitySet(_))
        ));
    }
}
