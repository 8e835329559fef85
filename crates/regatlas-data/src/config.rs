//! Data configuration.
//!
//! Search order for the configuration file:
//! 1. An explicitly given path
//! 2. `regatlas.toml` in the working directory
//! 3. `regatlas/config.toml` in the platform config directory
//! 4. The embedded default

use crate::entity::EntitySet;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Years with published indicator tables.
pub const SUPPORTED_YEARS: [i32; 6] = [2000, 2005, 2010, 2015, 2020, 2023];

/// Preferred year for display and the CPI base year.
pub const DEFAULT_YEAR: i32 = 2023;

/// Default configuration embedded in the binary.
pub const DEFAULT_CONFIG: &str = r#"
data_dir = "data"
years = [2000, 2005, 2010, 2015, 2020, 2023]
"#;

/// Where input tables live and which years to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the indicator and CPI CSV files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Years to load, ascending.
    #[serde(default = "default_years")]
    pub years: Vec<i32>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_years() -> Vec<i32> {
    SUPPORTED_YEARS.to_vec()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            years: default_years(),
        }
    }
}

impl DataConfig {
    /// Create a configuration for a data directory with the supported years.
    pub fn with_data_dir<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML text. Years are sorted and deduplicated.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(contents)?;
        config.years.sort_unstable();
        config.years.dedup();
        Ok(config)
    }

    /// Read a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// The year shown by default: [`DEFAULT_YEAR`] when configured,
    /// otherwise the last configured year.
    pub fn default_year(&self) -> i32 {
        default_year_of(&self.years)
    }

    /// Path of the indicator table for a year and entity set.
    pub fn indicator_path(&self, year: i32, set: EntitySet) -> PathBuf {
        self.data_dir.join(set.indicator_file_name(year))
    }

    /// Path of the CPI table for an entity set.
    pub fn cpi_path(&self, set: EntitySet) -> PathBuf {
        self.data_dir.join(set.cpi_file_name())
    }
}

/// Pick the default year out of a list of years.
pub fn default_year_of(years: &[i32]) -> i32 {
    if years.contains(&DEFAULT_YEAR) {
        DEFAULT_YEAR
    } else {
        years.last().copied().unwrap_or(DEFAULT_YEAR)
    }
}

/// Platform-specific location of the configuration file.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("regatlas").join("config.toml"))
}

/// Load the configuration following the search order of this module.
pub fn load_config(explicit: Option<&Path>) -> Result<DataConfig> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        return DataConfig::from_file(path);
    }

    let local = PathBuf::from("regatlas.toml");
    if local.exists() {
        tracing::info!("Loading config from: {}", local.display());
        return DataConfig::from_file(&local);
    }

    if let Some(path) = default_config_path().filter(|p| p.exists()) {
        tracing::info!("Loading config from: {}", path.display());
        return DataConfig::from_file(&path);
    }

    tracing::info!("Using default embedded configuration");
    DataConfig::from_toml_str(DEFAULT_CONFIG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = DataConfig::from_toml_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, DataConfig::default());
        assert_eq!(config.default_year(), 2023);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = DataConfig::from_toml_str("years = [2020, 2010, 2020]").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.years, vec![2010, 2020]);
        assert_eq!(config.default_year(), 2020);
    }

    #[test]
    fn test_invalid_config() {
        assert!(DataConfig::from_toml_str("years = \"2020\"").is_err());
    }

    #[test]
    fn test_default_year_of() {
        assert_eq!(default_year_of(&[2000, 2023, 2024]), 2023);
        assert_eq!(default_year_of(&[2000, 2005]), 2005);
        assert_eq!(default_year_of(&[]), 2023);
    }

    #[test]
    fn test_paths() {
        let config = DataConfig::with_data_dir("/srv/atlas");
        assert_eq!(
            config.indicator_path(2015, EntitySet::Regions),
            PathBuf::from("/srv/atlas/regions_data_2015.csv")
        );
        assert_eq!(
            config.cpi_path(EntitySet::Districts),
            PathBuf::from("/srv/atlas/federal_cpi.csv")
        );
    }
}
