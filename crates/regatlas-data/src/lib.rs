#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/regatlas/regatlas/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod case;
pub mod catalog;
pub mod config;
pub mod cpi;
pub mod entity;
pub mod error;
pub mod indicator;
pub mod store;
pub mod table;
pub mod value;

pub use case::{Case, DEFAULT_CASE};
pub use catalog::{DataType, DataTypeInfo, IndicatorCatalog, IndicatorMetadata, short_label};
pub use config::{DEFAULT_YEAR, DataConfig, SUPPORTED_YEARS, load_config};
pub use cpi::{CpiTable, CpiTables};
pub use entity::EntitySet;
pub use error::{DataError, Result};
pub use indicator::IndicatorKind;
pub use store::IndicatorStore;
pub use table::{EntityValues, IndicatorTable};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
