#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/regatlas/regatlas/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub use regatlas_data as data;
pub use regatlas_legend as legend;
pub use regatlas_metrics as metrics;

pub mod atlas;
pub mod error;
pub mod features;

pub use atlas::Atlas;
pub use error::{AtlasError, Result};
pub use features::MapQuery;

pub use regatlas_data::{Case, DataConfig, DataType, EntitySet, IndicatorKind, load_config};
pub use regatlas_legend::{ExportFormat, Exporter, Legend, LegendRequest};
pub use regatlas_metrics::{DeltaMode, DisplayMode, SectorClass};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
