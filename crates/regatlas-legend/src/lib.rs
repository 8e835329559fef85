#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/regatlas/regatlas/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod breaks;
pub mod builder;
pub mod classes;
pub mod export;
pub mod format;
pub mod legend;
pub mod palette;

pub use breaks::{DeltaScale, delta_classes};
pub use builder::{Comparison, LegendBuilder, LegendRequest, LegendStrategy, no_data_legend};
pub use classes::quantile_classes;
pub use export::{ExportError, ExportFormat, Exporter, MapReport, ValueRecord, ValueTable};
pub use format::format_legend_number;
pub use legend::{Legend, LegendItem};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
