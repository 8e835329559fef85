#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/regatlas/regatlas/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod delta;
pub mod error;
pub mod layer;
pub mod price;
pub mod sector;
pub mod series;
pub mod share;
pub mod summary;

pub use delta::{
    DeltaMode, DeltaValues, DisplayMode, compute_delta, delta, delta_between, delta_on_shares,
    uses_share_delta,
};
pub use error::{InflationError, MetricsError, Result};
pub use layer::{LayerView, shows_shares};
pub use price::{BASE_YEAR, PriceAdjuster};
pub use sector::{DIVERSIFIED_THRESHOLD, Sector, SectorClass, dominant_sector};
pub use series::{SeriesPoint, entity_series, entity_share_series};
pub use share::relative_share;
pub use summary::{IndicatorSummary, RankedEntity, summarize, top_n};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
