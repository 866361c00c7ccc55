//! Market Core - cross-market alignment over the price store
//!
//! # Architecture
//!
//! ```text
//! MarketStore
//!     ↓
//! resolve_bounds (MIN/MAX date per series) → RangeInput::resolve → DateRange
//!     ↓
//! fetch_series (backbone + companions, parameter-bound)
//!     ↓
//! CrossMarketAggregator (date join, missing → 0.0)
//!     ↓
//! summarize (rounded means) / to_long (date, series, value)
//! ```

pub mod aggregator;
pub mod analytics;
pub mod catalog;
pub mod numeric;
pub mod range;
pub mod reshape;
pub mod series;
pub mod summary;
pub mod types;

pub use aggregator::{CompanionSet, CrossMarketAggregator};
pub use analytics::{run_query, AnalyticsParams, AnalyticsQuery, Cell, QueryTable};
pub use catalog::SeriesCatalog;
pub use numeric::parse_numeric_or_default;
pub use range::{resolve_bounds, BoundsFilter, RangeInput};
pub use reshape::to_long;
pub use series::fetch_series;
pub use summary::summarize;
pub use types::{AlignedRow, DateRange, LongRow, MarketCategory, PricePoint, SeriesKey, DATE_FORMAT};
