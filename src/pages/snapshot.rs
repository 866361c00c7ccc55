//! Market Snapshot: crypto backbone vs oil and two equity indices

use crate::error::MarketError;
use crate::market_core::{
    resolve_bounds, summarize, to_long, AlignedRow, CrossMarketAggregator, DateRange, LongRow, RangeInput,
    SeriesCatalog, SeriesKey,
};
use crate::store::MarketStore;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything the presentation layer needs for one snapshot render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub primary: String,
    pub bounds: DateRange,
    pub range: DateRange,
    pub series_names: Vec<String>,
    pub rows: Vec<AlignedRow>,
    pub long_rows: Vec<LongRow>,
    pub means: BTreeMap<String, f64>,
}

impl MarketSnapshot {
    /// Long rows of one series, in date order
    pub fn series(&self, name: &str) -> impl Iterator<Item = &LongRow> + '_ {
        let name = name.to_string();
        self.long_rows.iter().filter(move |r| r.series_name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SnapshotView {
    Ready(MarketSnapshot),
    /// Nothing to plot; `bounds` is `None` when the primary has no rows at all
    NoData {
        primary: String,
        bounds: Option<DateRange>,
        range: Option<DateRange>,
    },
}

impl SnapshotView {
    pub fn is_empty(&self) -> bool {
        matches!(self, SnapshotView::NoData { .. })
    }
}

/// Build the Market Snapshot for `primary` over the user's range input
///
/// Unknown primaries and inverted ranges are errors; a primary with no rows
/// or a window with no backbone observations is a `NoData` view.
pub fn build_snapshot(
    store: &MarketStore,
    aggregator: &CrossMarketAggregator,
    primary: &str,
    input: &RangeInput,
) -> Result<SnapshotView, MarketError> {
    SeriesCatalog::load(store)?.require_crypto(primary)?;

    let bounds = match resolve_bounds(store, &SeriesKey::Crypto(primary.to_string()).into()) {
        Ok(bounds) => bounds,
        Err(MarketError::EmptyRange(_)) => {
            return Ok(SnapshotView::NoData {
                primary: primary.to_string(),
                bounds: None,
                range: None,
            })
        }
        Err(e) => return Err(e),
    };

    let range = input.resolve(&bounds)?;
    let rows = aggregator.aggregate(store, primary, &range)?;

    if rows.is_empty() {
        log::warn!("No data available for {} in {}", primary, range);
        return Ok(SnapshotView::NoData {
            primary: primary.to_string(),
            bounds: Some(bounds),
            range: Some(range),
        });
    }

    let series_names = aggregator.series_names(primary);
    let means = summarize(&rows, &series_names);
    let long_rows = to_long(&rows, &series_names);

    log::info!(
        "📊 Snapshot {} {}: {} rows, {} long rows",
        primary,
        range,
        rows.len(),
        long_rows.len()
    );

    Ok(SnapshotView::Ready(MarketSnapshot {
        primary: primary.to_string(),
        bounds,
        range,
        series_names,
        rows,
        long_rows,
        means,
    }))
}
