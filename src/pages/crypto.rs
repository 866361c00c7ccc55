//! Crypto Analysis: one coin's price trend

use crate::error::MarketError;
use crate::market_core::{
    fetch_series, resolve_bounds, BoundsFilter, DateRange, PricePoint, RangeInput, SeriesCatalog, SeriesKey,
};
use crate::store::MarketStore;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CryptoAnalysis {
    pub coin: String,
    pub bounds: DateRange,
    pub range: DateRange,
    pub points: Vec<PricePoint>,
}

impl CryptoAnalysis {
    /// Chart title, e.g. `BITCOIN Price Trend`
    pub fn title(&self) -> String {
        format!("{} Price Trend", self.coin.to_uppercase())
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut values = self.points.iter().map(|p| p.value);
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CryptoView {
    Ready(CryptoAnalysis),
    NoData {
        coin: String,
        bounds: Option<DateRange>,
        range: Option<DateRange>,
    },
}

impl CryptoView {
    pub fn is_empty(&self) -> bool {
        matches!(self, CryptoView::NoData { .. })
    }
}

/// Build the Crypto Analysis view for `coin`
///
/// Default dates come from the span of the whole crypto table, so every coin
/// shares the same picker limits.
pub fn build_crypto_analysis(
    store: &MarketStore,
    coin: &str,
    input: &RangeInput,
) -> Result<CryptoView, MarketError> {
    SeriesCatalog::load(store)?.require_crypto(coin)?;

    let bounds = match resolve_bounds(store, &BoundsFilter::AllCrypto) {
        Ok(bounds) => bounds,
        Err(MarketError::EmptyRange(_)) => {
            return Ok(CryptoView::NoData {
                coin: coin.to_string(),
                bounds: None,
                range: None,
            })
        }
        Err(e) => return Err(e),
    };

    let range = input.resolve(&bounds)?;
    let points = fetch_series(store, &SeriesKey::Crypto(coin.to_string()), &range)?;

    if points.is_empty() {
        log::warn!("No data available for {} in {}", coin, range);
        return Ok(CryptoView::NoData {
            coin: coin.to_string(),
            bounds: Some(bounds),
            range: Some(range),
        });
    }

    log::info!("🪙 Crypto analysis {} {}: {} points", coin, range, points.len());

    Ok(CryptoView::Ready(CryptoAnalysis {
        coin: coin.to_string(),
        bounds,
        range,
        points,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::{insert_crypto, setup_test_db};
    use chrono::NaiveDate;
    use rusqlite::Connection;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn two_coin_store() -> (tempfile::TempDir, MarketStore) {
        let (dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        insert_crypto(&conn, "bitcoin", "2024-01-01", 100.0);
        insert_crypto(&conn, "bitcoin", "2024-01-02", "bad");
        insert_crypto(&conn, "bitcoin", "2024-01-03", 300.0);
        insert_crypto(&conn, "ethereum", "2023-12-01", 20.0);
        drop(conn);
        (dir, MarketStore::open(&db_path).unwrap())
    }

    #[test]
    fn test_bounds_span_all_coins() {
        let (_dir, store) = two_coin_store();
        let view = build_crypto_analysis(&store, "bitcoin", &RangeInput::default()).unwrap();

        let CryptoView::Ready(analysis) = view else {
            panic!("expected data");
        };
        assert_eq!(analysis.bounds.start(), d(2023, 12, 1));
        assert_eq!(analysis.bounds.end(), d(2024, 1, 3));
        assert_eq!(analysis.title(), "BITCOIN Price Trend");

        let values: Vec<f64> = analysis.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![100.0, 0.0, 300.0]);
        assert_eq!(analysis.min_max(), Some((0.0, 300.0)));
    }

    #[test]
    fn test_window_before_coin_listed() {
        let (_dir, store) = two_coin_store();
        let input = RangeInput::new(Some(d(2023, 12, 1)), Some(d(2023, 12, 31)));
        let view = build_crypto_analysis(&store, "bitcoin", &input).unwrap();

        assert!(view.is_empty());
    }

    #[test]
    fn test_unknown_coin() {
        let (_dir, store) = two_coin_store();
        let result = build_crypto_analysis(&store, "dogecoin", &RangeInput::default());
        assert!(matches!(result, Err(MarketError::UnknownSeries(_))));
    }
}
