//! Date bounds resolution and user range validation

use super::types::{parse_store_date, DateRange, SeriesKey};
use crate::error::MarketError;
use crate::store::MarketStore;
use chrono::NaiveDate;

/// Rows whose observed span is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundsFilter {
    Series(SeriesKey),
    /// Every coin in `crypto_prices`
    AllCrypto,
}

impl BoundsFilter {
    fn label(&self) -> String {
        match self {
            BoundsFilter::Series(key) => key.to_string(),
            BoundsFilter::AllCrypto => "crypto:*".to_string(),
        }
    }
}

impl From<SeriesKey> for BoundsFilter {
    fn from(key: SeriesKey) -> Self {
        BoundsFilter::Series(key)
    }
}

/// Minimum and maximum date present for `filter`
///
/// Returns `EmptyRange` when no rows match.
pub fn resolve_bounds(store: &MarketStore, filter: &BoundsFilter) -> Result<DateRange, MarketError> {
    let conn = store.conn();

    let (min_raw, max_raw): (Option<String>, Option<String>) = match filter {
        BoundsFilter::Series(key) => {
            let mut stmt = conn.prepare(key.bounds_sql())?;
            match key.key_param() {
                Some(id) => stmt.query_row([id], |row| Ok((row.get(0)?, row.get(1)?))),
                None => stmt.query_row([], |row| Ok((row.get(0)?, row.get(1)?))),
            }
        }
        BoundsFilter::AllCrypto => conn.query_row(
            "SELECT MIN(date), MAX(date) FROM crypto_prices",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        ),
    }?;

    let (Some(min_raw), Some(max_raw)) = (min_raw, max_raw) else {
        log::info!("No observations for {}", filter.label());
        return Err(MarketError::EmptyRange(filter.label()));
    };

    let start = parse_store_date(&min_raw).ok_or_else(|| MarketError::MalformedDate(min_raw.clone()))?;
    let end = parse_store_date(&max_raw).ok_or_else(|| MarketError::MalformedDate(max_raw.clone()))?;

    let bounds = DateRange::new(start, end)?;
    log::debug!("Resolved bounds for {}: {}", filter.label(), bounds);
    Ok(bounds)
}

/// Start/end as entered by the user; missing ends default to the bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeInput {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl RangeInput {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Validate against `bounds` and clamp to them
    ///
    /// `start > end` is rejected with `InvalidRange`. A window that does not
    /// overlap the bounds at all is returned as entered, so downstream
    /// queries come back empty instead of silently snapping to an edge.
    pub fn resolve(&self, bounds: &DateRange) -> Result<DateRange, MarketError> {
        let requested = DateRange::new(
            self.start.unwrap_or(bounds.start()),
            self.end.unwrap_or(bounds.end()),
        )?;

        match requested.intersect(bounds) {
            Some(clamped) => Ok(clamped),
            None => {
                log::info!("Requested range {} lies outside bounds {}", requested, bounds);
                Ok(requested)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::{insert_crypto, insert_oil, insert_stock, setup_test_db};
    use rusqlite::Connection;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_resolve_bounds_per_series() {
        let (_dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        insert_crypto(&conn, "bitcoin", "2024-01-03", 1.0);
        insert_crypto(&conn, "bitcoin", "2024-01-01", 1.0);
        insert_crypto(&conn, "ethereum", "2023-06-01", 1.0);
        insert_oil(&conn, "2024-02-01", 1.0);
        insert_stock(&conn, "^GSPC", "2024-03-01", 1.0);
        drop(conn);

        let store = MarketStore::open(&db_path).unwrap();

        let btc = resolve_bounds(&store, &SeriesKey::Crypto("bitcoin".into()).into()).unwrap();
        assert_eq!((btc.start(), btc.end()), (d(2024, 1, 1), d(2024, 1, 3)));

        let all = resolve_bounds(&store, &BoundsFilter::AllCrypto).unwrap();
        assert_eq!((all.start(), all.end()), (d(2023, 6, 1), d(2024, 1, 3)));

        let oil = resolve_bounds(&store, &SeriesKey::Commodity.into()).unwrap();
        assert_eq!(oil.start(), d(2024, 2, 1));

        let spx = resolve_bounds(&store, &SeriesKey::Equity("^GSPC".into()).into()).unwrap();
        assert_eq!(spx.end(), d(2024, 3, 1));
    }

    #[test]
    fn test_resolve_bounds_empty() {
        let (_dir, db_path) = setup_test_db();
        let store = MarketStore::open(&db_path).unwrap();

        let result = resolve_bounds(&store, &SeriesKey::Crypto("dogecoin".into()).into());
        assert!(matches!(result, Err(MarketError::EmptyRange(label)) if label == "crypto:dogecoin"));

        let result = resolve_bounds(&store, &BoundsFilter::AllCrypto);
        assert!(matches!(result, Err(MarketError::EmptyRange(_))));
    }

    #[test]
    fn test_resolve_bounds_malformed_date() {
        let (_dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        insert_oil(&conn, "not-a-date", 1.0);
        drop(conn);

        let store = MarketStore::open(&db_path).unwrap();
        let result = resolve_bounds(&store, &SeriesKey::Commodity.into());
        assert!(matches!(result, Err(MarketError::MalformedDate(_))));
    }

    #[test]
    fn test_range_input_defaults_to_bounds() {
        let bounds = DateRange::new(d(2024, 1, 1), d(2024, 12, 31)).unwrap();

        let full = RangeInput::default().resolve(&bounds).unwrap();
        assert_eq!(full, bounds);

        let partial = RangeInput::new(Some(d(2024, 6, 1)), None).resolve(&bounds).unwrap();
        assert_eq!((partial.start(), partial.end()), (d(2024, 6, 1), d(2024, 12, 31)));
    }

    #[test]
    fn test_range_input_clamps_overlap() {
        let bounds = DateRange::new(d(2024, 1, 1), d(2024, 12, 31)).unwrap();
        let clamped = RangeInput::new(Some(d(2023, 1, 1)), Some(d(2024, 3, 1)))
            .resolve(&bounds)
            .unwrap();
        assert_eq!((clamped.start(), clamped.end()), (d(2024, 1, 1), d(2024, 3, 1)));
    }

    #[test]
    fn test_range_input_rejects_inverted() {
        let bounds = DateRange::new(d(2024, 1, 1), d(2024, 12, 31)).unwrap();
        let result = RangeInput::new(Some(d(2024, 5, 1)), Some(d(2024, 4, 1))).resolve(&bounds);
        assert!(matches!(result, Err(MarketError::InvalidRange { .. })));
    }

    #[test]
    fn test_range_input_disjoint_passes_through() {
        let bounds = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let outside = RangeInput::new(Some(d(2030, 1, 1)), Some(d(2030, 2, 1)))
            .resolve(&bounds)
            .unwrap();
        assert_eq!(outside.start(), d(2030, 1, 1));
        assert_eq!(outside.end(), d(2030, 2, 1));
    }
}
