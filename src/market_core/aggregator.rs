//! Cross-market alignment of a crypto backbone with companion series

use super::series::fetch_series;
use super::types::{AlignedRow, DateRange, PricePoint, SeriesKey};
use crate::config::DashboardConfig;
use crate::error::MarketError;
use crate::store::MarketStore;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// Value used for a companion with no observation on a backbone date
pub const MISSING_VALUE: f64 = 0.0;

/// Companion series joined onto the backbone, with their column labels
#[derive(Debug, Clone, PartialEq)]
pub struct CompanionSet {
    pub commodity_label: String,
    pub equities: [(String, String); 2],
}

impl CompanionSet {
    /// `[(label, ticker); 2]` for the two equity companions
    pub fn new(commodity_label: impl Into<String>, equities: [(String, String); 2]) -> Self {
        Self {
            commodity_label: commodity_label.into(),
            equities,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(
            config.commodity_label.clone(),
            [
                (
                    config.equity_primary_label.clone(),
                    config.equity_primary_ticker.clone(),
                ),
                (
                    config.equity_secondary_label.clone(),
                    config.equity_secondary_ticker.clone(),
                ),
            ],
        )
    }

    fn companions(&self) -> Vec<(&str, SeriesKey)> {
        let mut out = vec![(self.commodity_label.as_str(), SeriesKey::Commodity)];
        for (label, ticker) in &self.equities {
            out.push((label.as_str(), SeriesKey::Equity(ticker.clone())));
        }
        out
    }
}

impl Default for CompanionSet {
    /// oil, sp500 (^GSPC), nifty (^NSEI)
    fn default() -> Self {
        Self::new(
            "oil",
            [
                ("sp500".to_string(), "^GSPC".to_string()),
                ("nifty".to_string(), "^NSEI".to_string()),
            ],
        )
    }
}

/// Joins commodity and equity companions onto a crypto backbone by date
#[derive(Debug, Clone, Default)]
pub struct CrossMarketAggregator {
    companions: CompanionSet,
}

impl CrossMarketAggregator {
    pub fn new(companions: CompanionSet) -> Self {
        Self { companions }
    }

    pub fn companions(&self) -> &CompanionSet {
        &self.companions
    }

    /// Column order of every row produced for `primary_id`
    pub fn series_names(&self, primary_id: &str) -> Vec<String> {
        let mut names = vec![primary_id.to_string()];
        names.extend(
            self.companions
                .companions()
                .into_iter()
                .map(|(label, _)| label.to_string()),
        );
        names
    }

    /// One row per distinct backbone date in `range`, ascending
    ///
    /// Companions missing on a backbone date read as `0.0`. An empty backbone
    /// yields an empty vector; a range outside the data is not an error.
    /// A `primary_id` equal to a companion label is a `LabelConflict`.
    pub fn aggregate(
        &self,
        store: &MarketStore,
        primary_id: &str,
        range: &DateRange,
    ) -> Result<Vec<AlignedRow>, MarketError> {
        if self
            .companions
            .companions()
            .iter()
            .any(|(label, _)| *label == primary_id)
        {
            log::warn!("Rejected primary {}: same name as a companion column", primary_id);
            return Err(MarketError::LabelConflict(primary_id.to_string()));
        }

        let backbone = fetch_series(store, &SeriesKey::Crypto(primary_id.to_string()), range)?;
        if backbone.is_empty() {
            log::info!("No {} observations in {}", primary_id, range);
            return Ok(Vec::new());
        }

        let mut lookups: Vec<(&str, HashMap<NaiveDate, f64>)> = Vec::new();
        for (label, key) in self.companions.companions() {
            let points = fetch_series(store, &key, range)?;
            lookups.push((label, first_by_date(points)));
        }

        let mut rows: BTreeMap<NaiveDate, AlignedRow> = BTreeMap::new();
        for point in backbone {
            rows.entry(point.date).or_insert_with(|| {
                let mut values = BTreeMap::new();
                values.insert(primary_id.to_string(), point.value);
                for (label, lookup) in &lookups {
                    let value = lookup.get(&point.date).copied().unwrap_or(MISSING_VALUE);
                    values.insert(label.to_string(), value);
                }
                AlignedRow {
                    date: point.date,
                    values,
                }
            });
        }

        log::debug!(
            "Aligned {} rows for {} across {} companions",
            rows.len(),
            primary_id,
            lookups.len()
        );

        Ok(rows.into_values().collect())
    }
}

/// Date → value, keeping the first observation of each date
fn first_by_date(points: Vec<PricePoint>) -> HashMap<NaiveDate, f64> {
    let mut lookup = HashMap::with_capacity(points.len());
    for point in points {
        lookup.entry(point.date).or_insert(point.value);
    }
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_core::range::{resolve_bounds, RangeInput};
    use crate::store::fixtures::{insert_crypto, insert_oil, insert_stock, seed_bitcoin_scenario, setup_test_db};
    use rusqlite::Connection;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn scenario_store() -> (tempfile::TempDir, MarketStore) {
        let (dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        seed_bitcoin_scenario(&conn);
        drop(conn);
        let store = MarketStore::open(&db_path).unwrap();
        (dir, store)
    }

    #[test]
    fn test_series_names_order() {
        let aggregator = CrossMarketAggregator::default();
        assert_eq!(
            aggregator.series_names("bitcoin"),
            vec!["bitcoin", "oil", "sp500", "nifty"]
        );
    }

    #[test]
    fn test_oil_gap_filled_with_zero() {
        let (_dir, store) = scenario_store();
        let aggregator = CrossMarketAggregator::default();
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 3)).unwrap();

        let rows = aggregator.aggregate(&store, "bitcoin", &range).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].date, d(2024, 1, 2));
        assert_eq!(rows[1].get("bitcoin"), Some(200.0));
        assert_eq!(rows[1].get("oil"), Some(0.0));
        assert_eq!(rows[1].get("nifty"), Some(21000.0));
        assert_eq!(rows[0].get("oil"), Some(70.5));
        assert_eq!(rows[0].get("nifty"), Some(0.0));
    }

    #[test]
    fn test_every_row_has_same_columns() {
        let (_dir, store) = scenario_store();
        let aggregator = CrossMarketAggregator::default();
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 3)).unwrap();
        let names = aggregator.series_names("bitcoin");

        for row in aggregator.aggregate(&store, "bitcoin", &range).unwrap() {
            let keys: Vec<&String> = row.values.keys().collect();
            assert_eq!(keys.len(), 4);
            for name in &names {
                assert!(row.get(name).is_some(), "missing {} on {}", name, row.date);
            }
        }
    }

    #[test]
    fn test_range_outside_data_is_empty() {
        let (_dir, store) = scenario_store();
        let aggregator = CrossMarketAggregator::default();
        let range = DateRange::new(d(2030, 1, 1), d(2030, 12, 31)).unwrap();

        assert!(aggregator.aggregate(&store, "bitcoin", &range).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_backbone_dates_collapse() {
        let (_dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        insert_crypto(&conn, "bitcoin", "2024-01-02", 2.0);
        insert_crypto(&conn, "bitcoin", "2024-01-01", 1.0);
        insert_crypto(&conn, "bitcoin", "2024-01-01 00:00:00", 9.0);
        insert_oil(&conn, "2024-01-01", 50.0);
        insert_oil(&conn, "2024-01-01 00:00:00", 60.0);
        drop(conn);

        let store = MarketStore::open(&db_path).unwrap();
        let aggregator = CrossMarketAggregator::default();
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 2)).unwrap();
        let rows = aggregator.aggregate(&store, "bitcoin", &range).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, d(2024, 1, 1));
        assert_eq!(rows[0].get("bitcoin"), Some(1.0));
        assert_eq!(rows[0].get("oil"), Some(50.0));
        assert_eq!(rows[1].date, d(2024, 1, 2));
    }

    #[test]
    fn test_timestamped_dates_keep_last_day() {
        let (_dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        insert_crypto(&conn, "bitcoin", "2024-01-01 00:00:00", 100.0);
        insert_crypto(&conn, "bitcoin", "2024-01-02 00:00:00", 200.0);
        insert_crypto(&conn, "bitcoin", "2024-01-03 00:00:00", 300.0);
        insert_oil(&conn, "2024-01-03 00:00:00", 72.5);
        insert_stock(&conn, "^GSPC", "2024-01-03 00:00:00", 4720.0);
        drop(conn);

        let store = MarketStore::open(&db_path).unwrap();
        let bounds = resolve_bounds(&store, &SeriesKey::Crypto("bitcoin".into()).into()).unwrap();
        let range = RangeInput::default().resolve(&bounds).unwrap();
        let rows = CrossMarketAggregator::default()
            .aggregate(&store, "bitcoin", &range)
            .unwrap();

        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]);
        assert_eq!(rows[2].get("bitcoin"), Some(300.0));
        assert_eq!(rows[2].get("oil"), Some(72.5));
        assert_eq!(rows[2].get("sp500"), Some(4720.0));
    }

    #[test]
    fn test_custom_companions() {
        let (_dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        insert_crypto(&conn, "ethereum", "2024-01-01", 10.0);
        insert_stock(&conn, "^IXIC", "2024-01-01", 15000.0);
        drop(conn);

        let store = MarketStore::open(&db_path).unwrap();
        let aggregator = CrossMarketAggregator::new(CompanionSet::new(
            "brent",
            [
                ("nasdaq".to_string(), "^IXIC".to_string()),
                ("dow".to_string(), "^DJI".to_string()),
            ],
        ));
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 1)).unwrap();
        let rows = aggregator.aggregate(&store, "ethereum", &range).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("nasdaq"), Some(15000.0));
        assert_eq!(rows[0].get("dow"), Some(0.0));
        assert_eq!(rows[0].get("brent"), Some(0.0));
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let (_dir, store) = scenario_store();
        let aggregator = CrossMarketAggregator::default();
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 3)).unwrap();

        let first = aggregator.aggregate(&store, "bitcoin", &range).unwrap();
        let second = aggregator.aggregate(&store, "bitcoin", &range).unwrap();
        assert_eq!(first, second);
    }
}
