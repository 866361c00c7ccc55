//! Core value types shared by the market pipelines

use crate::error::MarketError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// ISO format used for bound parameters and stored dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identifier of the single commodity series
pub const COMMODITY_ID: &str = "oil";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCategory {
    Crypto,
    Commodity,
    Equity,
}

impl MarketCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketCategory::Crypto => "crypto",
            MarketCategory::Commodity => "commodity",
            MarketCategory::Equity => "equity",
        }
    }

    pub fn all() -> [MarketCategory; 3] {
        [
            MarketCategory::Crypto,
            MarketCategory::Commodity,
            MarketCategory::Equity,
        ]
    }
}

/// One series in the store, with the fixed query templates used to read it
///
/// Identifiers are always bound as `?1`; templates never embed user input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SeriesKey {
    Crypto(String),
    Commodity,
    Equity(String),
}

impl SeriesKey {
    pub fn id(&self) -> &str {
        match self {
            SeriesKey::Crypto(coin_id) => coin_id,
            SeriesKey::Commodity => COMMODITY_ID,
            SeriesKey::Equity(ticker) => ticker,
        }
    }

    pub fn category(&self) -> MarketCategory {
        match self {
            SeriesKey::Crypto(_) => MarketCategory::Crypto,
            SeriesKey::Commodity => MarketCategory::Commodity,
            SeriesKey::Equity(_) => MarketCategory::Equity,
        }
    }

    /// Value bound as `?1`, if the table holds more than one series
    pub(crate) fn key_param(&self) -> Option<&str> {
        match self {
            SeriesKey::Crypto(coin_id) => Some(coin_id),
            SeriesKey::Commodity => None,
            SeriesKey::Equity(ticker) => Some(ticker),
        }
    }

    /// `(date, value)` rows inside an inclusive range
    ///
    /// Only the `YYYY-MM-DD` prefix is compared, so `2024-01-03 00:00:00`
    /// falls inside a range ending on `2024-01-03`. Parameters: `[key,] start, end`.
    pub(crate) fn range_sql(&self) -> &'static str {
        match self {
            SeriesKey::Crypto(_) => {
                "SELECT date, price_inr FROM crypto_prices
                 WHERE coin_id = ?1 AND substr(date, 1, 10) BETWEEN ?2 AND ?3
                 ORDER BY date ASC"
            }
            SeriesKey::Commodity => {
                "SELECT date, price_usd FROM oil_prices
                 WHERE substr(date, 1, 10) BETWEEN ?1 AND ?2
                 ORDER BY date ASC"
            }
            SeriesKey::Equity(_) => {
                "SELECT date, close FROM stock_prices
                 WHERE ticker = ?1 AND substr(date, 1, 10) BETWEEN ?2 AND ?3
                 ORDER BY date ASC"
            }
        }
    }

    /// `(MIN(date), MAX(date))` for the series. Parameters: `[key]`.
    pub(crate) fn bounds_sql(&self) -> &'static str {
        match self {
            SeriesKey::Crypto(_) => {
                "SELECT MIN(date), MAX(date) FROM crypto_prices WHERE coin_id = ?1"
            }
            SeriesKey::Commodity => "SELECT MIN(date), MAX(date) FROM oil_prices",
            SeriesKey::Equity(_) => {
                "SELECT MIN(date), MAX(date) FROM stock_prices WHERE ticker = ?1"
            }
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category().as_str(), self.id())
    }
}

/// One observation of one series on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub series_id: String,
    pub date: NaiveDate,
    pub value: f64,
}

/// Inclusive date window with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, MarketError> {
        if start > end {
            return Err(MarketError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Overlap with `other`, or `None` when the windows are disjoint
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(DateRange { start, end })
    }

    /// Bound parameters in zero-padded ISO form
    pub(crate) fn sql_bounds(&self) -> (String, String) {
        (
            self.start.format(DATE_FORMAT).to_string(),
            self.end.format(DATE_FORMAT).to_string(),
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

/// One date of a wide (one column per series) result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub date: NaiveDate,
    pub values: BTreeMap<String, f64>,
}

impl AlignedRow {
    pub fn get(&self, series_name: &str) -> Option<f64> {
        self.values.get(series_name).copied()
    }
}

/// One (date, series) pair of a long-form result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRow {
    pub date: NaiveDate,
    pub series_name: String,
    pub value: f64,
}

/// Parse the leading `YYYY-MM-DD` of a stored date (`2024-01-01 00:00:00` is accepted)
pub fn parse_store_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let head = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(head, DATE_FORMAT).ok()
}
