//! Fixed catalog of read-only analytics queries

use crate::config::DashboardConfig;
use crate::error::MarketError;
use crate::store::MarketStore;
use rusqlite::types::ValueRef;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyticsQuery {
    TotalCryptoRecords,
    TotalOilRecords,
    TotalStockRecords,
    CryptoDateRange,
    TopCryptosByMarketCap,
    HighestCryptoPrice,
    HighestOilPrice,
    HighestEquityClose,
}

/// Identifiers bound into the parameterized queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsParams {
    pub coin: String,
    pub ticker: String,
}

impl AnalyticsParams {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            coin: config.primary_coin.clone(),
            ticker: config.analytics_ticker.clone(),
        }
    }
}

impl Default for AnalyticsParams {
    fn default() -> Self {
        Self {
            coin: "bitcoin".to_string(),
            ticker: "^IXIC".to_string(),
        }
    }
}

impl AnalyticsQuery {
    pub fn all() -> [AnalyticsQuery; 8] {
        [
            AnalyticsQuery::TotalCryptoRecords,
            AnalyticsQuery::TotalOilRecords,
            AnalyticsQuery::TotalStockRecords,
            AnalyticsQuery::CryptoDateRange,
            AnalyticsQuery::TopCryptosByMarketCap,
            AnalyticsQuery::HighestCryptoPrice,
            AnalyticsQuery::HighestOilPrice,
            AnalyticsQuery::HighestEquityClose,
        ]
    }

    pub fn title(&self, params: &AnalyticsParams) -> String {
        match self {
            AnalyticsQuery::TotalCryptoRecords => "Total Crypto Records".to_string(),
            AnalyticsQuery::TotalOilRecords => "Total Oil Records".to_string(),
            AnalyticsQuery::TotalStockRecords => "Total Stock Records".to_string(),
            AnalyticsQuery::CryptoDateRange => "Crypto Date Range".to_string(),
            AnalyticsQuery::TopCryptosByMarketCap => "Top 3 Cryptos by Market Cap".to_string(),
            AnalyticsQuery::HighestCryptoPrice => format!("Highest {} Price", capitalize(&params.coin)),
            AnalyticsQuery::HighestOilPrice => "Highest Oil Price".to_string(),
            AnalyticsQuery::HighestEquityClose => format!("Highest {} Close", params.ticker),
        }
    }

    fn sql(&self) -> &'static str {
        match self {
            AnalyticsQuery::TotalCryptoRecords => "SELECT COUNT(*) AS total_records FROM crypto_prices",
            AnalyticsQuery::TotalOilRecords => "SELECT COUNT(*) AS total_records FROM oil_prices",
            AnalyticsQuery::TotalStockRecords => "SELECT COUNT(*) AS total_records FROM stock_prices",
            AnalyticsQuery::CryptoDateRange => {
                "SELECT MIN(date) AS first_date, MAX(date) AS last_date FROM crypto_prices"
            }
            AnalyticsQuery::TopCryptosByMarketCap => {
                "SELECT name, market_cap FROM cryptocurrencies ORDER BY market_cap DESC LIMIT 3"
            }
            AnalyticsQuery::HighestCryptoPrice => {
                "SELECT MAX(price_inr) AS highest_price_inr FROM crypto_prices WHERE coin_id = ?1"
            }
            AnalyticsQuery::HighestOilPrice => "SELECT MAX(price_usd) AS highest_price_usd FROM oil_prices",
            AnalyticsQuery::HighestEquityClose => {
                "SELECT MAX(close) AS highest_close FROM stock_prices WHERE ticker = ?1"
            }
        }
    }

    fn bound_param<'a>(&self, params: &'a AnalyticsParams) -> Option<&'a str> {
        match self {
            AnalyticsQuery::HighestCryptoPrice => Some(params.coin.as_str()),
            AnalyticsQuery::HighestEquityClose => Some(params.ticker.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for AnalyticsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title(&AnalyticsParams::default()))
    }
}

/// One cell of a query result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<ValueRef<'_>> for Cell {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Cell::Null,
            ValueRef::Integer(i) => Cell::Integer(i),
            ValueRef::Real(r) => Cell::Real(r),
            ValueRef::Text(bytes) => Cell::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => Cell::Text(format!("<{} bytes>", bytes.len())),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => f.write_str("—"),
            Cell::Integer(i) => write!(f, "{}", i),
            Cell::Real(r) => write!(f, "{:.2}", r),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// Column names and rows of one analytics result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Run one catalog query; identifiers are bound, never interpolated
pub fn run_query(
    store: &MarketStore,
    query: AnalyticsQuery,
    params: &AnalyticsParams,
) -> Result<QueryTable, MarketError> {
    let mut stmt = store.conn().prepare(query.sql())?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();

    let mut rows_out = Vec::new();
    let mut rows = match query.bound_param(params) {
        Some(id) => stmt.query([id])?,
        None => stmt.query([])?,
    };

    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(width);
        for i in 0..width {
            cells.push(Cell::from(row.get_ref(i)?));
        }
        rows_out.push(cells);
    }

    log::debug!("Ran analytics query '{}': {} rows", query.title(params), rows_out.len());

    Ok(QueryTable {
        columns,
        rows: rows_out,
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
