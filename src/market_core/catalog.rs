//! Known series identifiers grouped by market

use super::types::{MarketCategory, COMMODITY_ID};
use crate::error::MarketError;
use crate::store::MarketStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesCatalog {
    pub crypto: Vec<String>,
    pub commodity: Vec<String>,
    pub equity: Vec<String>,
}

impl SeriesCatalog {
    /// Distinct coin ids and tickers present in the store, ascending
    pub fn load(store: &MarketStore) -> Result<Self, MarketError> {
        let crypto = distinct_ids(
            store,
            "SELECT DISTINCT coin_id FROM crypto_prices WHERE coin_id IS NOT NULL ORDER BY coin_id",
        )?;
        let equity = distinct_ids(
            store,
            "SELECT DISTINCT ticker FROM stock_prices WHERE ticker IS NOT NULL ORDER BY ticker",
        )?;

        log::debug!(
            "Catalog loaded: {} coins, {} tickers",
            crypto.len(),
            equity.len()
        );

        Ok(Self {
            crypto,
            commodity: vec![COMMODITY_ID.to_string()],
            equity,
        })
    }

    pub fn ids(&self, category: MarketCategory) -> &[String] {
        match category {
            MarketCategory::Crypto => &self.crypto,
            MarketCategory::Commodity => &self.commodity,
            MarketCategory::Equity => &self.equity,
        }
    }

    pub fn contains(&self, category: MarketCategory, id: &str) -> bool {
        self.ids(category).iter().any(|known| known == id)
    }

    /// Reject crypto ids the store has never seen
    pub fn require_crypto(&self, id: &str) -> Result<(), MarketError> {
        if self.contains(MarketCategory::Crypto, id) {
            Ok(())
        } else {
            log::warn!("Rejected unknown crypto id: {}", id);
            Err(MarketError::UnknownSeries(id.to_string()))
        }
    }
}

fn distinct_ids(store: &MarketStore, sql: &str) -> Result<Vec<String>, MarketError> {
    let mut stmt = store.conn().prepare(sql)?;
    let ids = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids)
}
