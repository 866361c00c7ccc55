//! Read-only handle to the market price store
//!
//! Tables read (never written):
//! - `crypto_prices(coin_id, date, price_inr)`
//! - `oil_prices(date, price_usd)`
//! - `stock_prices(ticker, date, close)`
//! - `cryptocurrencies(name, market_cap)`
//!
//! One handle is opened at process start and borrowed by every query.

#[cfg(test)]
pub(crate) mod fixtures;

use crate::error::MarketError;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

pub struct MarketStore {
    conn: Connection,
    path: PathBuf,
}

impl MarketStore {
    /// Open an existing database in read-only mode
    ///
    /// Fails if the file does not exist; the store is never created here.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, MarketError> {
        let path = db_path.as_ref().to_path_buf();
        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.pragma_update(None, "query_only", true)?;

        log::info!("📂 Market store opened (read-only): {}", path.display());

        Ok(Self { conn, path })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the underlying connection, surfacing any close error
    pub fn close(self) -> Result<(), MarketError> {
        let path = self.path;
        self.conn.close().map_err(|(_, err)| MarketError::Database(err))?;
        log::info!("📂 Market store closed: {}", path.display());
        Ok(())
    }

    /// Close on a failed request, handing back `err` unchanged
    ///
    /// A close failure here is only logged.
    pub fn close_after_error(self, err: MarketError) -> MarketError {
        if let Err(close_err) = self.close() {
            log::warn!("Failed to close market store: {}", close_err);
        }
        err
    }
}
