//! Dashboard configuration from environment variables

use std::env;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Configuration for the dashboard and export binaries
///
/// Loaded from environment variables (after `.env`) with defaults matching
/// the market_project database layout.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Path to SQLite database file
    pub db_path: String,

    /// Crypto id used as the Market Snapshot backbone
    pub primary_coin: String,

    /// Column label for the commodity companion
    pub commodity_label: String,

    pub equity_primary_ticker: String,
    pub equity_primary_label: String,
    pub equity_secondary_ticker: String,
    pub equity_secondary_label: String,

    /// Ticker used by the "Highest close" analytics query
    pub analytics_ticker: String,

    pub rust_log: Option<String>,
}

impl DashboardConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `CROSSMARKET_DB_PATH` (default: market_project.db)
    /// - `PRIMARY_COIN` (default: bitcoin)
    /// - `COMMODITY_LABEL` (default: oil)
    /// - `EQUITY_PRIMARY_TICKER` / `EQUITY_PRIMARY_LABEL` (default: ^GSPC / sp500)
    /// - `EQUITY_SECONDARY_TICKER` / `EQUITY_SECONDARY_LABEL` (default: ^NSEI / nifty)
    /// - `ANALYTICS_TICKER` (default: ^IXIC)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str, default: &str| -> Result<String, ConfigError> {
            match lookup(key) {
                Some(raw) => {
                    let trimmed = raw.trim();
                    if trimmed.is_empty() {
                        Err(ConfigError::InvalidValue(format!("{} cannot be empty", key)))
                    } else {
                        Ok(trimmed.to_string())
                    }
                }
                None => Ok(default.to_string()),
            }
        };

        let config = Self {
            db_path: value("CROSSMARKET_DB_PATH", "market_project.db")?,
            primary_coin: value("PRIMARY_COIN", "bitcoin")?,
            commodity_label: value("COMMODITY_LABEL", "oil")?,
            equity_primary_ticker: value("EQUITY_PRIMARY_TICKER", "^GSPC")?,
            equity_primary_label: value("EQUITY_PRIMARY_LABEL", "sp500")?,
            equity_secondary_ticker: value("EQUITY_SECONDARY_TICKER", "^NSEI")?,
            equity_secondary_label: value("EQUITY_SECONDARY_LABEL", "nifty")?,
            analytics_ticker: value("ANALYTICS_TICKER", "^IXIC")?,
            rust_log: lookup("RUST_LOG"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Series labels must be distinct so every aligned row keeps four columns
    pub fn validate(&self) -> Result<(), ConfigError> {
        let labels = [
            self.primary_coin.as_str(),
            self.commodity_label.as_str(),
            self.equity_primary_label.as_str(),
            self.equity_secondary_label.as_str(),
        ];

        for (i, label) in labels.iter().enumerate() {
            if labels[i + 1..].contains(label) {
                return Err(ConfigError::InvalidValue(format!(
                    "duplicate series label: {}",
                    label
                )));
            }
        }

        Ok(())
    }
}
