//! Cross-market dashboard over a local SQLite price store.
//!
//! ```text
//! market_project.db → MarketStore (read-only handle)
//!     ↓
//! Range Resolver → DateRange
//!     ↓
//! CrossMarketAggregator (crypto backbone + commodity/equity companions)
//!     ↓
//! summarize / to_long
//!     ↓
//! pages → ui (ratatui) | export (JSON)
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod market_core;
pub mod pages;
pub mod state;
pub mod store;
pub mod ui;

pub use config::{ConfigError, DashboardConfig};
pub use error::MarketError;
pub use store::MarketStore;
