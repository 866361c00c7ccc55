//! Dashboard Binary - Cross Market Intelligence TUI
//!
//! Four pages over the local price store: Home, Market Snapshot,
//! SQL Analytics and Crypto Analysis.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin dashboard
//! cargo run --release --bin dashboard -- --db data/market_project.db
//! ```
//!
//! ## Environment Variables
//!
//! - CROSSMARKET_DB_PATH - SQLite database path (default: market_project.db)
//! - PRIMARY_COIN - Market Snapshot backbone coin (default: bitcoin)
//! - COMMODITY_LABEL - Column label for oil (default: oil)
//! - EQUITY_PRIMARY_TICKER / EQUITY_PRIMARY_LABEL (default: ^GSPC / sp500)
//! - EQUITY_SECONDARY_TICKER / EQUITY_SECONDARY_LABEL (default: ^NSEI / nifty)
//! - ANALYTICS_TICKER - Ticker for the highest-close query (default: ^IXIC)
//! - RUST_LOG - Logging level (optional, default: info)

use crossmarket::state::DashboardState;
use crossmarket::ui::run_ui;
use crossmarket::{DashboardConfig, MarketStore};
use std::env;

fn parse_db_from_args() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|x| x == "--db")
        .and_then(|idx| args.get(idx + 1).cloned())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let mut config = DashboardConfig::from_env()?;
    if let Some(db_path) = parse_db_from_args() {
        config.db_path = db_path;
    }

    log::info!("🚀 Starting Cross Market Intelligence Dashboard");
    log::info!("   Database: {}", config.db_path);
    log::info!("   Snapshot backbone: {}", config.primary_coin);
    log::info!(
        "   Companions: {} | {} ({}) | {} ({})",
        config.commodity_label,
        config.equity_primary_label,
        config.equity_primary_ticker,
        config.equity_secondary_label,
        config.equity_secondary_ticker
    );

    let store = MarketStore::open(&config.db_path)?;

    let result = {
        let mut state = DashboardState::new(&store, &config)?;
        run_ui(&mut state)
    };

    if let Err(e) = result {
        log::error!("❌ Dashboard stopped: {}", e);
        return Err(store.close_after_error(e).into());
    }

    store.close()?;
    Ok(())
}
