//! Market Snapshot Binary - headless export
//!
//! Builds the Market Snapshot (aligned rows, long-form rows, means) for one
//! coin and date window, and prints it as JSON or writes it to a file.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin market_snapshot -- --coin bitcoin --start 2024-01-01 --end 2024-03-31
//! cargo run --release --bin market_snapshot -- --out snapshot.json
//! ```
//!
//! Missing `--start` / `--end` default to the coin's first and last dates.
//! `--coin` defaults to PRIMARY_COIN. Exit code is non-zero on invalid input.
//!
//! ## Environment Variables
//!
//! Same as the `dashboard` binary (CROSSMARKET_DB_PATH, PRIMARY_COIN, ...).

use chrono::NaiveDate;
use crossmarket::export::{save_snapshot, SnapshotExport};
use crossmarket::market_core::{CompanionSet, CrossMarketAggregator, RangeInput, DATE_FORMAT};
use crossmarket::pages::{build_snapshot, SnapshotView};
use crossmarket::{ConfigError, DashboardConfig, MarketStore};
use std::env;
use std::path::PathBuf;

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|x| x == flag)
        .and_then(|idx| args.get(idx + 1).cloned())
}

fn parse_date_arg(args: &[String], flag: &str) -> Result<Option<NaiveDate>, ConfigError> {
    match arg_value(args, flag) {
        Some(raw) => NaiveDate::parse_from_str(&raw, DATE_FORMAT)
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(format!("{} must be YYYY-MM-DD, got '{}'", flag, raw))),
        None => Ok(None),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = DashboardConfig::from_env()?;
    if let Some(db_path) = arg_value(&args, "--db") {
        config.db_path = db_path;
    }

    let coin = arg_value(&args, "--coin").unwrap_or_else(|| config.primary_coin.clone());
    let input = RangeInput::new(parse_date_arg(&args, "--start")?, parse_date_arg(&args, "--end")?);
    let out = arg_value(&args, "--out").map(PathBuf::from);

    log::info!("📊 Building market snapshot");
    log::info!("   Database: {}", config.db_path);
    log::info!("   Coin: {}", coin);

    let store = MarketStore::open(&config.db_path)?;
    let aggregator = CrossMarketAggregator::new(CompanionSet::from_config(&config));

    let view = match build_snapshot(&store, &aggregator, &coin, &input) {
        Ok(view) => view,
        Err(e) => {
            log::error!("❌ {}", e);
            return Err(store.close_after_error(e).into());
        }
    };

    if let SnapshotView::NoData { .. } = &view {
        log::warn!("⚠️  No data available for selected dates");
    }

    let export = SnapshotExport::new(&view, store.path());
    match &out {
        Some(path) => save_snapshot(&export, path)?,
        None => println!("{}", export.to_json()?),
    }

    store.close()?;
    Ok(())
}
