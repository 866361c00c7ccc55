//! Test databases for store-backed unit tests

use rusqlite::{params, Connection, ToSql};
use std::path::PathBuf;
use tempfile::TempDir;

/// Create an empty database with the market_project schema
///
/// Value columns are declared without a type so tests can store text that
/// fails numeric parsing.
pub fn setup_test_db() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("market_project.db");

    let conn = Connection::open(&db_path).unwrap();
    conn.execute_batch(
        "CREATE TABLE crypto_prices (coin_id TEXT NOT NULL, date TEXT NOT NULL, price_inr);
         CREATE TABLE oil_prices (date TEXT NOT NULL, price_usd);
         CREATE TABLE stock_prices (ticker TEXT NOT NULL, date TEXT NOT NULL, close);
         CREATE TABLE cryptocurrencies (id TEXT, name TEXT NOT NULL, market_cap REAL);",
    )
    .unwrap();

    (dir, db_path)
}

pub fn insert_crypto(conn: &Connection, coin_id: &str, date: &str, price: impl ToSql) {
    conn.execute(
        "INSERT INTO crypto_prices (coin_id, date, price_inr) VALUES (?1, ?2, ?3)",
        params![coin_id, date, price],
    )
    .unwrap();
}

pub fn insert_oil(conn: &Connection, date: &str, price: impl ToSql) {
    conn.execute(
        "INSERT INTO oil_prices (date, price_usd) VALUES (?1, ?2)",
        params![date, price],
    )
    .unwrap();
}

pub fn insert_stock(conn: &Connection, ticker: &str, date: &str, close: impl ToSql) {
    conn.execute(
        "INSERT INTO stock_prices (ticker, date, close) VALUES (?1, ?2, ?3)",
        params![ticker, date, close],
    )
    .unwrap();
}

pub fn insert_cryptocurrency(conn: &Connection, name: &str, market_cap: f64) {
    conn.execute(
        "INSERT INTO cryptocurrencies (id, name, market_cap) VALUES (lower(?1), ?1, ?2)",
        params![name, market_cap],
    )
    .unwrap();
}

/// Three bitcoin days with an oil gap on 2024-01-02
pub fn seed_bitcoin_scenario(conn: &Connection) {
    insert_crypto(conn, "bitcoin", "2024-01-01", 100.0);
    insert_crypto(conn, "bitcoin", "2024-01-02", 200.0);
    insert_crypto(conn, "bitcoin", "2024-01-03", 300.0);

    insert_oil(conn, "2024-01-01", 70.5);
    insert_oil(conn, "2024-01-03", 72.5);

    insert_stock(conn, "^GSPC", "2024-01-01", 4700.0);
    insert_stock(conn, "^GSPC", "2024-01-02", 4710.0);
    insert_stock(conn, "^GSPC", "2024-01-03", 4720.0);
    insert_stock(conn, "^NSEI", "2024-01-02", 21000.0);
}
