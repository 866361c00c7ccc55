//! Single-series reads

use super::numeric::CoercionTally;
use super::types::{parse_store_date, DateRange, PricePoint, SeriesKey};
use crate::error::MarketError;
use crate::store::MarketStore;
use rusqlite::{params_from_iter, ToSql};

/// Observations of one series inside `range`, ascending by date
///
/// Rows are matched on the exact identifier and on inclusive ISO-string
/// comparison of the date column. Rows whose date cannot be parsed are
/// skipped; unparseable values read as `0.0`. Returns an empty vector when
/// nothing matches.
pub fn fetch_series(
    store: &MarketStore,
    series: &SeriesKey,
    range: &DateRange,
) -> Result<Vec<PricePoint>, MarketError> {
    let (start, end) = range.sql_bounds();
    let key = series.key_param();

    let mut bound: Vec<&dyn ToSql> = Vec::with_capacity(3);
    if let Some(id) = &key {
        bound.push(id);
    }
    bound.push(&start);
    bound.push(&end);

    let mut stmt = store.conn().prepare(series.range_sql())?;
    let mut rows = stmt.query(params_from_iter(bound))?;

    let mut points = Vec::new();
    let mut tally = CoercionTally::default();
    let mut skipped = 0usize;

    while let Some(row) = rows.next()? {
        let date = row.get_ref(0)?.as_str().ok().and_then(parse_store_date);
        let Some(date) = date else {
            skipped += 1;
            continue;
        };

        points.push(PricePoint {
            series_id: series.id().to_string(),
            date,
            value: tally.read(row.get_ref(1)?),
        });
    }

    // Store order is not trusted
    points.sort_by_key(|p| p.date);

    if tally.coerced > 0 || skipped > 0 {
        log::debug!(
            "{}: {} values coerced to 0.0, {} rows with unreadable dates skipped",
            series,
            tally.coerced,
            skipped
        );
    }
    log::debug!("📥 Read {} observations for {} in {}", points.len(), series, range);

    Ok(points)
}
