//! Wide → long reshaping for multi-series charts

use super::aggregator::MISSING_VALUE;
use super::types::{AlignedRow, LongRow};

/// Flatten aligned rows into `(date, series_name, value)` rows
///
/// Row order is the outer loop and `series_names` order the inner one, so
/// `output[i * k + j]` is `rows[i]` / `series_names[j]`.
pub fn to_long<S: AsRef<str>>(rows: &[AlignedRow], series_names: &[S]) -> Vec<LongRow> {
    let mut out = Vec::with_capacity(rows.len() * series_names.len());

    for row in rows {
        for name in series_names {
            let name = name.as_ref();
            out.push(LongRow {
                date: row.date,
                series_name: name.to_string(),
                value: row.get(name).unwrap_or(MISSING_VALUE),
            });
        }
    }

    out
}
