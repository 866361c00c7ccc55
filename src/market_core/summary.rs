//! Per-series means over a selected window

use super::aggregator::MISSING_VALUE;
use super::types::AlignedRow;
use std::collections::BTreeMap;

/// Arithmetic mean of each named series, rounded to two decimals
///
/// Every name maps to `0.0` when `rows` is empty.
pub fn summarize<S: AsRef<str>>(rows: &[AlignedRow], series_names: &[S]) -> BTreeMap<String, f64> {
    series_names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let mean = if rows.is_empty() {
                0.0
            } else {
                let sum: f64 = rows
                    .iter()
                    .map(|row| row.get(name).unwrap_or(MISSING_VALUE))
                    .sum();
                sum / rows.len() as f64
            };
            (name.to_string(), round2(mean))
        })
        .collect()
}

/// Round half away from zero to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(day: u32, values: &[(&str, f64)]) -> AlignedRow {
        AlignedRow {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            values: values.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn test_empty_rows_are_all_zero() {
        let summary = summarize(&[], &["bitcoin", "oil", "sp500", "nifty"]);
        assert_eq!(summary.len(), 4);
        assert!(summary.values().all(|v| *v == 0.0));
        assert!(!summary.values().any(|v| v.is_nan()));
    }

    #[test]
    fn test_plain_mean() {
        let rows = vec![
            row(1, &[("bitcoin", 100.0), ("oil", 70.5)]),
            row(2, &[("bitcoin", 200.0), ("oil", 0.0)]),
            row(3, &[("bitcoin", 300.0), ("oil", 72.5)]),
        ];
        let summary = summarize(&rows, &["bitcoin", "oil"]);

        assert_eq!(summary["bitcoin"], 200.0);
        // (70.5 + 0 + 72.5) / 3 = 47.666..
        assert_eq!(summary["oil"], 47.67);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_1), 1.24);
        assert_eq!(round2(-2.5), -2.5);
        assert_eq!(round2(0.0), 0.0);
    }
}
