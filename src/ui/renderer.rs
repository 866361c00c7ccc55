// Formatting and chart-data helpers shared by the page renderers

use {
    crate::market_core::{LongRow, PricePoint},
    chrono::{Datelike, NaiveDate},
    ratatui::style::Color,
};

const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::LightRed,
    Color::LightBlue,
];

/// Format a price for display
pub fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}

/// Metric caption for a series column, e.g. `Bitcoin Avg`
pub fn metric_label(series_name: &str) -> String {
    let mut chars = series_name.chars();
    match chars.next() {
        Some(first) => format!("{}{} Avg", first.to_uppercase(), chars.as_str()),
        None => "Avg".to_string(),
    }
}

pub fn series_color(index: usize) -> Color {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Chart x coordinate for a date
pub fn date_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// `(x, y)` points of one series from long-form rows
pub fn long_series_points(long_rows: &[LongRow], series_name: &str) -> Vec<(f64, f64)> {
    long_rows
        .iter()
        .filter(|r| r.series_name == series_name)
        .map(|r| (date_x(r.date), r.value))
        .collect()
}

pub fn price_points(points: &[PricePoint]) -> Vec<(f64, f64)> {
    points.iter().map(|p| (date_x(p.date), p.value)).collect()
}

/// Axis bounds covering every point, padded by 5%; never a zero-width span
pub fn axis_bounds<I>(values: I) -> [f64; 2]
where
    I: IntoIterator<Item = f64>,
{
    let (lo, hi) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }

    let padding = (hi - lo).abs() * 0.05;
    if padding == 0.0 {
        [lo - 1.0, hi + 1.0]
    } else {
        [lo - padding, hi + padding]
    }
}
