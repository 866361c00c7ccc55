//! Lenient numeric reads from store cells

use rusqlite::types::ValueRef;

/// Convert a raw store cell to `f64`, falling back to `default`
///
/// Integers and reals convert directly; text is trimmed and parsed. Null,
/// blobs, unparseable text and non-finite results all yield `default`.
pub fn parse_numeric_or_default(raw: ValueRef<'_>, default: f64) -> f64 {
    let parsed = match raw {
        ValueRef::Integer(i) => Some(i as f64),
        ValueRef::Real(r) => Some(r),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    };

    match parsed {
        Some(value) if value.is_finite() => value,
        _ => default,
    }
}

/// Running count of cells that fell back to the default
///
/// Coercions are never reported one by one; callers log the total per query.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CoercionTally {
    pub coerced: usize,
}

impl CoercionTally {
    pub fn read(&mut self, raw: ValueRef<'_>) -> f64 {
        let value = parse_numeric_or_default(raw, f64::NAN);
        if value.is_nan() {
            self.coerced += 1;
            0.0
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_cells() {
        assert_eq!(parse_numeric_or_default(ValueRef::Integer(42), 0.0), 42.0);
        assert_eq!(parse_numeric_or_default(ValueRef::Real(70.25), 0.0), 70.25);
    }

    #[test]
    fn test_text_cells() {
        assert_eq!(parse_numeric_or_default(ValueRef::Text(b" 1234.5 "), 0.0), 1234.5);
        assert_eq!(parse_numeric_or_default(ValueRef::Text(b"1e3"), 0.0), 1000.0);
        assert_eq!(parse_numeric_or_default(ValueRef::Text(b"-3"), 0.0), -3.0);
        assert_eq!(parse_numeric_or_default(ValueRef::Text(b"n/a"), 0.0), 0.0);
        assert_eq!(parse_numeric_or_default(ValueRef::Text(b""), 0.0), 0.0);
        assert_eq!(parse_numeric_or_default(ValueRef::Text(&[0xff, 0xfe]), 0.0), 0.0);
    }

    #[test]
    fn test_missing_and_non_finite_cells() {
        assert_eq!(parse_numeric_or_default(ValueRef::Null, 0.0), 0.0);
        assert_eq!(parse_numeric_or_default(ValueRef::Blob(b"12"), 0.0), 0.0);
        assert_eq!(parse_numeric_or_default(ValueRef::Text(b"NaN"), 0.0), 0.0);
        assert_eq!(parse_numeric_or_default(ValueRef::Text(b"inf"), 0.0), 0.0);
        assert_eq!(parse_numeric_or_default(ValueRef::Real(f64::INFINITY), -1.0), -1.0);
    }

    #[test]
    fn test_custom_default() {
        assert_eq!(parse_numeric_or_default(ValueRef::Null, 7.5), 7.5);
    }

    #[test]
    fn test_tally_counts_coercions() {
        let mut tally = CoercionTally::default();
        assert_eq!(tally.read(ValueRef::Real(1.5)), 1.5);
        assert_eq!(tally.read(ValueRef::Text(b"bad")), 0.0);
        assert_eq!(tally.read(ValueRef::Null), 0.0);
        assert_eq!(tally.coerced, 2);
    }
}
