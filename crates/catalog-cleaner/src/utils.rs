//! Shared utilities for the cleaning pipeline.
//!
//! Small helpers over polars `Series` used by several stages.

use polars::prelude::*;
use std::collections::BTreeMap;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is an integer type.
#[inline]
pub fn is_integer_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Check if a DataType is a floating point type.
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Return the series as a `String` series, casting when necessary.
pub fn as_string_series(series: &Series) -> PolarsResult<Series> {
    if series.dtype() == &DataType::String {
        Ok(series.clone())
    } else {
        series.cast(&DataType::String)
    }
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Parse an integer from text.
///
/// Accepts plain integers and floats without a fractional part
/// (`"2019"`, `" 2019 "`, `"2019.0"`). Anything else yields `None`.
pub fn parse_integer_string(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    trimmed.parse::<f64>().ok().and_then(float_to_integer)
}

/// Convert a float to an integer when it is integral and fits in `i64`.
pub fn float_to_integer(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Count occurrences of each non-null value, rendered as text.
pub fn count_string_values(series: &Series) -> PolarsResult<BTreeMap<String, usize>> {
    let str_series = as_string_series(&series.drop_nulls())?;
    let mut counts = BTreeMap::new();
    for val in str_series.str()?.into_iter().flatten() {
        *counts.entry(val.to_string()).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Calculate the mode (most frequent value) of a Series as text.
///
/// Ties are broken by taking the smallest value in ascending order, so
/// the result does not depend on hash iteration order.
pub fn string_mode(series: &Series) -> PolarsResult<Option<String>> {
    let counts = count_string_values(series)?;

    let mut best: Option<(String, usize)> = None;
    for (val, count) in counts {
        match &best {
            Some((_, best_count)) if count <= *best_count => {}
            _ => best = Some((val, count)),
        }
    }

    Ok(best.map(|(val, _)| val))
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a Series with a text value.
///
/// Non-string series are cast to `String` first.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let str_series = as_string_series(series)?;
    let filled: Vec<String> = str_series
        .str()?
        .into_iter()
        .map(|opt| opt.unwrap_or(fill_value).to_string())
        .collect();

    Ok(Series::new(series.name().clone(), filled))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_integer_dtype() {
        assert!(is_integer_dtype(&DataType::Int64));
        assert!(is_integer_dtype(&DataType::UInt16));
        assert!(!is_integer_dtype(&DataType::Float64));
        assert!(!is_integer_dtype(&DataType::String));
    }

    #[test]
    fn test_parse_integer_string() {
        assert_eq!(parse_integer_string("2019"), Some(2019));
        assert_eq!(parse_integer_string("  2019 "), Some(2019));
        assert_eq!(parse_integer_string("2019.0"), Some(2019));
        assert_eq!(parse_integer_string("2019.5"), None);
        assert_eq!(parse_integer_string("unknown"), None);
        assert_eq!(parse_integer_string(""), None);
    }

    #[test]
    fn test_parse_integer_string_out_of_range() {
        assert_eq!(parse_integer_string("1e30"), None);
        assert_eq!(parse_integer_string("-1e30"), None);
        assert_eq!(parse_integer_string("9223372036854775808"), None);
        assert_eq!(parse_integer_string("1e3"), Some(1000));
    }

    #[test]
    fn test_float_to_integer() {
        assert_eq!(float_to_integer(2021.0), Some(2021));
        assert_eq!(float_to_integer(2021.5), None);
        assert_eq!(float_to_integer(f64::NAN), None);
        assert_eq!(float_to_integer(f64::INFINITY), None);
        assert_eq!(float_to_integer(9.3e18), None);
        assert_eq!(float_to_integer(i64::MIN as f64), Some(i64::MIN));
    }

    #[test]
    fn test_string_mode() {
        let series = Series::new("rating".into(), &["TV-MA", "PG", "TV-MA", "R", "TV-MA"]);
        assert_eq!(string_mode(&series).unwrap(), Some("TV-MA".to_string()));
    }

    #[test]
    fn test_string_mode_ignores_nulls() {
        let series = Series::new("rating".into(), &[None, Some("PG"), None, None]);
        assert_eq!(string_mode(&series).unwrap(), Some("PG".to_string()));
    }

    #[test]
    fn test_string_mode_tie_takes_smallest_value() {
        let series = Series::new("rating".into(), &["TV-MA", "PG", "TV-MA", "PG", "R"]);
        assert_eq!(string_mode(&series).unwrap(), Some("PG".to_string()));
    }

    #[test]
    fn test_string_mode_all_null() {
        let series = Series::new("rating".into(), &[Option::<&str>::None, None]);
        assert_eq!(string_mode(&series).unwrap(), None);
    }

    #[test]
    fn test_fill_string_nulls() {
        let series = Series::new("director".into(), &[Some("Ava DuVernay"), None]);
        let filled = fill_string_nulls(&series, "Not Given").unwrap();

        assert_eq!(filled.null_count(), 0);
        assert_eq!(filled.str().unwrap().get(0), Some("Ava DuVernay"));
        assert_eq!(filled.str().unwrap().get(1), Some("Not Given"));
    }

    #[test]
    fn test_count_string_values() {
        let series = Series::new("type".into(), &[Some("Movie"), Some("TV Show"), None, Some("Movie")]);
        let counts = count_string_values(&series).unwrap();
        assert_eq!(counts.get("Movie"), Some(&2));
        assert_eq!(counts.get("TV Show"), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
