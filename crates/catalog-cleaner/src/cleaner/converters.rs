//! Type conversion functions for field standardization.

use crate::error::{CleaningError, Result};
use crate::utils::{
    as_string_series, float_to_integer, is_float_dtype, is_integer_dtype, parse_integer_string,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;

/// `num_days_from_ce()` of 1970-01-01, the epoch of polars `Date` values.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Date layouts accepted for `date_added`, tried in order.
const DATE_FORMATS: [&str; 7] = [
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%b-%y",
];

/// Date-time layouts accepted for `date_added`; the time part is discarded.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

/// Parse a catalog date such as `"September 25, 2021"` or `"2021-09-25"`.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

/// Convert a text series into a `Date` series.
///
/// Unparseable values become null. Series that already hold dates are
/// returned as `Date` without re-parsing.
pub(crate) fn string_to_date(series: &Series) -> Result<Series> {
    match series.dtype() {
        DataType::Date => return Ok(series.clone()),
        DataType::Datetime(_, _) => return Ok(series.cast(&DataType::Date)?),
        _ => {}
    }

    let str_series = as_string_series(series)?;
    let days: Vec<Option<i32>> = str_series
        .str()?
        .into_iter()
        .map(|opt| opt.and_then(parse_date).map(days_since_epoch))
        .collect();

    Ok(Series::new(series.name().clone(), days).cast(&DataType::Date)?)
}

/// Unit denoted by a `duration` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DurationUnit {
    Minutes,
    Seasons,
}

/// Classify a duration and read its leading count.
///
/// `"90 min"` yields minutes, `"3 Seasons"` / `"1 Season"` yield seasons,
/// anything else yields `None`. The count is the text before the first
/// space.
///
/// # Errors
///
/// [`CleaningError::Format`] when the unit is recognised but the leading
/// token is not an integer.
pub(crate) fn parse_duration(value: &str) -> Result<Option<(DurationUnit, i64)>> {
    let trimmed = value.trim();
    let unit = if trimmed.contains("min") {
        DurationUnit::Minutes
    } else if trimmed.contains("Season") {
        DurationUnit::Seasons
    } else {
        return Ok(None);
    };

    let token = trimmed.split(' ').next().unwrap_or_default();
    let count = token.parse::<i64>().map_err(|e| {
        CleaningError::format("duration", value, format!("leading token {:?}: {}", token, e))
    })?;

    Ok(Some((unit, count)))
}

/// Split a duration series into `(minutes, seasons)` Int64 series.
///
/// Each row populates at most one of the two.
pub(crate) fn duration_to_counts(
    series: &Series,
    minutes_name: &str,
    seasons_name: &str,
) -> Result<(Series, Series)> {
    let str_series = as_string_series(series)?;
    let len = str_series.len();
    let mut minutes: Vec<Option<i64>> = Vec::with_capacity(len);
    let mut seasons: Vec<Option<i64>> = Vec::with_capacity(len);

    for opt_val in str_series.str()?.into_iter() {
        let parsed = match opt_val {
            Some(val) => parse_duration(val)?,
            None => None,
        };
        match parsed {
            Some((DurationUnit::Minutes, n)) => {
                minutes.push(Some(n));
                seasons.push(None);
            }
            Some((DurationUnit::Seasons, n)) => {
                minutes.push(None);
                seasons.push(Some(n));
            }
            None => {
                minutes.push(None);
                seasons.push(None);
            }
        }
    }

    Ok((
        Series::new(minutes_name.into(), minutes),
        Series::new(seasons_name.into(), seasons),
    ))
}

/// Coerce a series to Int64, turning non-numeric values into nulls.
///
/// Floats with a fractional part are treated as non-numeric.
pub(crate) fn to_integer(series: &Series) -> Result<Series> {
    let dtype = series.dtype();

    if is_integer_dtype(dtype) {
        return Ok(series.cast(&DataType::Int64)?);
    }

    if is_float_dtype(dtype) {
        let floats = series.cast(&DataType::Float64)?;
        let values: Vec<Option<i64>> = floats
            .f64()?
            .into_iter()
            .map(|opt| opt.and_then(float_to_integer))
            .collect();
        return Ok(Series::new(series.name().clone(), values));
    }

    let str_series = as_string_series(series)?;
    let values: Vec<Option<i64>> = str_series
        .str()?
        .into_iter()
        .map(|opt| opt.and_then(parse_integer_string))
        .collect();

    Ok(Series::new(series.name().clone(), values))
}

/// Split comma-separated genres into a list series of trimmed names.
///
/// Empty pieces (from `"Dramas, "` or `",,"`) are dropped.
///
/// # Errors
///
/// [`CleaningError::Format`] for a null cell or one with no genre names,
/// such as `","`.
pub(crate) fn split_genres(series: &Series) -> Result<Series> {
    let str_series = as_string_series(series)?;
    let column = series.name().to_string();

    let mut lists: Vec<Option<Series>> = Vec::with_capacity(str_series.len());
    for opt_val in str_series.str()?.into_iter() {
        let val = opt_val
            .ok_or_else(|| CleaningError::format(column.as_str(), "null", "missing genre list"))?;
        let genres: Vec<&str> = val
            .split(',')
            .map(str::trim)
            .filter(|genre| !genre.is_empty())
            .collect();
        if genres.is_empty() {
            return Err(CleaningError::format(column.as_str(), val, "no genres"));
        }
        lists.push(Some(Series::new(PlSmallStr::EMPTY, genres)));
    }

    let list: ListChunked = lists.into_iter().collect();
    Ok(list.into_series().with_name(series.name().clone()))
}
