//! Data cleaning module for catalog tables.
//!
//! This module provides functionality for:
//! - Dropping rows with nulls in a given column
//! - Removing exact duplicate rows
//! - Standardizing `date_added`, `duration`, `release_year` and `listed_in`

mod converters;

use crate::error::{CleaningError, Result};
use converters::{duration_to_counts, split_genres, string_to_date, to_integer};
use polars::prelude::*;
use tracing::debug;

pub const DURATION_MINUTES: &str = "duration_minutes";
pub const DURATION_SEASONS: &str = "duration_seasons";

/// Stateless cleaning operations over a catalog DataFrame.
///
/// Every operation takes the frame by value and returns the new frame
/// along with how many rows it removed, where that applies.
pub struct DataCleaner;

impl DataCleaner {
    /// Look up a column the pipeline cannot do without.
    pub fn require_column<'a>(df: &'a DataFrame, column: &str) -> Result<&'a Column> {
        df.column(column)
            .map_err(|_| CleaningError::ColumnNotFound(column.to_string()))
    }

    /// Drop every row whose `column` is null.
    pub fn drop_null_rows(df: DataFrame, column: &str) -> Result<(DataFrame, usize)> {
        let mask = Self::require_column(&df, column)?.is_not_null();
        let before = df.height();
        let df = df.filter(&mask)?;
        let removed = before - df.height();

        debug!("Dropped {} rows with null '{}'", removed, column);
        Ok((df, removed))
    }

    /// Remove rows that exactly repeat an earlier row.
    ///
    /// Nulls compare equal to each other. The first occurrence is kept and
    /// the surviving rows keep their original order.
    pub fn remove_duplicates(df: DataFrame) -> Result<(DataFrame, usize)> {
        let before = df.height();
        let df = df
            .lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?;
        let removed = before - df.height();

        debug!("Removed {} duplicate rows", removed);
        Ok((df, removed))
    }

    /// Parse `date_added` into a `Date` column and drop rows that failed to parse.
    pub fn normalize_date_added(mut df: DataFrame) -> Result<(DataFrame, usize)> {
        let parsed = string_to_date(
            Self::require_column(&df, "date_added")?.as_materialized_series(),
        )?;
        df.replace("date_added", parsed)?;
        Self::drop_null_rows(df, "date_added")
    }

    /// Add `duration_minutes` and `duration_seasons` derived from `duration`.
    ///
    /// Existing columns with those names are overwritten.
    pub fn derive_duration_columns(mut df: DataFrame) -> Result<DataFrame> {
        let (minutes, seasons) = duration_to_counts(
            Self::require_column(&df, "duration")?.as_materialized_series(),
            DURATION_MINUTES,
            DURATION_SEASONS,
        )?;
        df.with_column(minutes)?;
        df.with_column(seasons)?;
        Ok(df)
    }

    /// Coerce `release_year` to Int64 and drop rows where that failed.
    pub fn normalize_release_year(mut df: DataFrame) -> Result<(DataFrame, usize)> {
        let years = to_integer(Self::require_column(&df, "release_year")?.as_materialized_series())?;
        df.replace("release_year", years)?;
        Self::drop_null_rows(df, "release_year")
    }

    /// Replace `listed_in` text with a list of trimmed genre names.
    pub fn normalize_listed_in(mut df: DataFrame) -> Result<DataFrame> {
        let genres = split_genres(Self::require_column(&df, "listed_in")?.as_materialized_series())?;
        df.replace("listed_in", genres)?;
        Ok(df)
    }
}
