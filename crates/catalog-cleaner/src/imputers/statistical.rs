//! Statistical imputation methods.
//!
//! Provides constant and mode imputation for text columns.

use crate::error::{CleaningError, Result};
use crate::utils::{fill_string_nulls, string_mode};
use polars::prelude::*;
use tracing::debug;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Replace nulls in `column` with a constant text value.
    ///
    /// Returns the number of cells filled.
    ///
    /// # Errors
    ///
    /// [`CleaningError::ColumnNotFound`] if the column is absent.
    pub fn apply_constant_imputation(
        df: &mut DataFrame,
        column: &str,
        fill_value: &str,
    ) -> Result<usize> {
        let series = df
            .column(column)
            .map_err(|_| CleaningError::ColumnNotFound(column.to_string()))?
            .as_materialized_series()
            .clone();

        let missing = series.null_count();
        let filled = fill_string_nulls(&series, fill_value)?;
        df.replace(column, filled)?;

        debug!("Filled {} missing '{}' values with '{}'", missing, column, fill_value);
        Ok(missing)
    }

    /// Replace nulls in `column` with its most frequent value.
    ///
    /// Returns the fill value, or `None` if the column does not exist (in
    /// which case the frame is left untouched). Ties between equally
    /// frequent values go to the smallest value in ascending order.
    ///
    /// # Errors
    ///
    /// [`CleaningError::NoValidValues`] if the column exists but holds no
    /// non-null values.
    pub fn apply_mode_imputation(df: &mut DataFrame, column: &str) -> Result<Option<String>> {
        let Ok(col) = df.column(column) else {
            return Ok(None);
        };
        let series = col.as_materialized_series().clone();

        let mode_val =
            string_mode(&series)?.ok_or_else(|| CleaningError::NoValidValues(column.to_string()))?;

        let filled = fill_string_nulls(&series, &mode_val)?;
        df.replace(column, filled)?;

        debug!("Filled '{}' with mode: '{}'", column, mode_val);
        Ok(Some(mode_val))
    }
}
