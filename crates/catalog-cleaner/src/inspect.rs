//! Read-only inspections over a catalog table.
//!
//! These helpers never mutate the frame. The pipeline renders their output
//! into diagnostics at the initial, post-fill and final inspection points.

use crate::error::Result;
use crate::types::{CatalogStats, ColumnInfo, ValueCount};
use crate::utils::count_string_values;
use polars::prelude::*;

/// Describe every column: name, dtype, non-null and null counts.
pub fn column_info(df: &DataFrame) -> Vec<ColumnInfo> {
    let height = df.height();
    df.get_columns()
        .iter()
        .map(|col| {
            let null_count = col.null_count();
            ColumnInfo {
                name: col.name().to_string(),
                dtype: col.dtype().to_string(),
                non_null: height - null_count,
                null_count,
            }
        })
        .collect()
}

/// Null count per column, in column order.
pub fn null_counts(df: &DataFrame) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .map(|col| (col.name().to_string(), col.null_count()))
        .collect()
}

/// Frequency table for a column, most frequent first.
///
/// Equal counts are ordered by ascending value. Returns `None` when the
/// column does not exist.
pub fn value_counts(df: &DataFrame, column: &str) -> Result<Option<Vec<ValueCount>>> {
    let Ok(col) = df.column(column) else {
        return Ok(None);
    };

    let mut counts: Vec<ValueCount> = count_string_values(col.as_materialized_series())?
        .into_iter()
        .map(|(value, count)| ValueCount { value, count })
        .collect();
    // stable sort keeps the ascending value order from the BTreeMap for ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));

    Ok(Some(counts))
}

/// Minimum and maximum of an integer column, ignoring nulls.
///
/// Returns `None` when the column is absent or has no non-null values.
pub fn int_range(df: &DataFrame, column: &str) -> Result<Option<(i64, i64)>> {
    let Ok(col) = df.column(column) else {
        return Ok(None);
    };
    let values = col.as_materialized_series().cast(&DataType::Int64)?;
    let ca = values.i64()?;
    Ok(ca.min().zip(ca.max()))
}

/// Maximum of an integer column, `None` if absent or entirely null.
pub fn int_max(df: &DataFrame, column: &str) -> Result<Option<i64>> {
    Ok(int_range(df, column)?.map(|(_, max)| max))
}

impl CatalogStats {
    /// Gather the final-inspection statistics from a cleaned table.
    pub fn collect(df: &DataFrame) -> Result<Self> {
        let release_range = int_range(df, "release_year")?;
        Ok(Self {
            type_counts: value_counts(df, "type")?.unwrap_or_default(),
            rating_counts: value_counts(df, "rating")?.unwrap_or_default(),
            min_release_year: release_range.map(|(min, _)| min),
            max_release_year: release_range.map(|(_, max)| max),
            max_duration_minutes: int_max(df, "duration_minutes")?,
            max_duration_seasons: int_max(df, "duration_seasons")?,
        })
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Truncate a string to max length with ellipsis.
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

/// Render column descriptions as an aligned table.
pub fn render_column_info(columns: &[ColumnInfo]) -> String {
    let mut lines = vec![
        format!("{:<24} {:<14} {:>10}", "Column", "Dtype", "Non-Null"),
        "-".repeat(50),
    ];
    for col in columns {
        lines.push(format!(
            "{:<24} {:<14} {:>10}",
            truncate_str(&col.name, 23),
            truncate_str(&col.dtype, 13),
            col.non_null
        ));
    }
    lines.join("\n")
}

/// Render null counts as `name  count` lines.
pub fn render_null_counts(counts: &[(String, usize)]) -> String {
    counts
        .iter()
        .map(|(name, count)| format!("{:<24} {:>8}", truncate_str(name, 23), count))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a frequency table as `value  count` lines.
pub fn render_value_counts(counts: &[ValueCount]) -> String {
    counts
        .iter()
        .map(|vc| format!("{:<24} {:>8}", truncate_str(&vc.value, 23), vc.count))
        .collect::<Vec<_>>()
        .join("\n")
}
