use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Structural description of one column, as reported by the inspections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
    pub null_count: usize,
}

/// One entry of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

// ============================================================================
// Cleaning Summary Types
// ============================================================================

/// Statistics over the cleaned catalog, reported by the final inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Frequency of each `type` value; empty when the column is absent.
    pub type_counts: Vec<ValueCount>,
    /// Frequency of each `rating` value; empty when the column is absent.
    pub rating_counts: Vec<ValueCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_release_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_release_year: Option<i64>,
    /// Longest movie, only when any row has a minute duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration_minutes: Option<i64>,
    /// Longest show, only when any row has a season count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration_seasons: Option<i64>,
}

/// Record of what each cleaning stage did to the table.
///
/// Serializable so the CLI can emit it as JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Shape of the table straight after loading.
    pub rows_loaded: usize,
    pub columns_loaded: usize,

    pub dropped_missing_date_added: usize,
    /// Value used to fill missing ratings; `None` when there is no `rating` column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_fill_value: Option<String>,
    pub dropped_missing_duration: usize,
    pub duplicates_removed: usize,
    pub dropped_unparseable_date_added: usize,
    pub dropped_invalid_release_year: usize,

    /// Shape of the cleaned table.
    pub rows_final: usize,
    pub columns_final: usize,

    pub stats: CatalogStats,
}

impl CleaningSummary {
    /// Create a new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of rows removed by all stages.
    pub fn rows_removed(&self) -> usize {
        self.rows_loaded.saturating_sub(self.rows_final)
    }

    /// Percentage of loaded rows that were removed.
    pub fn rows_removed_percentage(&self) -> f32 {
        if self.rows_loaded == 0 {
            0.0
        } else {
            self.rows_removed() as f32 * 100.0 / self.rows_loaded as f32
        }
    }
}

/// The cleaned table together with the record of how it was produced.
#[derive(Debug, Clone)]
pub struct CleanedCatalog {
    pub data: DataFrame,
    pub summary: CleaningSummary,
}

impl CleanedCatalog {
    /// Consume the result, keeping only the table.
    pub fn into_data(self) -> DataFrame {
        self.data
    }
}
