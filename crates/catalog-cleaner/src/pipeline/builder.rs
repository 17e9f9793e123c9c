//! Main cleaning pipeline module.
//!
//! This module provides the core `CatalogCleaner` struct and builder for
//! running the fixed sequence of cleaning stages over a catalog file.

use crate::cleaner::{DURATION_MINUTES, DURATION_SEASONS, DataCleaner};
use crate::config::CleanerConfig;
use crate::error::{CleaningError, Result, ResultExt};
use crate::imputers::StatisticalImputer;
use crate::inspect::{
    column_info, null_counts, render_column_info, render_null_counts, render_value_counts,
};
use crate::loader::load_catalog;
use crate::pipeline::progress::{
    CleaningStage, ClosureReporter, Diagnostic, DiagnosticReporter, StdoutReporter,
};
use crate::types::{CatalogStats, CleanedCatalog, CleaningSummary};
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The catalog cleaning pipeline.
///
/// Use [`CatalogCleaner::builder()`] to create a cleaner with custom
/// configuration or diagnostics handling.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_cleaner::CatalogCleaner;
///
/// match CatalogCleaner::builder().build()?.clean("data/netflix1.csv")? {
///     Some(catalog) => println!("Cleaned shape: {:?}", catalog.data.shape()),
///     None => println!("No cleaned data produced"),
/// }
/// ```
pub struct CatalogCleaner {
    config: CleanerConfig,
    reporter: Arc<dyn DiagnosticReporter>,
}

impl Default for CatalogCleaner {
    fn default() -> Self {
        Self {
            config: CleanerConfig::default(),
            reporter: Arc::new(StdoutReporter),
        }
    }
}

impl CatalogCleaner {
    /// Create a new cleaner builder.
    pub fn builder() -> CatalogCleanerBuilder {
        CatalogCleanerBuilder::default()
    }

    /// The configuration this cleaner runs with.
    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Load and clean the catalog at `file_path`.
    ///
    /// Returns `Ok(None)` when the file is missing or cannot be parsed;
    /// both cases are logged and reported before returning.
    ///
    /// # Errors
    ///
    /// Any failure after a successful load aborts the run: a required column
    /// missing, a `rating` column with no values, or a malformed `duration`
    /// or `listed_in` cell.
    pub fn clean(&self, file_path: impl AsRef<Path>) -> Result<Option<CleanedCatalog>> {
        let path = file_path.as_ref();
        self.emit(Diagnostic::new(
            CleaningStage::Loading,
            format!("Loading data from: {}", path.display()),
        ));

        let df = match load_catalog(path) {
            Ok(df) => df,
            Err(e) if e.is_load_failure() => {
                error!("{}", e);
                self.emit(Diagnostic::new(CleaningStage::Failed, format!("Error: {}", e)));
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match self.clean_frame(df) {
            Ok(catalog) => Ok(Some(catalog)),
            Err(e) => {
                error!("Cleaning aborted: {}", e);
                self.emit(Diagnostic::new(CleaningStage::Failed, e.to_string()));
                Err(e)
            }
        }
    }

    /// Run every stage after loading on an in-memory frame.
    pub fn clean_frame(&self, df: DataFrame) -> Result<CleanedCatalog> {
        let mut summary = CleaningSummary::new();
        summary.rows_loaded = df.height();
        summary.columns_loaded = df.width();
        self.emit(Diagnostic::new(
            CleaningStage::Loading,
            format!("Data loaded successfully. Initial shape: {:?}", df.shape()),
        ));

        // Stage 1: initial inspection
        info!("Stage 1: Inspecting raw data...");
        self.report_structure(CleaningStage::InitialInspection, &df);
        self.report_nulls(CleaningStage::InitialInspection, "Missing Values Before Cleaning", &df);

        // Stage 2: missing values
        info!("Stage 2: Handling missing values...");
        let df = self
            .handle_missing_values(df, &mut summary)
            .context("Handling missing values")?;
        self.report_nulls(CleaningStage::MissingValues, "Missing Values After Handling", &df);

        // Stage 3: duplicates
        info!("Stage 3: Removing duplicate rows...");
        let (df, removed) = DataCleaner::remove_duplicates(df).context("Removing duplicates")?;
        summary.duplicates_removed = removed;
        self.emit(Diagnostic::new(
            CleaningStage::Deduplication,
            format!("Removed {} duplicate rows.", removed),
        ));

        // Stage 4: standardization
        info!("Stage 4: Standardizing fields...");
        let df = self
            .standardize(df, &mut summary)
            .context("Standardizing fields")?;

        // Stage 5: final inspection
        info!("Stage 5: Inspecting cleaned data...");
        let stats = CatalogStats::collect(&df)?;
        self.report_final(&df, &stats);

        summary.rows_final = df.height();
        summary.columns_final = df.width();
        summary.stats = stats;

        info!(
            "Cleaning complete: {} -> {} rows ({} removed)",
            summary.rows_loaded,
            summary.rows_final,
            summary.rows_removed()
        );
        self.emit(Diagnostic::new(CleaningStage::Complete, "Data cleaning complete!"));

        Ok(CleanedCatalog { data: df, summary })
    }

    fn handle_missing_values(
        &self,
        mut df: DataFrame,
        summary: &mut CleaningSummary,
    ) -> Result<DataFrame> {
        let placeholder = self.config.placeholder.as_str();
        for column in ["director", "country"] {
            StatisticalImputer::apply_constant_imputation(&mut df, column, placeholder)?;
        }

        let (mut df, removed) = DataCleaner::drop_null_rows(df, "date_added")?;
        summary.dropped_missing_date_added = removed;
        self.emit(Diagnostic::new(
            CleaningStage::MissingValues,
            format!("Dropped {} rows with missing 'date_added'.", removed),
        ));

        if let Some(mode) = StatisticalImputer::apply_mode_imputation(&mut df, "rating")? {
            self.emit(Diagnostic::new(
                CleaningStage::MissingValues,
                format!("Filled missing 'rating' with: {}", mode),
            ));
            summary.rating_fill_value = Some(mode);
        } else {
            warn!("No 'rating' column, skipping mode fill");
        }

        let (df, removed) = DataCleaner::drop_null_rows(df, "duration")?;
        summary.dropped_missing_duration = removed;
        self.emit(Diagnostic::new(
            CleaningStage::MissingValues,
            format!("Dropped {} rows with missing 'duration'.", removed),
        ));

        Ok(df)
    }

    fn standardize(&self, df: DataFrame, summary: &mut CleaningSummary) -> Result<DataFrame> {
        let (df, removed) = DataCleaner::normalize_date_added(df)?;
        summary.dropped_unparseable_date_added = removed;
        self.emit(Diagnostic::new(
            CleaningStage::Standardization,
            format!("Dropped {} rows with unparseable 'date_added'.", removed),
        ));

        let df = DataCleaner::derive_duration_columns(df)?;

        let (df, removed) = DataCleaner::normalize_release_year(df)?;
        summary.dropped_invalid_release_year = removed;
        self.emit(Diagnostic::new(
            CleaningStage::Standardization,
            format!("Dropped {} rows with non-numeric 'release_year'.", removed),
        ));

        DataCleaner::normalize_listed_in(df)
    }

    fn report_structure(&self, stage: CleaningStage, df: &DataFrame) {
        let (rows, cols) = df.shape();
        let body = format!(
            "{} rows x {} columns\n{}",
            rows,
            cols,
            render_column_info(&column_info(df))
        );
        self.emit(Diagnostic::block(stage, stage.display_name(), body));
    }

    fn report_nulls(&self, stage: CleaningStage, title: &str, df: &DataFrame) {
        self.emit(Diagnostic::block(
            stage,
            title,
            render_null_counts(&null_counts(df)),
        ));
    }

    fn report_final(&self, df: &DataFrame, stats: &CatalogStats) {
        let stage = CleaningStage::FinalInspection;
        self.report_structure(stage, df);

        let preview = df.head(Some(self.config.preview_rows));
        self.emit(Diagnostic::block(
            stage,
            format!("First {} rows of Cleaned Data", self.config.preview_rows),
            format!("{}", preview),
        ));

        for (column, counts) in [("type", &stats.type_counts), ("rating", &stats.rating_counts)] {
            if df.column(column).is_ok() {
                self.emit(Diagnostic::block(
                    stage,
                    format!("Value Counts for '{}'", column),
                    render_value_counts(counts),
                ));
            } else {
                warn!("No '{}' column, skipping value counts", column);
            }
        }

        let mut lines = Vec::new();
        if let Some(min) = stats.min_release_year {
            lines.push(format!("Min Release Year: {}", min));
        }
        if let Some(max) = stats.max_release_year {
            lines.push(format!("Max Release Year: {}", max));
        }
        if let Some(max) = stats.max_duration_minutes {
            lines.push(format!("Max Movie Duration (minutes): {}", max));
        }
        if let Some(max) = stats.max_duration_seasons {
            lines.push(format!("Max TV Show Duration (seasons): {}", max));
        }
        if !lines.is_empty() {
            self.emit(Diagnostic::block(stage, "Range Checks", lines.join("\n")));
        }

        debug!(
            "Derived columns present: {} / {}",
            df.column(DURATION_MINUTES).is_ok(),
            df.column(DURATION_SEASONS).is_ok()
        );
    }

    fn emit(&self, diagnostic: Diagnostic) {
        match &diagnostic.title {
            Some(title) => debug!(stage = ?diagnostic.stage, "{}:\n{}", title, diagnostic.message),
            None => debug!(stage = ?diagnostic.stage, "{}", diagnostic.message),
        }
        self.reporter.report(&diagnostic);
    }
}

/// Builder for creating a [`CatalogCleaner`] with custom settings.
#[derive(Default)]
pub struct CatalogCleanerBuilder {
    config: Option<CleanerConfig>,
    reporter: Option<Arc<dyn DiagnosticReporter>>,
}

impl CatalogCleanerBuilder {
    /// Set the cleaner configuration.
    pub fn config(mut self, config: CleanerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a diagnostic reporter.
    pub fn reporter(mut self, reporter: Arc<dyn DiagnosticReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Receive diagnostics through a closure.
    pub fn on_diagnostic<F>(self, callback: F) -> Self
    where
        F: Fn(&Diagnostic) + Send + Sync + 'static,
    {
        self.reporter(Arc::new(ClosureReporter::new(callback)))
    }

    /// Build the cleaner.
    ///
    /// Diagnostics go to standard output unless a reporter was set.
    ///
    /// # Errors
    ///
    /// [`CleaningError::InvalidConfig`] if the configuration fails validation.
    pub fn build(self) -> Result<CatalogCleaner> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| CleaningError::InvalidConfig(e.to_string()))?;

        Ok(CatalogCleaner {
            config,
            reporter: self.reporter.unwrap_or_else(|| Arc::new(StdoutReporter)),
        })
    }
}

/// Clean the catalog at `file_path` with default settings.
///
/// Diagnostics are printed to standard output. Returns `Ok(None)` when the
/// file could not be loaded.
pub fn clean_catalog(file_path: impl AsRef<Path>) -> Result<Option<DataFrame>> {
    Ok(CatalogCleaner::default()
        .clean(file_path)?
        .map(CleanedCatalog::into_data))
}
