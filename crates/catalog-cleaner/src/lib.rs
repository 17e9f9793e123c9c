//! Catalog Cleaning Library
//!
//! Cleans streaming-catalog CSV exports (Netflix-style title listings) with
//! Polars.
//!
//! # Overview
//!
//! The pipeline runs a fixed sequence of stages over one table:
//!
//! - **Loading**: CSV with header and full-file schema inference
//! - **Missing Values**: placeholder fill for `director`/`country`, mode fill
//!   for `rating`, and row drops for missing `date_added`/`duration`
//! - **Deduplication**: exact duplicate rows removed, first occurrence kept
//! - **Standardization**: `date_added` parsed to dates, `duration` split into
//!   minutes and seasons, `release_year` coerced to integers, `listed_in`
//!   split into genre lists
//! - **Diagnostics**: every stage reports what it saw and did
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use catalog_cleaner::{CatalogCleaner, CleanerConfig};
//!
//! let config = CleanerConfig::builder()
//!     .placeholder("Unknown")
//!     .preview_rows(10)
//!     .build()?;
//!
//! let cleaner = CatalogCleaner::builder()
//!     .config(config)
//!     .on_diagnostic(|d| println!("[{}] {}", d.stage.display_name(), d.message))
//!     .build()?;
//!
//! match cleaner.clean("data/netflix1.csv")? {
//!     Some(catalog) => {
//!         println!("Cleaned shape: {:?}", catalog.data.shape());
//!         println!("Duplicates removed: {}", catalog.summary.duplicates_removed);
//!     }
//!     None => println!("No cleaned data produced"),
//! }
//! ```
//!
//! For the default behavior with diagnostics on standard output, call
//! [`clean_catalog`] directly.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod inspect;
pub mod loader;
pub mod pipeline;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::DataCleaner;
pub use config::{
    CleanerConfig, CleanerConfigBuilder, ConfigValidationError, DEFAULT_INPUT_PATH,
    INPUT_PATH_ENV, resolve_input_path,
};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use loader::load_catalog;
pub use pipeline::{
    CatalogCleaner, CatalogCleanerBuilder, CleaningStage, ClosureReporter, Diagnostic,
    DiagnosticReporter, SilentReporter, StdoutReporter, clean_catalog,
};
pub use types::{CatalogStats, CleanedCatalog, CleaningSummary, ColumnInfo, ValueCount};
