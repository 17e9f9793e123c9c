//! Pipeline module.
//!
//! This module provides the catalog cleaning pipeline and its diagnostics.

mod builder;
pub mod progress;

pub use builder::{CatalogCleaner, CatalogCleanerBuilder, clean_catalog};
pub use progress::{
    CleaningStage, ClosureReporter, Diagnostic, DiagnosticReporter, SilentReporter,
    StdoutReporter,
};
