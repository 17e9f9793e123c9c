//! Diagnostic reporting for the cleaning pipeline.
//!
//! Every stage describes what it saw or did as a [`Diagnostic`]. The
//! pipeline hands these to a [`DiagnosticReporter`], which decides where
//! they go: standard output for the CLI, a closure for embedding callers
//! and tests, or nowhere.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_cleaner::CatalogCleaner;
//!
//! let result = CatalogCleaner::builder()
//!     .on_diagnostic(|diagnostic| {
//!         println!("[{}] {}", diagnostic.stage.display_name(), diagnostic.message);
//!     })
//!     .build()?
//!     .clean("data/netflix1.csv")?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the cleaning pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStage {
    /// Reading the CSV file
    Loading,
    /// Shape, dtypes and null counts before any change
    InitialInspection,
    /// Placeholder fills, mode fill and null-row drops
    MissingValues,
    /// Exact duplicate removal
    Deduplication,
    /// Date, duration, release year and genre normalization
    Standardization,
    /// Summary of the cleaned table
    FinalInspection,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline stopped without a result
    Failed,
}

impl CleaningStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading",
            Self::InitialInspection => "Initial Data Info",
            Self::MissingValues => "Missing Values",
            Self::Deduplication => "Duplicate Removal",
            Self::Standardization => "Standardization",
            Self::FinalInspection => "Data Info After Cleaning",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }
}

/// One stage-tagged piece of diagnostic output.
///
/// `title` is set for block diagnostics (tables, previews) whose message
/// spans several lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub stage: CleaningStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub message: String,
}

impl Diagnostic {
    /// A single-line diagnostic.
    pub fn new(stage: CleaningStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            title: None,
            message: message.into(),
        }
    }

    /// A titled, possibly multi-line block.
    pub fn block(stage: CleaningStage, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            stage,
            title: Some(title.into()),
            message: body.into(),
        }
    }
}

/// Trait for receiving diagnostics during cleaning.
///
/// Implementations must be `Send + Sync` so a cleaner can be moved to a
/// worker thread.
pub trait DiagnosticReporter: Send + Sync {
    /// Called once per diagnostic, in pipeline order.
    fn report(&self, diagnostic: &Diagnostic);
}

/// Prints diagnostics to standard output.
///
/// Block diagnostics are preceded by a blank line and a `--- title ---`
/// header.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutReporter;

impl DiagnosticReporter for StdoutReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        if let Some(title) = &diagnostic.title {
            println!("\n--- {} ---", title);
        }
        println!("{}", diagnostic.message);
    }
}

/// Discards all diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl DiagnosticReporter for SilentReporter {
    fn report(&self, _diagnostic: &Diagnostic) {}
}

/// Wrapper that implements [`DiagnosticReporter`] using a closure.
pub struct ClosureReporter<F>
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureReporter<F>
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    /// Creates a new closure-based reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> DiagnosticReporter for ClosureReporter<F>
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn report(&self, diagnostic: &Diagnostic) {
        (self.callback)(diagnostic);
    }
}
