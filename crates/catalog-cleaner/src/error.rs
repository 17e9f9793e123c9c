//! Custom error types for the catalog cleaning pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Only the two
//! load-boundary variants ([`CleaningError::NotFound`] and
//! [`CleaningError::Load`]) are recovered by the pipeline; every other
//! variant aborts the run.
//!
//! Errors are serializable so they can be embedded in JSON output.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// The input path does not exist.
    #[error("The file '{}' was not found", path.display())]
    NotFound { path: PathBuf },

    /// The input exists but could not be read or parsed as CSV.
    #[error("An error occurred while loading '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// No valid values found in a column for computation.
    #[error("No valid values found in column '{0}'")]
    NoValidValues(String),

    /// A cell value did not have the shape the pipeline relies on.
    #[error("Malformed value {value:?} in column '{column}': {reason}")]
    Format {
        column: String,
        value: String,
        reason: String,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build a [`CleaningError::Format`] for a single offending cell.
    pub fn format(
        column: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CleaningError::Format {
            column: column.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Stable error code, used in serialized output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Load { .. } => "LOAD_ERROR",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::NoValidValues(_) => "NO_VALID_VALUES",
            Self::Format { .. } => "FORMAT_ERROR",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether this error happened at the load boundary.
    ///
    /// Load failures are converted into an absent result instead of
    /// aborting the run.
    pub fn is_load_failure(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::Load { .. } => true,
            Self::WithContext { source, .. } => source.is_load_failure(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
