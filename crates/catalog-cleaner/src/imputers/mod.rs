//! Imputation module for handling missing values.
//!
//! This module provides the two fill strategies the cleaner uses:
//! - Constant imputation (placeholder text)
//! - Mode imputation (most frequent observed value)

mod statistical;

pub use statistical::StatisticalImputer;
