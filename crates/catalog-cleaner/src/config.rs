//! Configuration types for the catalog cleaning pipeline.
//!
//! The cleaning rules are fixed; configuration only covers the input
//! location and presentation details, built with the builder pattern.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input file used when neither the CLI nor the environment names one.
pub const DEFAULT_INPUT_PATH: &str = "data/netflix1.csv";

/// Environment variable consulted for the input file path.
pub const INPUT_PATH_ENV: &str = "CATALOG_CLEANER_INPUT";

/// Placeholder written into empty `director` and `country` cells.
pub const DEFAULT_PLACEHOLDER: &str = "Not Given";

/// Resolve the input path: explicit value, then environment, then default.
pub fn resolve_input_path(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }
    match std::env::var(INPUT_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
        _ => PathBuf::from(DEFAULT_INPUT_PATH),
    }
}

/// Configuration for the cleaning pipeline.
///
/// Use [`CleanerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_cleaner::config::CleanerConfig;
///
/// let config = CleanerConfig::builder()
///     .preview_rows(10)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanerConfig {
    /// Value written into null `director` and `country` cells.
    /// Default: "Not Given"
    pub placeholder: String,

    /// Number of leading rows shown in the final inspection.
    /// Default: 5
    pub preview_rows: usize,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            preview_rows: 5,
        }
    }
}

impl CleanerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleanerConfigBuilder {
        CleanerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.placeholder.trim().is_empty() {
            return Err(ConfigValidationError::EmptyPlaceholder);
        }

        if self.preview_rows == 0 {
            return Err(ConfigValidationError::InvalidPreviewRows(self.preview_rows));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Placeholder value must not be empty")]
    EmptyPlaceholder,

    #[error("Invalid preview rows: {0} (must be at least 1)")]
    InvalidPreviewRows(usize),
}

/// Builder for [`CleanerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleanerConfigBuilder {
    placeholder: Option<String>,
    preview_rows: Option<usize>,
}

impl CleanerConfigBuilder {
    /// Set the placeholder for missing `director` and `country` values.
    pub fn placeholder(mut self, value: impl Into<String>) -> Self {
        self.placeholder = Some(value.into());
        self
    }

    /// Set how many rows the final inspection prints.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleanerConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleanerConfig, ConfigValidationError> {
        let config = CleanerConfig {
            placeholder: self
                .placeholder
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
            preview_rows: self.preview_rows.unwrap_or(5),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CleanerConfig::default();
        assert_eq!(config.placeholder, "Not Given");
        assert_eq!(config.preview_rows, 5);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = CleanerConfig::builder().build().unwrap();
        assert_eq!(config, CleanerConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = CleanerConfig::builder()
            .placeholder("Unknown")
            .preview_rows(10)
            .build()
            .unwrap();

        assert_eq!(config.placeholder, "Unknown");
        assert_eq!(config.preview_rows, 10);
    }

    #[test]
    fn test_validation_empty_placeholder() {
        let result = CleanerConfig::builder().placeholder("   ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyPlaceholder
        ));
    }

    #[test]
    fn test_validation_zero_preview_rows() {
        let result = CleanerConfig::builder().preview_rows(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidPreviewRows(0)
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{ "placeholder": "n/a", "preview_rows": 3 }"#;
        let config: CleanerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.placeholder, "n/a");
        assert_eq!(config.preview_rows, 3);
    }

    #[test]
    fn test_resolve_explicit_path_wins() {
        let path = resolve_input_path(Some("other.csv"));
        assert_eq!(path, PathBuf::from("other.csv"));
    }
}
