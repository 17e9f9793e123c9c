//! Integration tests for the catalog cleaning pipeline.
//!
//! These tests run the full pipeline over CSV fixtures.

use catalog_cleaner::{
    CatalogCleaner, CleanedCatalog, CleanerConfig, CleaningError, CleaningStage, Diagnostic,
    SilentReporter, clean_catalog,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn silent_cleaner() -> CatalogCleaner {
    CatalogCleaner::builder()
        .reporter(Arc::new(SilentReporter))
        .build()
        .unwrap()
}

fn clean_fixture(filename: &str) -> CleanedCatalog {
    silent_cleaner()
        .clean(fixtures_path().join(filename))
        .expect("cleaning should not abort")
        .expect("fixture should load")
}

fn strings(df: &DataFrame, column: &str) -> Vec<String> {
    df.column(column)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap().to_string())
        .collect()
}

fn genres(df: &DataFrame) -> Vec<Vec<String>> {
    df.column("listed_in")
        .unwrap()
        .as_materialized_series()
        .list()
        .unwrap()
        .into_iter()
        .map(|row| {
            row.unwrap()
                .str()
                .unwrap()
                .into_iter()
                .map(|g| g.unwrap().to_string())
                .collect()
        })
        .collect()
}

/// Write a cleaned table back to CSV, joining genre lists into text.
fn write_back(df: &DataFrame) -> tempfile::NamedTempFile {
    let joined: Vec<String> = genres(df).into_iter().map(|g| g.join(", ")).collect();
    let mut out = df.clone();
    out.replace("listed_in", Series::new("listed_in".into(), joined))
        .unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    CsvWriter::new(&mut file).finish(&mut out).unwrap();
    file
}

// ============================================================================
// Full Pipeline Tests
// ============================================================================

#[test]
fn test_clean_sample_catalog_shape_and_summary() {
    let catalog = clean_fixture("catalog_sample.csv");
    let summary = &catalog.summary;

    assert_eq!(summary.rows_loaded, 12);
    assert_eq!(summary.columns_loaded, 10);
    assert_eq!(summary.dropped_missing_date_added, 1);
    assert_eq!(summary.rating_fill_value.as_deref(), Some("TV-MA"));
    assert_eq!(summary.dropped_missing_duration, 1);
    assert_eq!(summary.duplicates_removed, 1);
    assert_eq!(summary.dropped_unparseable_date_added, 1);
    assert_eq!(summary.dropped_invalid_release_year, 1);
    assert_eq!(summary.rows_final, 7);
    assert_eq!(summary.columns_final, 12);
    assert_eq!(catalog.data.shape(), (7, 12));
    assert_eq!(summary.rows_removed(), 5);
}

#[test]
fn test_required_columns_have_no_nulls() {
    let catalog = clean_fixture("catalog_sample.csv");
    for column in [
        "director",
        "country",
        "date_added",
        "rating",
        "duration",
        "release_year",
        "listed_in",
    ] {
        assert_eq!(
            catalog.data.column(column).unwrap().null_count(),
            0,
            "column '{}' still has nulls",
            column
        );
    }
}

#[test]
fn test_column_types_after_cleaning() {
    let df = clean_fixture("catalog_sample.csv").into_data();

    assert_eq!(df.column("date_added").unwrap().dtype(), &DataType::Date);
    assert_eq!(df.column("release_year").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("duration_minutes").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("duration_seasons").unwrap().dtype(), &DataType::Int64);
    assert!(matches!(
        df.column("listed_in").unwrap().dtype(),
        DataType::List(_)
    ));
}

#[test]
fn test_placeholder_and_row_order() {
    let df = clean_fixture("catalog_sample.csv").into_data();

    assert_eq!(
        strings(&df, "show_id"),
        vec!["s1", "s2", "s3", "s5", "s6", "s7", "s11"]
    );
    assert_eq!(
        strings(&df, "director"),
        vec![
            "Kirsten Johnson",
            "Not Given",
            "Julien Leclercq",
            "Theodore Melfi",
            "Not Given",
            "Robert Cullen, José Luis Ucha",
            "Mike Flanagan",
        ]
    );
    assert_eq!(strings(&df, "country")[2], "Not Given");
    assert_eq!(strings(&df, "rating")[3], "TV-MA");
}

#[test]
fn test_duration_derivation() {
    let df = clean_fixture("catalog_sample.csv").into_data();
    let minutes = df.column("duration_minutes").unwrap().as_materialized_series();
    let seasons = df.column("duration_seasons").unwrap().as_materialized_series();
    let minutes: Vec<Option<i64>> = minutes.i64().unwrap().into_iter().collect();
    let seasons: Vec<Option<i64>> = seasons.i64().unwrap().into_iter().collect();

    assert_eq!(
        minutes,
        vec![Some(90), None, None, Some(104), None, Some(91), None]
    );
    assert_eq!(
        seasons,
        vec![None, Some(2), Some(1), None, Some(2), None, Some(1)]
    );
}

#[test]
fn test_genres_are_trimmed_lists() {
    let df = clean_fixture("catalog_sample.csv").into_data();
    let genres = genres(&df);

    assert_eq!(genres[0], vec!["Documentaries"]);
    assert_eq!(
        genres[1],
        vec!["International TV Shows", "TV Dramas", "TV Mysteries"]
    );
    for list in &genres {
        assert!(!list.is_empty());
        assert!(list.iter().all(|g| !g.is_empty() && g.trim() == g));
    }
}

#[test]
fn test_final_stats() {
    let stats = clean_fixture("catalog_sample.csv").summary.stats;

    assert_eq!(stats.min_release_year, Some(2020));
    assert_eq!(stats.max_release_year, Some(2021));
    assert_eq!(stats.max_duration_minutes, Some(104));
    assert_eq!(stats.max_duration_seasons, Some(2));

    let types: Vec<(String, usize)> = stats
        .type_counts
        .into_iter()
        .map(|vc| (vc.value, vc.count))
        .collect();
    assert_eq!(
        types,
        vec![("TV Show".to_string(), 4), ("Movie".to_string(), 3)]
    );
    assert_eq!(stats.rating_counts[0].value, "TV-MA");
    assert_eq!(stats.rating_counts[0].count, 5);
}

#[test]
fn test_cleaning_is_idempotent() {
    let first = clean_fixture("catalog_sample.csv").into_data();
    let file = write_back(&first);

    let second = silent_cleaner()
        .clean(file.path())
        .unwrap()
        .unwrap();

    assert_eq!(second.summary.duplicates_removed, 0);
    assert_eq!(second.summary.rows_removed(), 0);
    assert!(first.equals_missing(&second.data));
}

// ============================================================================
// Absent and Aborted Runs
// ============================================================================

#[test]
fn test_missing_file_is_absent() {
    let result = silent_cleaner()
        .clean(fixtures_path().join("does_not_exist.csv"))
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn test_clean_catalog_missing_file() {
    let result = clean_catalog(fixtures_path().join("does_not_exist.csv")).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_missing_required_column_aborts() {
    let err = silent_cleaner()
        .clean(fixtures_path().join("missing_columns.csv"))
        .unwrap_err();
    assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
}

#[test]
fn test_bad_duration_aborts() {
    let err = silent_cleaner()
        .clean(fixtures_path().join("bad_duration.csv"))
        .unwrap_err();
    assert_eq!(err.error_code(), "FORMAT_ERROR");
}

#[test]
fn test_absent_rating_column_is_skipped() {
    let catalog = clean_fixture("no_rating.csv");

    assert_eq!(catalog.summary.rating_fill_value, None);
    assert!(catalog.summary.stats.rating_counts.is_empty());
    assert_eq!(catalog.data.height(), 2);
    assert!(catalog.data.column("rating").is_err());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = CleanerConfig {
        placeholder: "  ".to_string(),
        ..CleanerConfig::default()
    };
    let result = CatalogCleaner::builder().config(config).build();
    assert!(matches!(result, Err(CleaningError::InvalidConfig(_))));
}

// ============================================================================
// Diagnostics Tests
// ============================================================================

#[test]
fn test_diagnostics_capture() {
    let captured: Arc<Mutex<Vec<Diagnostic>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&captured);

    let cleaner = CatalogCleaner::builder()
        .config(CleanerConfig::builder().preview_rows(3).build().unwrap())
        .on_diagnostic(move |d| sink.lock().unwrap().push(d.clone()))
        .build()
        .unwrap();

    cleaner
        .clean(fixtures_path().join("catalog_sample.csv"))
        .unwrap()
        .unwrap();

    let diagnostics = captured.lock().unwrap();
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();

    assert!(messages[0].starts_with("Loading data from: "));
    assert_eq!(messages[1], "Data loaded successfully. Initial shape: (12, 10)");
    assert!(messages.contains(&"Dropped 1 rows with missing 'date_added'."));
    assert!(messages.contains(&"Filled missing 'rating' with: TV-MA"));
    assert!(messages.contains(&"Dropped 1 rows with missing 'duration'."));
    assert!(messages.contains(&"Removed 1 duplicate rows."));
    assert!(messages.contains(&"Dropped 1 rows with unparseable 'date_added'."));
    assert_eq!(messages.last(), Some(&"Data cleaning complete!"));

    let titles: Vec<&str> = diagnostics
        .iter()
        .filter_map(|d| d.title.as_deref())
        .collect();
    assert!(titles.contains(&"First 3 rows of Cleaned Data"));
    assert!(titles.contains(&"Value Counts for 'type'"));
    assert!(titles.contains(&"Value Counts for 'rating'"));
}

#[test]
fn test_load_failure_reported() {
    let stages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&stages);

    let cleaner = CatalogCleaner::builder()
        .on_diagnostic(move |d| sink.lock().unwrap().push(d.stage))
        .build()
        .unwrap();

    assert!(cleaner.clean("missing/catalog.csv").unwrap().is_none());
    assert_eq!(
        *stages.lock().unwrap(),
        vec![CleaningStage::Loading, CleaningStage::Failed]
    );
}
