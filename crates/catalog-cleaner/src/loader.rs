//! CSV loading for catalog exports.

use crate::error::{CleaningError, Result};
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions, NullValues};
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Cell contents read as null in addition to empty fields.
pub const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Load a catalog CSV into a DataFrame.
///
/// The whole file is scanned for schema inference so a stray non-numeric
/// value late in a column widens the column to text instead of failing the
/// read.
///
/// # Errors
///
/// [`CleaningError::NotFound`] if `path` does not exist,
/// [`CleaningError::Load`] for any other read or parse failure.
pub fn load_catalog(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(CleaningError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let null_values = NullValues::AllColumns(MISSING_MARKERS.iter().map(|m| (*m).into()).collect());

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(null_values)),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|source| CleaningError::Load {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Loaded {} rows x {} columns from {}", df.height(), df.width(), path.display());
    Ok(df)
}
