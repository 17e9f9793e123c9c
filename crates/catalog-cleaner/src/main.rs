//! CLI entry point for the catalog cleaning pipeline.

use anyhow::{Result, anyhow};
use catalog_cleaner::{
    CatalogCleaner, CleanedCatalog, CleanerConfig, SilentReporter, resolve_input_path,
};
use clap::Parser;
use dotenv::dotenv;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Streaming catalog CSV cleaner",
    long_about = "Cleans a streaming-catalog CSV export: fills and drops missing values,\n\
                  removes duplicate rows and standardizes dates, durations, release\n\
                  years and genres.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  CATALOG_CLEANER_INPUT    Input CSV path when --input is not given\n\n\
                  EXAMPLES:\n  \
                  # Clean the default catalog\n  \
                  catalog-cleaner\n\n  \
                  # Clean a specific file and print the summary as JSON\n  \
                  catalog-cleaner -i data/netflix1.csv --json"
)]
struct Args {
    /// Path to the catalog CSV file
    ///
    /// Falls back to CATALOG_CLEANER_INPUT, then data/netflix1.csv
    #[arg(short, long)]
    input: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output the cleaning summary as JSON instead of diagnostics
    ///
    /// Disables all logs and stage output; only the final JSON is printed.
    #[arg(long)]
    json: bool,

    /// Number of cleaned rows to preview
    #[arg(long, default_value = "5")]
    preview_rows: usize,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    // Load environment variables from .env file
    dotenv().ok();

    let input = resolve_input_path(args.input.as_deref());

    let config = CleanerConfig::builder()
        .preview_rows(args.preview_rows)
        .build()?;

    let mut builder = CatalogCleaner::builder().config(config);
    if args.json {
        builder = builder.reporter(Arc::new(SilentReporter));
    }
    let cleaner = builder.build()?;

    info!("{}", "=".repeat(80));
    info!("Starting catalog cleaning...");
    info!("{}", "=".repeat(80));

    let result = cleaner.clean(&input).map_err(|e| {
        error!("Cleaning failed: {}", e);
        anyhow!("Cleaning failed: {}", e)
    })?;

    handle_output(result.as_ref(), &input, &args)
}

/// Print the outcome of a run.
///
/// Output behavior:
/// - Default: final shape line on stdout
/// - `--json`: the cleaning summary as pretty JSON (`null` when nothing was loaded)
fn handle_output(result: Option<&CleanedCatalog>, input: &Path, args: &Args) -> Result<()> {
    if args.json {
        let summary = result.map(|catalog| &catalog.summary);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let Some(catalog) = result else {
        error!("Nothing loaded from {}", input.display());
        println!("No cleaned data produced");
        return Ok(());
    };

    let summary = &catalog.summary;
    println!();
    println!("{}", "=".repeat(80));
    println!("CLEANING COMPLETE");
    println!("{}", "=".repeat(80));
    println!("Cleaned DataFrame shape: {:?}", catalog.data.shape());
    println!(
        "  Rows: {} -> {} ({} removed, {:.1}%)",
        summary.rows_loaded,
        summary.rows_final,
        summary.rows_removed(),
        summary.rows_removed_percentage()
    );
    println!(
        "  Columns: {} -> {}",
        summary.columns_loaded, summary.columns_final
    );

    Ok(())
}
