//! Run pension calculations for every request in a CSV file
//!
//! Writes one export row per successful calculation; failed rows are
//! reported and skipped.

use anyhow::{Context, Result};
use clap::Parser;
use pension_projection::export::{write_export_rows, ExportRow};
use pension_projection::input::load_inputs;
use pension_projection::{PensionEngine, ProjectionConfig, ReferenceTables};
use rayon::prelude::*;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "run_batch", about = "Project pensions for a file of requests")]
struct Args {
    /// Request CSV file
    input: PathBuf,

    /// Export CSV file
    #[arg(short, long, default_value = "pension_export.csv")]
    output: PathBuf,

    /// Directory with reference table CSV files; built-in tables if omitted
    #[arg(long)]
    tables: Option<PathBuf>,

    #[arg(long)]
    current_year: Option<i32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading requests from {}...", args.input.display());
    let inputs = load_inputs(&args.input)
        .with_context(|| format!("loading requests from {}", args.input.display()))?;
    println!("Loaded {} requests in {:?}", inputs.len(), start.elapsed());

    let tables = match &args.tables {
        Some(dir) => ReferenceTables::from_csv_path(dir)
            .with_context(|| format!("loading tables from {}", dir.display()))?,
        None => ReferenceTables::default_tables(),
    };
    let mut config = ProjectionConfig::default();
    if let Some(year) = args.current_year {
        config.current_year = year;
    }
    let engine = PensionEngine::new(tables, config);

    println!("Running projections...");
    let proj_start = Instant::now();
    let captured_at = chrono::Utc::now();

    let outcomes: Vec<_> = inputs
        .par_iter()
        .enumerate()
        .map(|(index, input)| {
            engine
                .calculate(input)
                .map(|result| ExportRow::from_result(input, &result, captured_at))
                .map_err(|err| (index, err))
        })
        .collect();

    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut rows = Vec::with_capacity(outcomes.len());
    let mut failures = 0usize;
    for outcome in outcomes {
        match outcome {
            Ok(row) => rows.push(row),
            Err((index, err)) => {
                failures += 1;
                // Data rows start on line 2 after the header
                log::warn!("request on line {} failed: {}", index + 2, err);
                eprintln!("Row {}: {}", index + 2, err);
            }
        }
    }

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    write_export_rows(&rows, file)?;

    let total_nominal: f64 = rows.iter().map(|row| row.nominal_pension).sum();
    println!("\nSummary:");
    println!("  Calculated:          {}", rows.len());
    println!("  Failed:              {}", failures);
    if !rows.is_empty() {
        println!("  Mean nominal pension: {:.2}", total_nominal / rows.len() as f64);
    }
    println!("\nOutput written to: {}", args.output.display());
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
