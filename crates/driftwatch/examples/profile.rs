//! Example: Profile a tabular data file with Driftwatch.
//!
//! Usage:
//!   cargo run --example profile -- <file_path>
//!
//! Example:
//!   cargo run --example profile -- test_data/orders.csv

use std::env;
use std::path::Path;

use driftwatch::{DatasetProfiler, Loader, ReportGenerator};

fn main() -> driftwatch::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example profile -- <file_path>");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Driftwatch Profile: {}", file_path);
    println!("{}", separator);
    println!();

    let loader = Loader::new();
    let (records, source) = loader.load_file(path)?;

    println!("## Source");
    println!("  File: {}", source.file);
    println!("  Format: {}", source.format);
    println!("  Records: {}", source.record_count);
    println!("  Hash: {}", source.hash);
    println!();

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());

    let profiler = DatasetProfiler::new();
    let profile = profiler.profile_dataset(&records, &name)?;

    print!("{}", ReportGenerator::profile_markdown(&profile));

    println!("## Monitoring Metrics");
    for (metric, value) in DatasetProfiler::extract_metrics(&profile) {
        println!("  {} = {}", metric, value);
    }
    println!();

    println!("{}", separator);

    Ok(())
}
