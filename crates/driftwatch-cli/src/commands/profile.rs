//! Profile command - profile a data file and optionally save a baseline.

use std::path::PathBuf;

use colored::Colorize;
use driftwatch::{DatasetProfiler, Loader, ReportGenerator};

pub fn run(
    file: PathBuf,
    name: Option<String>,
    output: Option<PathBuf>,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let dataset_name = name.unwrap_or_else(|| {
        file.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string())
    });

    println!(
        "{} {}",
        "Profiling".cyan().bold(),
        file.display().to_string().white()
    );

    let loader = Loader::new();
    let (records, source) = loader.load_file(&file)?;

    if verbose {
        println!(
            "  Loaded {} records x {} columns ({}, {} bytes)",
            source.record_count, source.column_count, source.format, source.size_bytes
        );
    }

    let profiler = DatasetProfiler::new();
    let profile = profiler.profile_dataset(&records, &dataset_name)?;

    if json {
        println!("{}", profile.to_json()?);
    } else {
        println!();
        print!("{}", ReportGenerator::profile_markdown(&profile));
    }

    let anomaly_count: usize = profile
        .column_profiles
        .values()
        .map(|c| c.anomalies.len())
        .sum();
    if anomaly_count > 0 {
        println!(
            "{} {} anomalies across {} columns",
            "Found".yellow().bold(),
            anomaly_count,
            profile.total_columns
        );
    }

    if let Some(output_path) = output {
        profile.save(&output_path)?;
        println!(
            "{} {}",
            "Baseline saved to".green().bold(),
            output_path.display().to_string().white()
        );
    }

    Ok(())
}
