//! Drift command - compare current data against a stored baseline.

use std::path::PathBuf;

use colored::Colorize;
use driftwatch::{DatasetProfile, DriftComparator, DriftConfig, Loader, ReportGenerator};

pub fn run(
    file: PathBuf,
    baseline_path: PathBuf,
    threshold: f64,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    if !(0.0..=1.0).contains(&threshold) || threshold == 0.0 {
        return Err(format!("Threshold must be in (0, 1], got {}", threshold).into());
    }

    let baseline = DatasetProfile::load(&baseline_path)?;

    if verbose {
        println!(
            "  Baseline '{}' from {} ({} columns)",
            baseline.dataset_name,
            baseline.profile_timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            baseline.total_columns
        );
    }

    let loader = Loader::new();
    let (records, _source) = loader.load_file(&file)?;

    println!(
        "{} {} {} {}",
        "Comparing".cyan().bold(),
        file.display().to_string().white(),
        "against baseline".cyan(),
        baseline_path.display().to_string().white()
    );

    let comparator = DriftComparator::with_config(DriftConfig {
        threshold,
        ..DriftConfig::default()
    });
    let report = comparator.detect_drift(&baseline.column_profiles, &records)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    print!("{}", ReportGenerator::drift_markdown(&report));

    let drifted = report.values().filter(|r| r.has_drift).count();
    if drifted == 0 {
        println!("{}", "No drift detected.".green().bold());
    } else {
        println!(
            "{} {} of {} columns drifted",
            "Drift:".red().bold(),
            drifted,
            report.len()
        );
    }

    Ok(())
}
