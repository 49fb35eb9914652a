//! Anomalies command - detect outliers in a single column.

use std::path::PathBuf;

use colored::Colorize;
use driftwatch::{column_values, AnomalyDetector, Loader};

use crate::cli::MethodChoice;

pub fn run(
    file: PathBuf,
    column: String,
    method: MethodChoice,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let loader = Loader::new();
    let (records, _source) = loader.load_file(&file)?;

    if !records.iter().any(|r| r.contains_key(&column)) {
        return Err(format!("Column not found: {}", column).into());
    }

    let values = column_values(&records, &column);
    let method: driftwatch::AnomalyMethod = method.into();

    if verbose {
        println!(
            "  Checking {} values in '{}' with method '{}'",
            values.len(),
            column,
            method
        );
    }

    let detector = AnomalyDetector::new();
    let anomalies = detector.find_anomalies(&values, method);

    if json {
        println!("{}", serde_json::to_string_pretty(&anomalies)?);
        return Ok(());
    }

    if anomalies.is_empty() {
        println!("{}", "No anomalies detected.".green().bold());
        return Ok(());
    }

    println!(
        "{} {} anomalies in column '{}'",
        "Found".yellow().bold(),
        anomalies.len(),
        column
    );
    for anomaly in &anomalies {
        println!(
            "  row {:>6}  {}",
            anomaly.record_index.to_string().white().bold(),
            anomaly.reason
        );
    }

    Ok(())
}
