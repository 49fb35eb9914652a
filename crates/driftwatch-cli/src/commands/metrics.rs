//! Metrics command - print monitoring metrics from a stored profile.

use std::path::PathBuf;

use driftwatch::{DatasetProfile, DatasetProfiler};

pub fn run(profile_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let profile = DatasetProfile::load(&profile_path)?;
    let metrics = DatasetProfiler::extract_metrics(&profile);

    for (name, value) in &metrics {
        println!("{} {}", name, value);
    }

    Ok(())
}
