//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Driftwatch: data profiling and drift detection
#[derive(Parser)]
#[command(name = "driftwatch")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a data file and optionally save the result as a baseline
    Profile {
        /// Path to the data file (CSV/TSV/JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Dataset name (default: file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Save the profile as a baseline JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the profile as JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },

    /// Compare a data file against a stored baseline profile
    Drift {
        /// Path to the current data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path to the baseline profile JSON
        #[arg(short, long)]
        baseline: PathBuf,

        /// Drift threshold in (0, 1]
        #[arg(short, long, default_value = "0.1")]
        threshold: f64,

        /// Print results as JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },

    /// Detect outliers in a single numeric column
    Anomalies {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column to check
        #[arg(short, long)]
        column: String,

        /// Detection method
        #[arg(short, long, default_value = "iqr")]
        method: MethodChoice,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print monitoring metrics extracted from a stored profile
    Metrics {
        /// Path to a profile JSON file
        #[arg(value_name = "PROFILE")]
        profile: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodChoice {
    Iqr,
    Zscore,
}

impl From<MethodChoice> for driftwatch::AnomalyMethod {
    fn from(choice: MethodChoice) -> Self {
        match choice {
            MethodChoice::Iqr => driftwatch::AnomalyMethod::Iqr,
            MethodChoice::Zscore => driftwatch::AnomalyMethod::Zscore,
        }
    }
}
