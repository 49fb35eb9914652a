//! Driftwatch CLI - data profiling and drift detection.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Profile {
            file,
            name,
            output,
            json,
        } => commands::profile::run(file, name, output, json, cli.verbose),

        Commands::Drift {
            file,
            baseline,
            threshold,
            json,
        } => commands::drift::run(file, baseline, threshold, json, cli.verbose),

        Commands::Anomalies {
            file,
            column,
            method,
            json,
        } => commands::anomalies::run(file, column, method, json, cli.verbose),

        Commands::Metrics { profile } => commands::metrics::run(profile),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
