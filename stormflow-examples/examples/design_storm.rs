//! # Design Storm
//!
//! Runs a triangular design storm over a catchment drained by a single open
//! channel and prints the per-timestep flood table.
//!
//! The scenario is read from the TOML file given as the first argument, or
//! from `scenarios/design_storm.toml` when no argument is given. Pass `--json`
//! after the path to print the full report as JSON instead of a table.
//!
//! ## Running the Example
//!
//! ```sh
//! cargo run --example design_storm
//! RUST_LOG=debug cargo run --example design_storm -- path/to/scenario.toml
//! ```

use std::{env, error::Error, fs};

use stormflow_simulation::{Report, Scenario, run};
use tracing_subscriber::EnvFilter;

const DEFAULT_SCENARIO: &str = include_str!("../scenarios/design_storm.toml");

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|arg| arg == "--json");

    let text = match args.iter().find(|arg| !arg.starts_with("--")) {
        Some(path) => fs::read_to_string(path)?,
        None => DEFAULT_SCENARIO.to_owned(),
    };

    let parameters = Scenario::from_toml_str(&text)?.parameters()?;
    let report = run(&parameters)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }

    Ok(())
}

fn print_table(report: &Report) {
    let summary = &report.summary;
    println!("Average rainfall intensity: {:.2} mm/h", summary.average_rainfall_intensity);
    println!("Time of concentration:      {:.2} h", summary.time_of_concentration);
    println!("Runoff coefficient:         {:.2}", summary.runoff_coefficient);
    println!();

    println!("{:>6}  {:>14}  {:>16}  {}", "Hour", "Rainfall (mm)", "Water depth (mm)", "Severity");
    for record in &report.records {
        println!(
            "{:>6}  {:>14.2}  {:>16.2}  {}",
            record.hour_label(),
            record.rainfall_mm,
            record.water_depth_mm,
            record.severity,
        );
    }

    if let Some(peak) = report.peak() {
        println!();
        println!(
            "Peak: {:.2} mm at hour {} ({})",
            peak.water_depth_mm,
            peak.hour_label(),
            peak.severity
        );
    }
}
