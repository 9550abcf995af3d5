//! CSV Export Example
//!
//! Run with: cargo run --example csv_export_test --release
//!
//! Runs a short exponent sweep and writes the rows to a CSV file for
//! external analysis.

use kg_rust::{sweep_exponents, Variant};
use log::info;
use simple_logger::SimpleLogger;
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    SimpleLogger::new().init().unwrap();

    let n = 50;
    let trials = 2000;
    let r_values = [0.5, 1.0, 1.5, 2.0, 2.5];

    info!("Running exponent sweep with CSV export enabled...");
    info!("Configuration:");
    info!("  N: {}", n);
    info!("  Trials per r: {}", trials);
    info!("  CSV output: sweep_results.csv");

    let results =
        sweep_exponents(n, &r_values, trials, Variant::ExactKernel, Some([7u8; 32])).unwrap();

    let mut out = BufWriter::new(File::create("sweep_results.csv").unwrap());
    writeln!(out, "r,mean_steps,mean_baseline").unwrap();
    for row in &results {
        writeln!(out, "{},{},{}", row.parameter, row.mean_steps, row.mean_baseline).unwrap();
    }
    out.flush().unwrap();

    info!("\n=== CSV File Generated ===");
    info!("All rows exported to: sweep_results.csv");
    info!("\nAnalysis examples:");
    info!("  # View the table");
    info!("  column -s, -t sweep_results.csv");
    info!("  ");
    info!("  # Python analysis");
    info!("  df = pd.read_csv('sweep_results.csv')");
    info!("  df.plot(x='r', y='mean_steps')");
}
