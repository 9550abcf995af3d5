//! The classic Kleinberg exponent experiment
//!
//! Run with: cargo run --example r_sweep --release
//!
//! Sweeps r from 0.1 to 2.9 on a 100x100 grid with the exact offset
//! kernel, 10000 routing trials per configuration. Mean path length
//! should dip near r = 2 and rise on both sides.

use kg_rust::{sweep_exponents, Variant};
use log::info;
use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new().init().unwrap();

    let n = 100;
    let trials = 10_000;
    let r_values: Vec<f64> = (1..30).map(|i| i as f64 * 0.1).collect();

    info!("Sweeping r over {} values at N={}", r_values.len(), n);

    let results = sweep_exponents(n, &r_values, trials, Variant::ExactKernel, None)
        .unwrap_or_else(|e| {
            eprintln!("sweep failed: {}", e);
            std::process::exit(1);
        });

    info!("r      mean steps");
    for row in &results {
        info!("{:<6.1} {:.2}", row.parameter, row.mean_steps);
    }
}
