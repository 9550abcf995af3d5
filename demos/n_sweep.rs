//! Grid-size scaling experiment
//!
//! Run with: cargo run --example n_sweep --release
//!
//! Holds r = 10 (shortcuts stay very short, so they rarely help) and
//! grows the grid from 10 to 710. The radial approximation keeps this
//! cheap at large N where the exact kernel would not fit.

use kg_rust::{sweep_grid_sizes, Variant};
use log::info;
use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new().init().unwrap();

    let r = 10.0;
    let trials = 10_000;
    let n_values: Vec<usize> = (0..8).map(|i| 10 + 100 * i).collect();

    info!("Sweeping N over {:?} at r={}", n_values, r);

    let results = sweep_grid_sizes(r, &n_values, trials, Variant::RadialApprox, None)
        .unwrap_or_else(|e| {
            eprintln!("sweep failed: {}", e);
            std::process::exit(1);
        });

    info!("N      mean steps");
    for row in &results {
        info!("{:<6} {:.2}", row.parameter, row.mean_steps);
    }
}
