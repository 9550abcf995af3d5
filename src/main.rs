use log::info;
use rand::Rng;
use simple_logger::SimpleLogger;

use kg_rust::{sweep_exponents, Variant};

fn main() {
    SimpleLogger::new().init().unwrap();

    info!("starting");

    let n = 50;
    let trials = 2000;
    let mut seed = [0u8; 32];
    rand::thread_rng().fill(&mut seed);

    // The classic experiment in miniature: sweep r and watch the mean
    // path length dip around r = 2
    let r_values: Vec<f64> = (1..30).map(|i| i as f64 * 0.1).collect();

    let results = match sweep_exponents(n, &r_values, trials, Variant::ExactKernel, Some(seed)) {
        Ok(results) => results,
        Err(e) => {
            log::error!("sweep failed: {}", e);
            std::process::exit(1);
        }
    };

    info!("r      mean steps   mean baseline");
    for row in &results {
        info!(
            "{:<6.1} {:<12.2} {:<12.2}",
            row.parameter, row.mean_steps, row.mean_baseline
        );
    }

    let best = results
        .iter()
        .min_by(|a, b| a.mean_steps.total_cmp(&b.mean_steps));
    if let Some(best) = best {
        info!(
            "shortest routes at r={:.1} ({:.2} steps on average)",
            best.parameter, best.mean_steps
        );
    }
}
