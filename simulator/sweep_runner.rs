// Sweep Runner - Load and execute sweep scenario YAML files
//
// Usage:
//   cargo run --bin sweep_runner scenarios/r_sweep.yaml
//   cargo run --bin sweep_runner scenarios/  (runs all .yaml files in directory)
//   cargo run --bin sweep_runner scenarios/r_sweep.yaml --seed 0x1234...

mod sweep;

use kg_rust::{sweep_exponents, sweep_grid_sizes, SweepResult};
use simple_logger::SimpleLogger;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use sweep::{print_table, write_csv, ScenarioFile, SweepAxis};

fn main() {
    SimpleLogger::new().init().unwrap();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "Usage: {} <scenario.yaml | directory/> [--seed SEED_HEX]",
            args[0]
        );
        eprintln!("\nExamples:");
        eprintln!("  {} scenarios/r_sweep.yaml", args[0]);
        eprintln!("  {} scenarios/", args[0]);
        eprintln!("  {} scenarios/n_sweep.yaml --seed 0x123456...", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);

    // Parse optional master seed
    let seed: Option<[u8; 32]> = if args.len() >= 4 && args[2] == "--seed" {
        Some(parse_seed_hex(&args[3]))
    } else {
        None
    };

    if path.is_file() {
        run_scenario_file(path, seed);
    } else if path.is_dir() {
        run_scenario_directory(path, seed);
    } else {
        eprintln!("Error: Path does not exist: {}", path.display());
        std::process::exit(1);
    }
}

fn run_scenario_directory(dir: &Path, seed: Option<[u8; 32]>) {
    let mut scenarios: Vec<PathBuf> = Vec::new();

    // Find all .yaml files
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let ext = path.extension().and_then(|s| s.to_str());
            if ext == Some("yaml") || ext == Some("yml") {
                scenarios.push(path);
            }
        }
    }

    scenarios.sort();

    if scenarios.is_empty() {
        eprintln!("No .yaml files found in {}", dir.display());
        std::process::exit(1);
    }

    println!("Found {} scenario(s) to run\n", scenarios.len());

    for (i, scenario_path) in scenarios.iter().enumerate() {
        println!(
            "\n{}/{} Running: {}\n",
            i + 1,
            scenarios.len(),
            scenario_path.display()
        );
        run_scenario_file(scenario_path, seed);
    }

    println!("\nAll scenarios complete.");
}

fn run_scenario_file(path: &Path, seed: Option<[u8; 32]>) {
    println!("Loading scenario from: {}", path.display());

    let yaml_content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", path.display(), e);
        std::process::exit(1);
    });

    let scenario: ScenarioFile = serde_yaml::from_str(&yaml_content).unwrap_or_else(|e| {
        eprintln!("Failed to parse {}: {}", path.display(), e);
        std::process::exit(1);
    });

    if let Some(ref name) = scenario.meta.name {
        println!("\n=== {} ===\n", name);
    }
    if let Some(ref desc) = scenario.meta.description {
        println!("{}\n", desc);
    }
    if let Some(ref hypothesis) = scenario.meta.hypothesis {
        println!("Hypothesis:\n  {}\n", hypothesis);
    }

    let trials = scenario.config.trials;
    let variant = scenario.config.variant;

    let (label, results): (&str, Result<Vec<SweepResult>, _>) = match scenario.config.sweep {
        SweepAxis::Exponent { n, ref r_values } => (
            "r",
            sweep_exponents(n, r_values, trials, variant, seed),
        ),
        SweepAxis::GridSize { r, ref n_values } => (
            "N",
            sweep_grid_sizes(r, n_values, trials, variant, seed),
        ),
    };

    let results = results.unwrap_or_else(|e| {
        eprintln!("Sweep failed: {}", e);
        std::process::exit(1);
    });

    println!();
    print_table(label, &results);

    if let Some(ref csv_path) = scenario.config.csv_output_path {
        let csv_path = Path::new(csv_path);
        match write_csv(csv_path, label, &results) {
            Ok(()) => println!("\nResults written to {}", csv_path.display()),
            Err(e) => {
                eprintln!("Failed to write {}: {}", csv_path.display(), e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_seed_hex(hex: &str) -> [u8; 32] {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let mut seed = [0u8; 32];

    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        if i >= 32 {
            break;
        }
        let s = std::str::from_utf8(chunk).unwrap_or("00");
        seed[i] = u8::from_str_radix(s, 16).unwrap_or(0);
    }

    seed
}
