// Sweep result reporting: console table and CSV export

use kg_rust::SweepResult;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Print sweep rows as an aligned console table.
pub fn print_table(parameter_label: &str, results: &[SweepResult]) {
    println!("{:<12} {:<12} {:<12}", parameter_label, "mean_steps", "mean_baseline");
    for row in results {
        println!(
            "{:<12} {:<12.3} {:<12.3}",
            row.parameter, row.mean_steps, row.mean_baseline
        );
    }
}

/// Write sweep rows to a CSV file for external analysis (pandas, gnuplot).
pub fn write_csv(path: &Path, parameter_label: &str, results: &[SweepResult]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{},mean_steps,mean_baseline", parameter_label)?;
    for row in results {
        writeln!(
            out,
            "{},{},{}",
            row.parameter, row.mean_steps, row.mean_baseline
        )?;
    }
    out.flush()
}
