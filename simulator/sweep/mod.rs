// Sweep scenario glue shared by the runner binary

pub mod config;
pub mod stats;

pub use config::{ScenarioConfig, ScenarioFile, ScenarioMeta, SweepAxis};
pub use stats::{print_table, write_csv};
