// Sweep scenario configuration

use kg_rust::Variant;

/// One scenario YAML file.
#[derive(Debug, serde::Deserialize)]
pub struct ScenarioFile {
    /// Scenario metadata
    #[serde(default)]
    pub meta: ScenarioMeta,

    /// Sweep configuration
    pub config: ScenarioConfig,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct ScenarioMeta {
    pub name: Option<String>,
    pub description: Option<String>,
    pub hypothesis: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ScenarioConfig {
    /// Which parameter to sweep, and over which values
    pub sweep: SweepAxis,

    /// Routing trials per configuration
    #[serde(default = "default_trials")]
    pub trials: usize,

    /// Shortcut distribution model
    #[serde(default = "default_variant")]
    pub variant: Variant,

    /// Optional CSV output path for the sweep rows
    #[serde(default)]
    pub csv_output_path: Option<String>,
}

/// The swept axis: vary r at fixed N, or vary N at fixed r.
#[derive(Debug, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SweepAxis {
    Exponent { n: usize, r_values: Vec<f64> },
    GridSize { r: f64, n_values: Vec<usize> },
}

fn default_trials() -> usize {
    10_000
}

fn default_variant() -> Variant {
    Variant::ExactKernel
}
