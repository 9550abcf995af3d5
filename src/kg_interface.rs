// Shared types for the Kleinberg grid routing simulator

use std::fmt;
use std::time::Duration;

/// A node on the N×N grid, addressed by its integer coordinates.
///
/// Coordinates satisfy `0 <= x, y < N` for the grid they belong to; the
/// grid itself is implicit, nodes do not carry their grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    pub x: usize,
    pub y: usize,
}

impl Node {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Flat row-major index of this node in an N×N grid.
    pub fn index(&self, n: usize) -> usize {
        self.x * n + self.y
    }

    /// Inverse of [`Node::index`].
    pub fn from_index(index: usize, n: usize) -> Self {
        Self {
            x: index / n,
            y: index % n,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}

/// Manhattan distance `|ax - bx| + |ay - by|` between two grid nodes.
pub fn manhattan(a: Node, b: Node) -> usize {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

// ============================================================================
// Configuration
// ============================================================================

/// Which shortcut-distribution model a configuration uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Exact symmetric (2N-1)×(2N-1) offset kernel, sliced per node.
    ExactKernel,

    /// Approximate 1D radial model (4d nodes assumed per ring), with
    /// boundary rejection near the grid edge.
    RadialApprox,
}

/// One simulation configuration: a single (N, r, trials) parameter point.
///
/// A configuration owns its own topology; shortcut tables are never shared
/// between configurations.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Grid side length N (the grid has N² nodes).
    pub n: usize,

    /// Clustering exponent r. Low r favors long-range shortcuts, high r
    /// favors nearby targets. Zero and negative values are valid.
    pub r: f64,

    /// Number of independent routing trials to run.
    pub trials: usize,

    /// Shortcut distribution model.
    pub variant: Variant,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<[u8; 32]>,
}

impl SimConfig {
    pub fn new(n: usize, r: f64, trials: usize, variant: Variant) -> Self {
        Self {
            n,
            r,
            trials,
            variant,
            seed: None,
        }
    }

    /// Reject invalid parameters up front; nothing is clamped or defaulted.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.n < 2 {
            return Err(SimError::GridTooSmall { n: self.n });
        }
        if self.trials < 1 {
            return Err(SimError::NoTrials);
        }
        if !self.r.is_finite() {
            return Err(SimError::BadExponent { r: self.r });
        }
        Ok(())
    }
}

// ============================================================================
// Results
// ============================================================================

/// Outcome of a single routing trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialResult {
    /// Transitions taken to reach the destination (jumps and lattice
    /// moves both count once).
    pub steps: usize,

    /// Manhattan distance from start to destination before any move.
    /// A normalization reference, not a limit on `steps`.
    pub baseline: usize,
}

/// Aggregated statistics for one configuration.
#[derive(Debug, Clone)]
pub struct TrialStats {
    /// Trials executed.
    pub trials: usize,

    /// Arithmetic mean of steps taken per trial.
    pub mean_steps: f64,

    /// Arithmetic mean of the start→destination Manhattan distance.
    pub mean_baseline: f64,

    /// Shortcuts materialized in the table over all trials.
    pub shortcuts_sampled: usize,

    /// Random seed used (reported for reproducibility).
    pub seed_used: [u8; 32],

    /// Wall-clock duration of the trial batch.
    pub elapsed: Duration,
}

/// One row of a parameter sweep, in input order.
#[derive(Debug, Clone)]
pub struct SweepResult {
    /// The swept parameter value (r or N, depending on the sweep).
    pub parameter: f64,

    pub mean_steps: f64,
    pub mean_baseline: f64,
}

// ============================================================================
// Errors
// ============================================================================

/// Errors produced by configuration validation and simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Grid side length below the minimum of 2.
    GridTooSmall { n: usize },

    /// Trial count of zero.
    NoTrials,

    /// Non-finite clustering exponent.
    BadExponent { r: f64 },

    /// The pre-generated radial draw pool ran out mid-batch. This is a
    /// capacity-planning bug in the caller, never recovered silently.
    DrawPoolExhausted { capacity: usize },

    /// A sampling distribution had no positive weight.
    DegenerateDistribution,

    /// The kernel cache could not be read or written.
    KernelCache { reason: String },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::GridTooSmall { n } => {
                write!(f, "grid size N={} is invalid, need N >= 2", n)
            }
            SimError::NoTrials => write!(f, "trial count must be at least 1"),
            SimError::BadExponent { r } => {
                write!(f, "clustering exponent r={} is not finite", r)
            }
            SimError::DrawPoolExhausted { capacity } => write!(
                f,
                "radial draw pool exhausted ({} draws provisioned)",
                capacity
            ),
            SimError::DegenerateDistribution => {
                write!(f, "shortcut distribution has no positive weight")
            }
            SimError::KernelCache { reason } => write!(f, "kernel cache: {}", reason),
        }
    }
}

impl std::error::Error for SimError {}
