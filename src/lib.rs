//! # kgRust - Kleinberg Grid Routing Simulator
//!
//! A Rust implementation of decentralized greedy routing on Kleinberg's
//! augmented-grid small-world network: an N×N lattice where each node
//! additionally owns one long-range shortcut, chosen with probability
//! proportional to Manhattan-distance^(-r). Mean routing path length is
//! estimated empirically over many Monte Carlo trials, reproducing the
//! classic small-world routing results as a function of the clustering
//! exponent r and the grid size N.
//!
//! ## Core Components
//!
//! - **DistanceModel**: distance-biased shortcut distribution, either the
//!   exact symmetric offset kernel or the approximate 1D radial model
//! - **ShortcutStore**: lazy per-node shortcut memoization for one topology
//! - **RoutingEngine**: one hop-by-hop greedy routing trial
//! - **TrialRunner / sweeps**: trial batches per configuration and
//!   order-preserving parallel parameter sweeps
//!
//! ## Usage
//!
//! ```no_run
//! use kg_rust::{run_trials, SimConfig, Variant};
//!
//! let config = SimConfig::new(100, 2.0, 10_000, Variant::ExactKernel);
//! let stats = run_trials(config).unwrap();
//! println!("mean {:.2} steps (baseline {:.2})", stats.mean_steps, stats.mean_baseline);
//! ```
//!
//! Parameter sweeps over r or N run each configuration against its own
//! independent topology and return results in input order:
//!
//! ```no_run
//! use kg_rust::{sweep_exponents, Variant};
//!
//! let results = sweep_exponents(100, &[0.5, 1.0, 1.5, 2.0], 10_000,
//!                               Variant::ExactKernel, None).unwrap();
//! for row in results {
//!     println!("r={:.1}: {:.2} steps", row.parameter, row.mean_steps);
//! }
//! ```
//!
//! ## Scenario Runner
//!
//! For YAML-driven experiments and CSV export, see the `sweep_runner`
//! binary in `simulator/`.

// Core simulation modules
pub mod kg_distance_model;
pub mod kg_interface;
pub mod kg_routing;
pub mod kg_shortcuts;
pub mod kg_trials;

// Optional disk cache for exact kernels
pub mod kg_kernel_cache;

// Re-export commonly used types
pub use kg_distance_model::{ring_offset, DistanceModel, DrawPool, ExactKernel, RadialModel};
pub use kg_interface::{
    manhattan, Node, SimConfig, SimError, SweepResult, TrialResult, TrialStats, Variant,
};
pub use kg_kernel_cache::KernelCache;
pub use kg_routing::RoutingEngine;
pub use kg_shortcuts::ShortcutStore;
pub use kg_trials::{run_trials, sweep_exponents, sweep_grid_sizes, TrialRunner};
