use crate::kg_distance_model::{DistanceModel, DrawPool};
use crate::kg_interface::{Node, SimConfig, SimError, SweepResult, TrialStats, Variant};
use crate::kg_routing::RoutingEngine;
use crate::kg_shortcuts::ShortcutStore;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;

// ============================================================================
// Trial runner
// ============================================================================

/// Runs a batch of independent routing trials against one fixed topology.
///
/// One runner owns one configuration's entire simulation context: the
/// distance model, the shortcut table, the radial draw pool, and the RNG.
/// Shortcuts persist and accumulate across trials of the batch — the
/// runner models one fixed network being queried repeatedly, not a fresh
/// network per trial.
pub struct TrialRunner {
    config: SimConfig,
    model: DistanceModel,
    store: ShortcutStore,
    pool: DrawPool,
    rng: StdRng,
    seed_used: [u8; 32],
}

impl TrialRunner {
    /// Validate the configuration and build its topology.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let seed_used = config.seed.unwrap_or_else(|| {
            let mut seed = [0u8; 32];
            rand::thread_rng().fill(&mut seed);
            seed
        });
        let mut rng = StdRng::from_seed(seed_used);

        let model = DistanceModel::build(config.n, config.r, config.variant)?;
        let pool = model.provision_pool(&mut rng, Self::pool_capacity(&config))?;
        let store = ShortcutStore::new(config.n);

        Ok(Self {
            config,
            model,
            store,
            pool,
            rng,
            seed_used,
        })
    }

    /// Draw-pool provisioning for one batch. Distinct shortcuts are
    /// bounded both by N² and by the total step count (at most 2(N-1)
    /// steps per trial), and corner rejection retries fewer than 4 times
    /// in expectation; the factor of 8 plus flat slack covers the tail.
    fn pool_capacity(config: &SimConfig) -> usize {
        let n = config.n;
        let demand = (n * n).min(config.trials.saturating_mul(2 * (n - 1)));
        demand.saturating_mul(8) + 1024
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn seed_used(&self) -> [u8; 32] {
        self.seed_used
    }

    /// Run the configured number of trials and aggregate their means.
    ///
    /// Start and destination are drawn uniformly over the grid for each
    /// trial; start == destination is valid and contributes a zero-step
    /// trial.
    pub fn run(&mut self) -> Result<TrialStats, SimError> {
        let started = Instant::now();
        let n = self.config.n;
        let trials = self.config.trials;

        let mut total_steps = 0u64;
        let mut total_baseline = 0u64;

        for _ in 0..trials {
            let start = Node::new(self.rng.gen_range(0..n), self.rng.gen_range(0..n));
            let destination = Node::new(self.rng.gen_range(0..n), self.rng.gen_range(0..n));

            let mut engine =
                RoutingEngine::new(&self.model, &mut self.store, &mut self.pool, &mut self.rng);
            let result = engine.run(start, destination)?;

            total_steps += result.steps as u64;
            total_baseline += result.baseline as u64;
        }

        let stats = TrialStats {
            trials,
            mean_steps: total_steps as f64 / trials as f64,
            mean_baseline: total_baseline as f64 / trials as f64,
            shortcuts_sampled: self.store.sampled(),
            seed_used: self.seed_used,
            elapsed: started.elapsed(),
        };

        info!(
            "[N={} r={}] {} trials: {:.2} steps on average (baseline {:.2}), {} shortcuts computed ({:.1}%) in {:.2?}",
            n,
            self.config.r,
            trials,
            stats.mean_steps,
            stats.mean_baseline,
            stats.shortcuts_sampled,
            100.0 * self.store.coverage(),
            stats.elapsed
        );

        Ok(stats)
    }
}

/// Build a topology for `config` and run its trial batch.
pub fn run_trials(config: SimConfig) -> Result<TrialStats, SimError> {
    TrialRunner::new(config)?.run()
}

// ============================================================================
// Experiment sweep
// ============================================================================

/// Sweep the clustering exponent r at fixed grid size N.
///
/// Each r value gets its own independent topology and RNG stream; results
/// come back in the order of `r_values` regardless of which configuration
/// finishes first.
pub fn sweep_exponents(
    n: usize,
    r_values: &[f64],
    trials: usize,
    variant: Variant,
    seed: Option<[u8; 32]>,
) -> Result<Vec<SweepResult>, SimError> {
    let points = r_values
        .iter()
        .map(|&r| (r, SimConfig::new(n, r, trials, variant)))
        .collect();
    run_sweep(points, seed)
}

/// Sweep the grid size N at fixed exponent r.
pub fn sweep_grid_sizes(
    r: f64,
    n_values: &[usize],
    trials: usize,
    variant: Variant,
    seed: Option<[u8; 32]>,
) -> Result<Vec<SweepResult>, SimError> {
    let points = n_values
        .iter()
        .map(|&n| (n as f64, SimConfig::new(n, r, trials, variant)))
        .collect();
    run_sweep(points, seed)
}

/// Order-preserving parallel map over independent configurations.
///
/// Per-configuration seeds derive sequentially from one master RNG before
/// any work starts, so concurrent workers draw from uncorrelated streams
/// and a given master seed reproduces the whole sweep. A failing
/// configuration fails the sweep; it never contributes a zero or NaN row.
fn run_sweep(
    mut points: Vec<(f64, SimConfig)>,
    master_seed: Option<[u8; 32]>,
) -> Result<Vec<SweepResult>, SimError> {
    let master_seed = master_seed.unwrap_or_else(|| {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill(&mut seed);
        seed
    });
    let mut master = StdRng::from_seed(master_seed);
    for (_, config) in &mut points {
        let mut seed = [0u8; 32];
        master.fill(&mut seed);
        config.seed = Some(seed);
    }

    info!(
        "sweeping {} configurations (master seed {:02x?}...)",
        points.len(),
        &master_seed[..4]
    );

    points
        .into_par_iter()
        .map(|(parameter, config)| {
            let stats = run_trials(config)?;
            Ok(SweepResult {
                parameter,
                mean_steps: stats.mean_steps,
                mean_baseline: stats.mean_baseline,
            })
        })
        .collect()
}
