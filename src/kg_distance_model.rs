use crate::kg_interface::{Node, SimError, Variant};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

// ============================================================================
// Exact symmetric kernel
// ============================================================================

/// Exact distance-biased shortcut distribution for an N×N grid.
///
/// Stores the full (2N-1)×(2N-1) offset kernel centered on a reference
/// node: entry (dx, dy) carries weight d(0,0 → dx,dy)^(-r), with the zero
/// offset excluded. Thanks to symmetry only one quadrant is computed and
/// mirrored into the other three. The kernel is normalized once over all
/// offsets; a concrete node's distribution is its centered N×N window,
/// re-normalized locally because the window is a boundary-truncated slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExactKernel {
    n: usize,
    r: f64,
    /// Row-major (2n-1)×(2n-1) weights, center at (n-1, n-1).
    weights: Vec<f64>,
}

impl ExactKernel {
    /// Build the kernel for grid size `n` and clustering exponent `r`.
    pub fn build(n: usize, r: f64) -> Result<Self, SimError> {
        if n < 2 {
            return Err(SimError::GridTooSmall { n });
        }
        if !r.is_finite() {
            return Err(SimError::BadExponent { r });
        }

        let started = Instant::now();
        let side = 2 * n - 1;
        let mut weights = vec![0.0; side * side];

        // One quadrant, mirrored four ways. The zero offset stays 0.
        for i in 0..n {
            let j_start = if i == 0 { 1 } else { 0 };
            for j in j_start..n {
                let w = ((i + j) as f64).powf(-r);
                weights[(n - 1 + i) * side + (n - 1 + j)] = w;
                weights[(n - 1 - i) * side + (n - 1 + j)] = w;
                weights[(n - 1 - i) * side + (n - 1 - j)] = w;
                weights[(n - 1 + i) * side + (n - 1 - j)] = w;
            }
        }

        let total: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= total;
        }

        log::debug!(
            "built {}x{} distance kernel for r={} in {:.2?}",
            side,
            side,
            r,
            started.elapsed()
        );

        Ok(Self { n, r, weights })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    /// Kernel weight for a relative offset, `|dx|, |dy| <= n-1`.
    pub fn offset_weight(&self, dx: isize, dy: isize) -> f64 {
        let side = 2 * self.n - 1;
        let row = (self.n as isize - 1 + dx) as usize;
        let col = (self.n as isize - 1 + dy) as usize;
        self.weights[row * side + col]
    }

    /// The node-centered N×N window of the kernel, flat row-major over
    /// target coordinates. Not yet normalized; the weighted draw
    /// normalizes over exactly these entries.
    fn window_weights(&self, node: Node) -> Vec<f64> {
        let n = self.n;
        let side = 2 * n - 1;
        let mut window = Vec::with_capacity(n * n);
        for tx in 0..n {
            let row = n - 1 - node.x + tx;
            for ty in 0..n {
                let col = n - 1 - node.y + ty;
                window.push(self.weights[row * side + col]);
            }
        }
        window
    }

    /// Draw a shortcut target for `node` from its local window.
    pub fn sample_target<R: Rng>(&self, node: Node, rng: &mut R) -> Result<Node, SimError> {
        let window = self.window_weights(node);
        let dist = WeightedIndex::new(&window).map_err(|_| SimError::DegenerateDistribution)?;
        Ok(Node::from_index(dist.sample(rng), self.n))
    }
}

// ============================================================================
// Approximate radial model
// ============================================================================

/// Approximate 1D radial shortcut distribution.
///
/// Assumes exactly 4d nodes lie at Manhattan distance d (true away from
/// the boundary), giving ring weight 4d·d^(-r). Targets materialize by
/// drawing a (radius, ring position) pair from a pre-generated pool,
/// translating by the source node, and retrying with the next draw when
/// the candidate lands outside the grid. The rejection skews realized
/// shortcuts toward smaller true distances near the edge; that bias is
/// part of the model and is kept as-is.
#[derive(Debug, Clone)]
pub struct RadialModel {
    n: usize,
    r: f64,
    /// Normalized ring weights for d = 1..n-1, index d-1.
    ring_weights: Vec<f64>,
}

impl RadialModel {
    pub fn build(n: usize, r: f64) -> Result<Self, SimError> {
        if n < 2 {
            return Err(SimError::GridTooSmall { n });
        }
        if !r.is_finite() {
            return Err(SimError::BadExponent { r });
        }

        // 4d nodes per ring times d^(-r) per node
        let mut ring_weights: Vec<f64> = (1..n)
            .map(|d| 4.0 * (d as f64) * (d as f64).powf(-r))
            .collect();
        let total: f64 = ring_weights.iter().sum();
        for w in &mut ring_weights {
            *w /= total;
        }

        Ok(Self { n, r, ring_weights })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn ring_weight(&self, radius: usize) -> f64 {
        self.ring_weights[radius - 1]
    }

    /// Pre-generate `capacity` (radius, ring position) draws.
    ///
    /// The pool is shared by every shortcut sampled during one batch of
    /// trials; sizing it is the caller's job.
    pub fn fill_pool<R: Rng>(&self, rng: &mut R, capacity: usize) -> Result<DrawPool, SimError> {
        let dist =
            WeightedIndex::new(&self.ring_weights).map_err(|_| SimError::DegenerateDistribution)?;
        let draws = (0..capacity)
            .map(|_| {
                let radius = dist.sample(rng) + 1;
                let position = rng.gen_range(0..4 * radius);
                RadialDraw { radius, position }
            })
            .collect();
        Ok(DrawPool { draws, cursor: 0 })
    }

    /// Draw a shortcut target for `node`, consuming pool draws until a
    /// candidate lands inside the grid.
    pub fn sample_target(&self, node: Node, pool: &mut DrawPool) -> Result<Node, SimError> {
        loop {
            let draw = pool.next_draw()?;
            let (dx, dy) = ring_offset(draw.radius, draw.position);
            let tx = node.x as isize + dx;
            let ty = node.y as isize + dy;
            if tx >= 0 && ty >= 0 && (tx as usize) < self.n && (ty as usize) < self.n {
                return Ok(Node::new(tx as usize, ty as usize));
            }
            // Outside the grid: reject and take the next draw.
        }
    }
}

/// Map a ring position index `i ∈ [0, 4d)` to the i-th offset on the
/// Manhattan circle of radius `d`, walking the diamond starting at
/// (0, d).
pub fn ring_offset(radius: usize, position: usize) -> (isize, isize) {
    let d = radius as isize;
    let i = position as isize;
    let dy = d - i + 2 * (i - 2 * d).max(0);
    let dx = i - 2 * (i - d).max(0) + 2 * (i - 3 * d).max(0);
    (dx, dy)
}

// ============================================================================
// Draw pool
// ============================================================================

/// One pre-generated radial draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadialDraw {
    /// Manhattan radius, `1 <= radius <= n-1`.
    pub radius: usize,

    /// Ring position index, `0 <= position < 4*radius`.
    pub position: usize,
}

/// Finite pool of pre-generated radial draws, consumed in order.
///
/// Exhaustion means the caller under-provisioned the batch; it surfaces
/// as [`SimError::DrawPoolExhausted`] rather than silently topping the
/// pool up from an uncoordinated source, which would break seeded
/// reproducibility.
#[derive(Debug, Clone)]
pub struct DrawPool {
    draws: Vec<RadialDraw>,
    cursor: usize,
}

impl DrawPool {
    /// An empty pool, for configurations that never draw from it.
    pub fn empty() -> Self {
        Self {
            draws: Vec::new(),
            cursor: 0,
        }
    }

    #[cfg(test)]
    pub fn from_draws(draws: Vec<RadialDraw>) -> Self {
        Self { draws, cursor: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.draws.len()
    }

    pub fn consumed(&self) -> usize {
        self.cursor
    }

    fn next_draw(&mut self) -> Result<RadialDraw, SimError> {
        let draw = self
            .draws
            .get(self.cursor)
            .copied()
            .ok_or(SimError::DrawPoolExhausted {
                capacity: self.draws.len(),
            })?;
        self.cursor += 1;
        Ok(draw)
    }
}

// ============================================================================
// Unified model
// ============================================================================

/// Distance-biased shortcut distribution, one of two selectable variants.
///
/// Both variants answer the same question — "where does this node's
/// long-range link go?" — so shortcut storage and routing never care
/// which one is active.
#[derive(Debug, Clone)]
pub enum DistanceModel {
    Exact(ExactKernel),
    Radial(RadialModel),
}

impl DistanceModel {
    pub fn build(n: usize, r: f64, variant: Variant) -> Result<Self, SimError> {
        match variant {
            Variant::ExactKernel => Ok(DistanceModel::Exact(ExactKernel::build(n, r)?)),
            Variant::RadialApprox => Ok(DistanceModel::Radial(RadialModel::build(n, r)?)),
        }
    }

    pub fn n(&self) -> usize {
        match self {
            DistanceModel::Exact(kernel) => kernel.n(),
            DistanceModel::Radial(model) => model.n(),
        }
    }

    /// Provision the draw pool this model needs for a batch. The exact
    /// kernel draws straight from the RNG and gets an empty pool.
    pub fn provision_pool<R: Rng>(
        &self,
        rng: &mut R,
        capacity: usize,
    ) -> Result<DrawPool, SimError> {
        match self {
            DistanceModel::Exact(_) => Ok(DrawPool::empty()),
            DistanceModel::Radial(model) => model.fill_pool(rng, capacity),
        }
    }

    /// Draw a shortcut target for `node`.
    pub fn sample_target<R: Rng>(
        &self,
        node: Node,
        rng: &mut R,
        pool: &mut DrawPool,
    ) -> Result<Node, SimError> {
        match self {
            DistanceModel::Exact(kernel) => kernel.sample_target(node, rng),
            DistanceModel::Radial(model) => model.sample_target(node, pool),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kg_interface::manhattan;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::from_seed([7u8; 32])
    }

    #[test]
    fn test_kernel_sums_to_one() {
        for r in [-1.0, 0.0, 0.1, 1.0, 2.0, 10.0] {
            let kernel = ExactKernel::build(12, r).unwrap();
            let total: f64 = kernel.weights.iter().sum();
            assert!(
                (total - 1.0).abs() < 1e-9,
                "kernel for r={} sums to {}",
                r,
                total
            );
        }
    }

    #[test]
    fn test_kernel_center_excluded() {
        let kernel = ExactKernel::build(8, 2.0).unwrap();
        assert_eq!(kernel.offset_weight(0, 0), 0.0);
        assert!(kernel.offset_weight(0, 1) > 0.0);
        assert!(kernel.offset_weight(1, 0) > 0.0);
    }

    #[test]
    fn test_kernel_quadrant_symmetry() {
        let kernel = ExactKernel::build(9, 1.5).unwrap();
        for dx in 0..9isize {
            for dy in 0..9isize {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let w = kernel.offset_weight(dx, dy);
                assert_eq!(w, kernel.offset_weight(-dx, dy));
                assert_eq!(w, kernel.offset_weight(dx, -dy));
                assert_eq!(w, kernel.offset_weight(-dx, -dy));
            }
        }
    }

    #[test]
    fn test_kernel_window_sums_to_one_after_normalization() {
        // The corner window is the most truncated slice of the kernel
        let kernel = ExactKernel::build(10, 2.0).unwrap();
        let window = kernel.window_weights(Node::new(0, 0));
        assert_eq!(window.len(), 100);
        let total: f64 = window.iter().sum();
        assert!(total > 0.0 && total < 1.0);

        let normalized: f64 = window.iter().map(|w| w / total).sum();
        assert!((normalized - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_kernel_sample_in_bounds_and_not_source() {
        let kernel = ExactKernel::build(6, 2.0).unwrap();
        let mut rng = rng();
        for x in 0..6 {
            for y in 0..6 {
                let source = Node::new(x, y);
                for _ in 0..20 {
                    let target = kernel.sample_target(source, &mut rng).unwrap();
                    assert!(target.x < 6 && target.y < 6);
                    assert_ne!(target, source);
                }
            }
        }
    }

    #[test]
    fn test_kernel_rejects_bad_parameters() {
        assert_eq!(
            ExactKernel::build(1, 2.0).unwrap_err(),
            SimError::GridTooSmall { n: 1 }
        );
        assert!(matches!(
            ExactKernel::build(10, f64::NAN).unwrap_err(),
            SimError::BadExponent { .. }
        ));
    }

    #[test]
    fn test_radial_weights_sum_to_one() {
        for r in [-1.0, 0.0, 0.1, 2.0, 10.0] {
            let model = RadialModel::build(50, r).unwrap();
            let total: f64 = model.ring_weights.iter().sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_radial_ring_weight_scales_with_ring_population() {
        // At r = 0 each of the 4d ring nodes is equally likely, so ring
        // mass is proportional to d
        let model = RadialModel::build(30, 0.0).unwrap();
        assert!((model.ring_weight(2) - 2.0 * model.ring_weight(1)).abs() < 1e-12);
        assert!((model.ring_weight(10) - 10.0 * model.ring_weight(1)).abs() < 1e-12);
    }

    #[test]
    fn test_ring_offset_covers_the_full_ring() {
        for d in 1..=6usize {
            let mut seen = std::collections::HashSet::new();
            for i in 0..4 * d {
                let (dx, dy) = ring_offset(d, i);
                assert_eq!(
                    dx.unsigned_abs() + dy.unsigned_abs(),
                    d,
                    "position {} of ring {} is off the ring",
                    i,
                    d
                );
                seen.insert((dx, dy));
            }
            assert_eq!(seen.len(), 4 * d, "ring {} has duplicate positions", d);
        }
    }

    #[test]
    fn test_ring_offset_walks_the_diamond() {
        // d=1 is the unit diamond starting at (0, 1)
        assert_eq!(ring_offset(1, 0), (0, 1));
        assert_eq!(ring_offset(1, 1), (1, 0));
        assert_eq!(ring_offset(1, 2), (0, -1));
        assert_eq!(ring_offset(1, 3), (-1, 0));
    }

    #[test]
    fn test_radial_sample_in_bounds_and_not_source() {
        let model = RadialModel::build(8, 1.0).unwrap();
        let mut rng = rng();
        let mut pool = model.fill_pool(&mut rng, 4096).unwrap();
        for x in 0..8 {
            for y in 0..8 {
                let source = Node::new(x, y);
                for _ in 0..10 {
                    let target = model.sample_target(source, &mut pool).unwrap();
                    assert!(target.x < 8 && target.y < 8);
                    assert_ne!(target, source);
                }
            }
        }
    }

    #[test]
    fn test_radial_rejects_out_of_bounds_candidates() {
        let model = RadialModel::build(5, 1.0).unwrap();
        // First draw points off-grid from the corner, second is valid
        let mut pool = DrawPool::from_draws(vec![
            RadialDraw {
                radius: 2,
                position: 5, // offset (-1, -1) from (0,0): off grid
            },
            RadialDraw {
                radius: 2,
                position: 1, // offset (1, 1): in bounds
            },
        ]);

        let target = model.sample_target(Node::new(0, 0), &mut pool).unwrap();
        assert_eq!(target, Node::new(1, 1));
        assert_eq!(pool.consumed(), 2);
    }

    #[test]
    fn test_pool_exhaustion_is_fatal() {
        let model = RadialModel::build(5, 1.0).unwrap();
        let mut pool = DrawPool::empty();
        assert_eq!(
            model.sample_target(Node::new(2, 2), &mut pool).unwrap_err(),
            SimError::DrawPoolExhausted { capacity: 0 }
        );
    }

    #[test]
    fn test_radial_draws_stay_in_range() {
        let model = RadialModel::build(20, 0.5).unwrap();
        let mut rng = rng();
        let pool = model.fill_pool(&mut rng, 2000).unwrap();
        for draw in &pool.draws {
            assert!(draw.radius >= 1 && draw.radius <= 19);
            assert!(draw.position < 4 * draw.radius);
        }
    }

    #[test]
    fn test_unified_model_dispatch() {
        let mut rng = rng();
        for variant in [Variant::ExactKernel, Variant::RadialApprox] {
            let model = DistanceModel::build(10, 2.0, variant).unwrap();
            let mut pool = model.provision_pool(&mut rng, 1024).unwrap();
            let source = Node::new(4, 4);
            let target = model.sample_target(source, &mut rng, &mut pool).unwrap();
            assert_ne!(target, source);
            assert!(manhattan(source, target) >= 1);
        }
    }
}
