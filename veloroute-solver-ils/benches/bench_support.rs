//! Benchmark support utilities for the route searches.
//!
//! Provides deterministic weighted grids and budgets relative to the
//! shortest path so benchmark runs are reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use veloroute_core::test_support::MemoryGraph;
use veloroute_core::{NodeId, ShortestPathOracle};

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Distance between neighbouring grid nodes in metres.
pub const GRID_SPACING: f64 = 100.0;

/// Share of roads that carry a positive priority.
const SCORED_SHARE: f64 = 0.3;

/// Largest priority a scored road receives.
const MAX_PRIORITY: f64 = 5.0;

/// Generate a `side` by `side` grid with seeded road priorities.
///
/// Roughly [`SCORED_SHARE`] of the roads score between `1` and
/// [`MAX_PRIORITY`]; the rest score nothing.
#[must_use]
pub fn generate_weighted_grid(side: u64, seed: u64) -> MemoryGraph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut graph = MemoryGraph::grid(side, side, GRID_SPACING);
    graph.set_priorities_with(|_| {
        if rng.gen_bool(SCORED_SHARE) {
            rng.gen_range(1.0..MAX_PRIORITY)
        } else {
            0.0
        }
    });
    graph
}

/// Opposite corners of a `side` by `side` grid.
#[must_use]
pub fn corner_request(side: u64) -> (NodeId, NodeId) {
    (0, side * side - 1)
}

/// `factor` times the shortest distance from `start` to `end`.
#[must_use]
pub fn budget_for(graph: &MemoryGraph, start: NodeId, end: NodeId, factor: f64) -> f64 {
    #[expect(clippy::float_arithmetic, reason = "Required for budget scaling")]
    let budget = graph.shortest_distance(start, end) * factor;
    budget
}
