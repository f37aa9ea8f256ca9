//! Iterated local search over candidate arc sets.
//!
//! The route starts as a single fake arc spanning the whole request at full
//! budget. Each iteration removes an arc with high improve potential and
//! tries to rebuild its gap from the arc's CAS with a strictly higher score.
//! Successful replacements refresh the CAS of every arc whose gap or budget
//! moved.

use std::collections::HashSet;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use veloroute_core::{
    Arc, Diagnostics, EdgeSet, IterationTracker, NodeId, Path, RoadGraph, Route, RouteError,
    RouteSearch, SearchConfig, SearchError, SearchResponse, ShortestPathOracle,
};

use crate::cas::{CasEngine, candidates_by_quality_ratio};

/// CAS-driven route search.
///
/// The search value is immutable. Every [`RouteSearch::calc_path`] call owns
/// a fresh generator seeded from [`SearchConfig::seed`], so repeated calls
/// with the same inputs give the same result.
///
/// # Examples
/// ```
/// use veloroute_core::test_support::MemoryGraph;
/// use veloroute_core::{RouteSearch, SearchConfig};
/// use veloroute_solver_ils::CasSearch;
///
/// let mut graph = MemoryGraph::line(5, 10.0);
/// graph.set_priority(1, 5.0);
/// let config = SearchConfig::default()
///     .with_max_cost(50.0)
///     .with_min_road_score(1.0)
///     .with_min_road_length(1.0)
///     .with_max_iterations(5);
/// let search = CasSearch::new(&graph, &graph, config);
///
/// let response = search.calc_path(0, 4).expect("valid request");
/// assert!(response.path.found);
/// assert!(response.path.score >= 5.0);
/// assert_eq!(response.iteration_info().len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct CasSearch<G, O> {
    graph: G,
    oracle: O,
    config: SearchConfig,
}

/// Outcome of the main loop before conversion to a path.
struct Outcome {
    route: Route,
    cas_computations: u64,
    improvements: u64,
}

impl<G, O> CasSearch<G, O>
where
    G: RoadGraph,
    O: ShortestPathOracle,
{
    /// Create a search over `graph` answering shortest paths with `oracle`.
    #[must_use]
    pub const fn new(graph: G, oracle: O, config: SearchConfig) -> Self {
        Self {
            graph,
            oracle,
            config,
        }
    }

    /// The parameters every run uses.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "budgets are floating-point sums of remaining and reclaimed length"
    )]
    fn run(
        &self,
        start: NodeId,
        end: NodeId,
        tracker: &mut IterationTracker,
    ) -> Result<Outcome, SearchError> {
        let config = &self.config;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut engine = CasEngine::new(&self.graph, &self.oracle, config);
        let mut improvements = 0;

        let mut fake = Arc::fake(start, end, config.max_cost);
        fake.set_cas(engine.compute_cas(None, start, end, config.max_cost));
        log::debug!("initial CAS holds {} arcs", fake.cas().len());
        let mut route = Route::new(start, end, config.max_cost);
        route.add_arc(0, fake, &self.oracle)?;

        for iteration in 1..=config.max_iterations {
            let score = route.score();
            let pool = route.candidate_arcs_by_improve_potential(&self.oracle);
            log::debug!("iteration {iteration}: removal pool of {}", pool.len());
            let Some(target) = pool
                .choose(&mut rng)
                .and_then(|index| route.arcs().get(*index).cloned().map(|arc| (*index, arc)))
            else {
                log::warn!("iteration {iteration}: no arc to remove");
                tracker.record(score);
                continue;
            };
            let (index, arc) = target;
            let (prev, next) = route.neighbours(index).ok_or(RouteError::IndexOutOfBounds {
                index,
                len: route.len(),
            })?;

            let old_remaining = route.remaining_budget();
            let budget =
                config
                    .budget_mode
                    .scale(old_remaining + arc.cost, iteration, config.max_iterations);
            let taken: EdgeSet = route
                .arcs()
                .iter()
                .filter(|other| **other != arc)
                .map(|other| other.edge_id)
                .collect();
            let sub = self.generate_path(prev, next, budget, arc.score, arc.cas(), &taken, &mut rng);

            if !sub.is_empty() {
                let inserted = sub.len();
                route.replace_arc(&arc, sub, &self.oracle)?;
                refresh_cas(&mut engine, &mut route, &arc, index, inserted, old_remaining)?;
                improvements += 1;
                log::debug!(
                    "iteration {iteration}: replaced arc {} with {inserted} arcs, score {:.3}",
                    arc.edge_id,
                    route.score()
                );
            }
            tracker.record(score);
        }

        Ok(Outcome {
            route,
            cas_computations: engine.computations(),
            improvements,
        })
    }

    /// Build a replacement for the gap `start → end` from `pool`.
    ///
    /// Arcs with at least the mean quality ratio are drawn at random and
    /// inserted greedily until none remain or the route spends its budget.
    /// Arcs whose edge is in `taken` are never drawn. The result is returned
    /// only if its score strictly exceeds `min_score`; otherwise the route is
    /// empty.
    #[expect(
        clippy::too_many_arguments,
        reason = "the gap, budget, floor, pool, exclusions and generator are independent inputs"
    )]
    fn generate_path<R: Rng + ?Sized>(
        &self,
        start: NodeId,
        end: NodeId,
        budget: f64,
        min_score: f64,
        pool: &[Arc],
        taken: &EdgeSet,
        rng: &mut R,
    ) -> Route {
        let mut route = Route::new(start, end, budget);
        let mut candidates: Vec<Arc> = candidates_by_quality_ratio(pool)
            .into_iter()
            .filter(|arc| !taken.contains(&arc.edge_id))
            .collect();

        while !candidates.is_empty() && route.cost() < budget {
            let pick = rng.gen_range(0..candidates.len());
            let arc = candidates.remove(pick);
            route.insert_arc_at_min_path_segment(&arc, &self.oracle);
        }
        log::debug!(
            "generated {} arcs for {start} -> {end}: cost {:.1} of {budget:.1}, score {:.3}",
            route.len(),
            route.cost(),
            route.score()
        );

        if route.score() > min_score {
            route
        } else {
            Route::new(start, end, budget)
        }
    }
}

impl<G, O> RouteSearch for CasSearch<G, O>
where
    G: RoadGraph,
    O: ShortestPathOracle,
{
    fn calc_path(&self, start: NodeId, end: NodeId) -> Result<SearchResponse, SearchError> {
        self.config.validate()?;
        for node in [start, end] {
            if self.graph.coordinate(node).is_none() {
                return Err(SearchError::UnknownNode { node });
            }
        }
        let mut tracker = IterationTracker::start();
        let weighting = self.config.weighting;

        let direct = self.oracle.shortest_distance(start, end);
        if direct > self.config.max_cost {
            log::warn!(
                "shortest path {start} -> {end} of {direct:.1} m exceeds budget {:.1} m",
                self.config.max_cost
            );
            return Ok(SearchResponse {
                path: Path::fallback(&self.oracle, start, end, &weighting),
                iterations: Vec::new(),
                diagnostics: Diagnostics {
                    solve_time: tracker.elapsed(),
                    ..Diagnostics::default()
                },
            });
        }

        log::info!(
            "CAS search {start} -> {end}: budget {:.1} m, {} iterations, seed {}",
            self.config.max_cost,
            self.config.max_iterations,
            self.config.seed
        );
        let outcome = self.run(start, end, &mut tracker)?;
        let path = outcome.route.to_path(&self.oracle, &weighting);
        let solve_time: Duration = tracker.elapsed();
        log::info!(
            "CAS search finished: score {:.3}, distance {:.1} m, found {}",
            path.score,
            path.distance,
            path.found
        );

        Ok(SearchResponse {
            path,
            iterations: tracker.finish(),
            diagnostics: Diagnostics {
                solve_time,
                cas_computations: outcome.cas_computations,
                improvements: outcome.improvements,
            },
        })
    }
}

/// Refresh candidate sets after `inserted` arcs replaced `removed` at
/// `index`.
///
/// The inserted arcs and their two neighbours changed gaps, so they are
/// recomputed from their own CAS merged with the removed arc's. Every other
/// arc only saw its budget move and is updated in place.
#[expect(
    clippy::float_arithmetic,
    reason = "per-arc budgets add the route's remaining length"
)]
fn refresh_cas<G, O>(
    engine: &mut CasEngine<'_, G, O>,
    route: &mut Route,
    removed: &Arc,
    index: usize,
    inserted: usize,
    old_remaining: f64,
) -> Result<(), RouteError>
where
    G: RoadGraph + ?Sized,
    O: ShortestPathOracle + ?Sized,
{
    let new_remaining = route.remaining_budget();
    let fresh = index.saturating_sub(1)..=index + inserted;
    let mut updates = Vec::new();

    for (position, arc) in route.arcs().iter().enumerate() {
        let Some((prev, next)) = route.neighbours(position) else {
            continue;
        };
        let budget = new_remaining + arc.cost;
        let cas = if fresh.contains(&position) {
            let pool = merged_pool(arc.cas(), removed.cas());
            Some(engine.compute_cas(Some(&pool), prev, next, budget))
        } else {
            engine.update_cas(arc.cas(), prev, next, budget, old_remaining + arc.cost)
        };
        if let Some(cas) = cas {
            updates.push((position, cas));
        }
    }

    for (position, cas) in updates {
        log::debug!("arc at {position}: CAS of {}", cas.len());
        route.set_cas(position, cas)?;
    }
    Ok(())
}

/// `own` followed by the arcs of `inherited` it does not already hold.
fn merged_pool(own: &[Arc], inherited: &[Arc]) -> Vec<Arc> {
    let mut seen: HashSet<&Arc> = HashSet::new();
    own.iter()
        .chain(inherited)
        .filter(|arc| seen.insert(*arc))
        .cloned()
        .collect()
}
