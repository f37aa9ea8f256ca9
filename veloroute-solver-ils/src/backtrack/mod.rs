//! Iterated local search by depth-bounded backtracking.
//!
//! The route is a [`FlatRoute`] of arcs. A sliding window `[a, a + r)` of
//! arc positions is cut out each iteration and the gap it leaves is searched
//! again by a randomized depth-first walk that must beat the removed score.
//! Success resets the window; failure widens it. There is no CAS and no
//! geometric pruning: the depth cap, the window and the shortest-distance
//! bound keep the search finite.

mod route;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use veloroute_core::{
    Arc, Diagnostics, Edge, IterationTracker, NodeId, RoadGraph, RouteSearch, SearchConfig,
    SearchError, SearchResponse, ShortestPathOracle,
};

pub use route::FlatRoute;

/// Backtracking route search.
///
/// Like [`CasSearch`](crate::CasSearch) the value is immutable and every run
/// seeds its own generator, so runs are reproducible.
///
/// # Examples
/// ```
/// use veloroute_core::test_support::MemoryGraph;
/// use veloroute_core::{RouteSearch, SearchConfig};
/// use veloroute_solver_ils::BacktrackSearch;
///
/// let mut graph = MemoryGraph::line(5, 10.0);
/// graph.set_priority(1, 5.0);
/// let config = SearchConfig::default().with_max_cost(50.0).with_max_iterations(5);
/// let search = BacktrackSearch::new(&graph, &graph, config);
///
/// let response = search.calc_path(0, 4).expect("valid request");
/// assert!(response.path.found);
/// assert_eq!(response.path.score, 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct BacktrackSearch<G, O> {
    graph: G,
    oracle: O,
    config: SearchConfig,
}

/// A gap cut from the route.
struct Cut {
    index: usize,
    from: NodeId,
    to: NodeId,
    removed_score: f64,
}

impl<G, O> BacktrackSearch<G, O>
where
    G: RoadGraph,
    O: ShortestPathOracle,
{
    /// Create a search over `graph` answering distances with `oracle`.
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

    /// Search for an initial walk; an unsuccessful search leaves it empty.
    fn initialize(&self, start: NodeId, end: NodeId, rng: &mut ChaCha8Rng) -> FlatRoute {
        let mut route = FlatRoute::new();
        let found = self.local_search(
            &mut route,
            start,
            end,
            self.config.max_cost,
            0.0,
            self.config.max_depth,
            rng,
        );
        if !found {
            log::debug!("no initial walk from {start} to {end}");
            route.clear();
        }
        route
    }

    /// Extend `route` from `from` until it reaches `to`.
    ///
    /// Outgoing edges are tried in shuffled order. An edge is skipped when
    /// the route already walks or blacklists it, or when the shortest
    /// distance from its far end to `to` meets the budget left after taking
    /// it. The walk succeeds on reaching `to` with at least the minimum
    /// length and a score strictly above `min_score`. Failed edges are
    /// backtracked, so on failure `route` is as it was.
    #[expect(
        clippy::too_many_arguments,
        reason = "the recursion threads route, gap, budget, floor, depth and generator"
    )]
    #[expect(
        clippy::float_arithmetic,
        reason = "the remaining budget is a floating-point difference"
    )]
    fn local_search(
        &self,
        route: &mut FlatRoute,
        from: NodeId,
        to: NodeId,
        budget: f64,
        min_score: f64,
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> bool {
        if depth == 0 {
            return false;
        }
        let mut edges: Vec<Edge> = self.graph.edges_from(from).collect();
        edges.shuffle(rng);

        for edge in edges {
            if route.contains_edge(edge.id) {
                continue;
            }
            let remaining = budget - edge.distance;
            if self.oracle.shortest_distance(edge.adj, to) >= remaining {
                continue;
            }
            route.push(Arc::from_edge(&edge, &self.config.weighting));
            if edge.adj == to && route.cost() >= self.config.min_cost && route.score() > min_score
            {
                return true;
            }
            if self.local_search(route, edge.adj, to, remaining, min_score, depth - 1, rng) {
                return true;
            }
            route.remove_edge(edge.id);
        }
        false
    }

    /// Remove the window `[a, a + r)` from `route`.
    ///
    /// The cut runs from the first removed arc's base to the last removed
    /// arc's end. An empty route is cut along the whole request.
    #[expect(
        clippy::float_arithmetic,
        reason = "the removed score is a floating-point sum"
    )]
    fn cut(route: &mut FlatRoute, start: NodeId, end: NodeId, a: usize, r: usize) -> Cut {
        let index = a.saturating_sub(1);
        let mut cut = Cut {
            index: if route.is_empty() { 0 } else { index },
            from: start,
            to: end,
            removed_score: 0.0,
        };
        for position in 0..r {
            let Some(arc) = route.remove_at(index) else {
                break;
            };
            if position == 0 {
                cut.from = arc.base_node;
            }
            cut.to = arc.adj_node;
            cut.removed_score += arc.score;
        }
        cut
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the sub-route budget subtracts the kept length"
    )]
    fn run(
        &self,
        start: NodeId,
        end: NodeId,
        tracker: &mut IterationTracker,
    ) -> (FlatRoute, u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let mut solution = self.initialize(start, end, &mut rng);
        log::debug!(
            "initial walk of {} arcs, score {:.3}",
            solution.len(),
            solution.score()
        );
        let (mut a, mut r) = (1, 1);
        let mut improvements = 0;

        for iteration in 1..=self.config.max_iterations {
            let score = solution.score();
            let mut trial = solution.clone();
            (a, r) = clamp_window(a, r, trial.len());
            let cut = Self::cut(&mut trial, start, end, a, r);

            let mut fresh = FlatRoute::new();
            fresh.blacklist(&trial);
            let found = self.local_search(
                &mut fresh,
                cut.from,
                cut.to,
                self.config.max_cost - trial.cost(),
                cut.removed_score,
                self.config.max_depth,
                &mut rng,
            );
            if found {
                log::debug!(
                    "iteration {iteration}: window [{a}, {}) rebuilt with {} arcs",
                    a + r,
                    fresh.len()
                );
                trial.insert_route(fresh, cut.index);
                solution = trial;
                (a, r) = (1, 1);
                improvements += 1;
            } else {
                a += 1;
                r += 1;
            }
            tracker.record(score);
        }
        (solution, improvements)
    }
}

impl<G, O> RouteSearch for BacktrackSearch<G, O>
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
        log::info!(
            "backtracking search {start} -> {end}: budget {:.1} m, depth {}, seed {}",
            self.config.max_cost,
            self.config.max_depth,
            self.config.seed
        );
        let mut tracker = IterationTracker::start();
        let (route, improvements) = self.run(start, end, &mut tracker);
        let path = route.to_path(start, end, &self.oracle, &self.config.weighting);
        let solve_time = tracker.elapsed();
        log::info!(
            "backtracking search finished: score {:.3}, distance {:.1} m, found {}",
            path.score,
            path.distance,
            path.found
        );

        Ok(SearchResponse {
            path,
            iterations: tracker.finish(),
            diagnostics: Diagnostics {
                solve_time,
                cas_computations: 0,
                improvements,
            },
        })
    }
}

/// Fit the 1-based window `[a, a + r)` to a route of `size` arcs.
///
/// A window longer than the route shrinks to one arc; a window starting
/// past the end restarts at the first arc; otherwise the window is trimmed
/// to end at the last arc.
const fn clamp_window(a: usize, r: usize, size: usize) -> (usize, usize) {
    let width = if r > size { 1 } else { r };
    if a > size {
        (1, 1)
    } else {
        let room = size + 1 - a;
        (a, if width < room { width } else { room })
    }
}
