//! Candidate arc set (CAS) computation.
//!
//! A CAS lists the arcs that could take an arc's place in a route: given the
//! gap `(start, end)` around the arc and the budget available for it, an
//! alternative qualifies when its score and length clear the configured
//! thresholds, its geometry lies inside the gap's [`Ellipse`], and the
//! shortest walk `start → base → adj → end` fits the budget.
//!
//! Discovery is a breadth-first scan bounded by the ellipse and is the only
//! full graph scan a search performs. Later recomputations either reuse a
//! pool inherited from an earlier CAS or, when only the budget shrank,
//! filter the existing CAS in place.

use std::collections::{HashSet, VecDeque};

use veloroute_core::{
    Arc, EdgeId, Ellipse, NodeId, RoadGraph, ScoreWeighting, SearchConfig, ShortestPathOracle,
};

/// Computes and maintains candidate arc sets against one graph.
///
/// The engine counts every full computation so callers can report how much
/// work a run performed.
///
/// # Examples
/// ```
/// use veloroute_core::SearchConfig;
/// use veloroute_core::test_support::MemoryGraph;
/// use veloroute_solver_ils::CasEngine;
///
/// let mut graph = MemoryGraph::line(5, 10.0);
/// graph.set_priority(1, 5.0);
/// let config = SearchConfig::default().with_min_road_score(1.0).with_min_road_length(1.0);
/// let mut engine = CasEngine::new(&graph, &graph, &config);
///
/// let cas = engine.compute_cas(None, 0, 4, 50.0);
/// assert_eq!(cas.len(), 1);
/// assert_eq!(cas[0].edge_id, 1);
/// assert_eq!(engine.computations(), 1);
/// ```
#[derive(Debug)]
pub struct CasEngine<'a, G: ?Sized, O: ?Sized> {
    graph: &'a G,
    oracle: &'a O,
    min_road_score: f64,
    min_road_length: f64,
    weighting: ScoreWeighting,
    computations: u64,
}

impl<'a, G, O> CasEngine<'a, G, O>
where
    G: RoadGraph + ?Sized,
    O: ShortestPathOracle + ?Sized,
{
    /// Create an engine using the thresholds and weighting of `config`.
    #[must_use]
    pub const fn new(graph: &'a G, oracle: &'a O, config: &SearchConfig) -> Self {
        Self {
            graph,
            oracle,
            min_road_score: config.min_road_score,
            min_road_length: config.min_road_length,
            weighting: config.weighting,
            computations: 0,
        }
    }

    /// Number of full CAS computations performed so far.
    #[must_use]
    pub const fn computations(&self) -> u64 {
        self.computations
    }

    /// Compute the CAS for the gap `start → end` under `budget`.
    ///
    /// Without a `pool` the candidates come from a breadth-first scan inside
    /// the gap's ellipse. Each returned arc carries its quality ratio: the
    /// weighted score of the best walk through it divided by that walk's
    /// length, with `0/0` defined as `0`. Returned arcs hold no CAS of their
    /// own. A gap endpoint without a coordinate yields an empty CAS.
    #[expect(
        clippy::float_arithmetic,
        reason = "path costs and quality ratios are floating-point sums"
    )]
    pub fn compute_cas(
        &mut self,
        pool: Option<&[Arc]>,
        start: NodeId,
        end: NodeId,
        budget: f64,
    ) -> Vec<Arc> {
        self.computations += 1;
        let (Some(from), Some(to)) = (self.graph.coordinate(start), self.graph.coordinate(end))
        else {
            log::debug!("no coordinates for gap {start} -> {end}; CAS is empty");
            return Vec::new();
        };
        let ellipse = Ellipse::new(from, to, budget);
        let discovered;
        let candidates = if let Some(pool) = pool {
            pool
        } else {
            discovered = self.discover(&ellipse, start);
            discovered.as_slice()
        };

        let mut cas = Vec::new();
        for candidate in candidates {
            if !(candidate.score > self.min_road_score && candidate.cost > self.min_road_length) {
                continue;
            }
            if !candidate
                .geometry
                .iter()
                .all(|coord| ellipse.contains_coord(*coord))
            {
                continue;
            }
            let Some(head) = self.oracle.shortest_path(start, candidate.base_node) else {
                continue;
            };
            let Some(tail) = self.oracle.shortest_path(candidate.adj_node, end) else {
                continue;
            };
            let cost = head.distance + candidate.cost + tail.distance;
            if cost > budget {
                continue;
            }
            let score = self.weighting.total(&head.edges)
                + candidate.score
                + self.weighting.total(&tail.edges);
            let mut arc = candidate.without_cas();
            arc.set_quality_ratio(quality_ratio(score, cost));
            cas.push(arc);
        }
        log::debug!(
            "CAS for {start} -> {end} under {budget:.1} m: {} of {} candidates",
            cas.len(),
            candidates.len()
        );
        cas
    }

    /// Bring `cas` in line with a changed budget for the same gap.
    ///
    /// A shrinking budget filters `cas` without rescanning. A growing budget
    /// computes the CAS afresh, since arcs outside the earlier scan may now
    /// fit. An unchanged budget returns `None`.
    pub fn update_cas(
        &mut self,
        cas: &[Arc],
        start: NodeId,
        end: NodeId,
        new_budget: f64,
        old_budget: f64,
    ) -> Option<Vec<Arc>> {
        if new_budget < old_budget {
            Some(
                cas.iter()
                    .filter(|arc| arc.path_cost(start, end, self.oracle) <= new_budget)
                    .cloned()
                    .collect(),
            )
        } else if new_budget > old_budget {
            Some(self.compute_cas(None, start, end, new_budget))
        } else {
            None
        }
    }

    /// Arcs reachable from `start` through nodes inside `ellipse`.
    ///
    /// Every edge whose far end lies inside is collected once, in the
    /// direction it was first met. Nodes without coordinates count as
    /// outside. The start node is always expanded.
    fn discover(&self, ellipse: &Ellipse, start: NodeId) -> Vec<Arc> {
        let inside = |node: NodeId| {
            self.graph
                .coordinate(node)
                .is_some_and(|coord| ellipse.contains_coord(coord))
        };
        let mut collected: HashSet<EdgeId> = HashSet::new();
        let mut visited: HashSet<NodeId> = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut pool = Vec::new();

        while let Some(node) = queue.pop_front() {
            for edge in self.graph.edges_from(node) {
                if !inside(edge.adj) {
                    continue;
                }
                if collected.insert(edge.id) {
                    pool.push(Arc::from_edge(&edge, &self.weighting));
                }
                if visited.insert(edge.adj) {
                    queue.push_back(edge.adj);
                }
            }
        }
        pool
    }
}

/// Candidates whose quality ratio is at least the pool mean.
///
/// Arcs without a cached ratio count as `0`. An empty pool yields no
/// candidates.
#[expect(
    clippy::float_arithmetic,
    reason = "the mean quality ratio is a floating-point average"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "pool sizes are far below f64 integer precision"
)]
#[must_use]
pub fn candidates_by_quality_ratio(pool: &[Arc]) -> Vec<Arc> {
    if pool.is_empty() {
        return Vec::new();
    }
    let ratio = |arc: &Arc| arc.quality_ratio().unwrap_or(0.0);
    let mean = pool.iter().map(ratio).sum::<f64>() / pool.len() as f64;
    pool.iter()
        .filter(|arc| ratio(arc) >= mean)
        .cloned()
        .collect()
}

#[expect(clippy::float_arithmetic, reason = "ratio of score to length")]
fn quality_ratio(score: f64, cost: f64) -> f64 {
    let ratio = score / cost;
    if ratio.is_nan() { 0.0 } else { ratio }
}
