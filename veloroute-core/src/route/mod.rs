//! Mutable route of attractive arcs joined by blank segments.
//!
//! A non-empty [`Route`] with `n` arcs holds `n + 1` blank segments:
//! segment `i` runs from the end of arc `i - 1` (or the route start) to the
//! base of arc `i` (or the route end). An empty route holds no segments.
//! Each edit computes its new blank segments with a blacklist of the edges
//! the route already uses, so an edit never routes over a road twice.
//!
//! Cost and score totals are recomputed from the parts after every edit, so
//! `cost == Σ arc.cost + Σ segment.distance` and `score == Σ arc.score` hold
//! exactly between calls.

use crate::{
    Arc, EdgeSet, NodeId, Path, PathEdge, RouteError, ScoreWeighting, Segment, ShortestPathOracle,
};

/// Ordered attractive arcs between a start and an end node under a budget.
///
/// The shortest-path oracle is passed to each edit rather than stored, so a
/// route is a plain value that can be cloned and compared freely.
///
/// # Examples
/// ```
/// use veloroute_core::{Arc, EdgeSet, NodeId, Route, Segment, ShortestPathOracle};
///
/// // Every node pair is joined by an empty segment.
/// struct Teleport;
///
/// impl ShortestPathOracle for Teleport {
///     fn shortest_path_avoiding(&self, _: NodeId, _: NodeId, _: &EdgeSet) -> Option<Segment> {
///         Some(Segment::empty())
///     }
/// }
///
/// # fn main() -> Result<(), veloroute_core::RouteError> {
/// let mut route = Route::new(0, 9, 100.0);
/// route.add_arc(0, Arc::new(1, 2, 3, 40.0, 2.0, Vec::new()), &Teleport)?;
/// assert_eq!(route.cost(), 40.0);
/// assert_eq!(route.remaining_budget(), 60.0);
/// assert_eq!(route.segments().len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    start: NodeId,
    end: NodeId,
    max_cost: f64,
    arcs: Vec<Arc>,
    segments: Vec<Segment>,
    cost: f64,
    score: f64,
}

impl Route {
    /// Create an empty route from `start` to `end` with a length budget.
    pub const fn new(start: NodeId, end: NodeId, max_cost: f64) -> Self {
        Self {
            start,
            end,
            max_cost,
            arcs: Vec::new(),
            segments: Vec::new(),
            cost: 0.0,
            score: 0.0,
        }
    }

    /// Route start node.
    pub const fn start(&self) -> NodeId {
        self.start
    }

    /// Route end node.
    pub const fn end(&self) -> NodeId {
        self.end
    }

    /// Length budget in metres.
    pub const fn max_cost(&self) -> f64 {
        self.max_cost
    }

    /// Total length of arcs and blank segments.
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Total arc score.
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Budget left after the current cost.
    pub fn remaining_budget(&self) -> f64 {
        self.max_cost - self.cost
    }

    /// Selected arcs in order.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Blank segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Whether the route holds no arcs.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Whether `arc` is part of the route.
    pub fn contains(&self, arc: &Arc) -> bool {
        self.arcs.contains(arc)
    }

    /// Position of `arc` in the route.
    pub fn index_of(&self, arc: &Arc) -> Result<usize, RouteError> {
        self.arcs
            .iter()
            .position(|candidate| candidate == arc)
            .ok_or(RouteError::ArcNotInRoute {
                edge_id: arc.edge_id,
            })
    }

    /// Every edge id the route uses, arcs and blank segments alike.
    pub fn edge_ids(&self) -> EdgeSet {
        self.arcs
            .iter()
            .map(|arc| arc.edge_id)
            .chain(self.segments.iter().flat_map(Segment::edge_ids))
            .collect()
    }

    /// Node preceding `arc`: the previous arc's end, or the route start.
    pub fn prev_node(&self, arc: &Arc) -> Result<NodeId, RouteError> {
        let index = self.index_of(arc)?;
        Ok(self.gap_start(index))
    }

    /// Node following `arc`: the next arc's base, or the route end.
    pub fn next_node(&self, arc: &Arc) -> Result<NodeId, RouteError> {
        let index = self.index_of(arc)?;
        Ok(self.gap_end(index + 1))
    }

    /// The previous and next nodes around the arc at `index`.
    pub fn neighbours(&self, index: usize) -> Option<(NodeId, NodeId)> {
        (index < self.len()).then(|| (self.gap_start(index), self.gap_end(index + 1)))
    }

    /// Replace the CAS of the arc at `index`.
    pub fn set_cas(&mut self, index: usize, cas: Vec<Arc>) -> Result<(), RouteError> {
        let len = self.len();
        let arc = self
            .arcs
            .get_mut(index)
            .ok_or(RouteError::IndexOutOfBounds { index, len })?;
        arc.set_cas(cas);
        Ok(())
    }

    /// Insert `arc` at `index`, rebuilding the blank segments either side.
    ///
    /// The segment previously spanning the gap is replaced by a segment from
    /// the gap start to the arc's base and one from the arc's end to the gap
    /// end. Neither may reuse an edge already in the route.
    ///
    /// # Errors
    /// [`RouteError::IndexOutOfBounds`] when `index > len`, and
    /// [`RouteError::SegmentNotFound`] when a new segment is unreachable.
    pub fn add_arc<O>(&mut self, index: usize, arc: Arc, oracle: &O) -> Result<(), RouteError>
    where
        O: ShortestPathOracle + ?Sized,
    {
        self.check_insert_index(index)?;
        let (head, tail) = self.bridge(index, &arc, self.gap_blacklist(index), oracle)?;
        self.splice_arc(index, arc, head, tail);
        Ok(())
    }

    /// Remove `arc` and its two bordering segments, returning its index.
    ///
    /// When arcs remain, one segment joins the enlarged gap. The removed
    /// arc's edge may be reused by that segment.
    ///
    /// # Errors
    /// [`RouteError::ArcNotInRoute`] when the arc is absent, and
    /// [`RouteError::SegmentNotFound`] when the joining segment is
    /// unreachable.
    pub fn remove_arc<O>(&mut self, arc: &Arc, oracle: &O) -> Result<usize, RouteError>
    where
        O: ShortestPathOracle + ?Sized,
    {
        let index = self.index_of(arc)?;
        self.arcs.remove(index);
        self.segments.drain(index..=index + 1);
        if !self.arcs.is_empty() {
            let (from, to) = (self.gap_start(index), self.gap_end(index));
            let joint = oracle
                .shortest_path_avoiding(from, to, &self.edge_ids())
                .ok_or(RouteError::SegmentNotFound { from, to })?;
            self.segments.insert(index, joint);
        }
        self.refresh_totals();
        Ok(index)
    }

    /// Splice the arcs and segments of `sub` into the gap at `index`.
    ///
    /// `sub` must run from the gap start to the gap end. The segment that
    /// spanned the gap is dropped. An empty `sub` leaves the route unchanged.
    ///
    /// # Errors
    /// [`RouteError::IndexOutOfBounds`] when `index > len`.
    pub fn insert_route(&mut self, index: usize, sub: Self) -> Result<(), RouteError> {
        self.check_insert_index(index)?;
        if sub.is_empty() {
            return Ok(());
        }
        let drop_gap = usize::from(!self.is_empty());
        self.segments.splice(index..index + drop_gap, sub.segments);
        self.arcs.splice(index..index, sub.arcs);
        self.refresh_totals();
        Ok(())
    }

    /// Swap `arc` for the arcs of `sub`, returning the arc's former index.
    ///
    /// The arc and both bordering segments give way to the arcs and
    /// segments of `sub`, which must span from [`Route::prev_node`] to
    /// [`Route::next_node`] of the arc. Equivalent to [`Route::remove_arc`]
    /// followed by [`Route::insert_route`], without computing the joining
    /// segment the insertion would discard. An empty `sub` degrades to
    /// [`Route::remove_arc`].
    pub fn replace_arc<O>(&mut self, arc: &Arc, sub: Self, oracle: &O) -> Result<usize, RouteError>
    where
        O: ShortestPathOracle + ?Sized,
    {
        if sub.is_empty() {
            return self.remove_arc(arc, oracle);
        }
        let index = self.index_of(arc)?;
        self.segments.splice(index..=index + 1, sub.segments);
        self.arcs.splice(index..=index, sub.arcs);
        self.refresh_totals();
        Ok(index)
    }

    /// Greedily insert `arc` into the shortest blank segment if it fits.
    ///
    /// On an empty route the arc must fit the whole budget. Otherwise the
    /// detour through the first shortest segment must fit the remaining
    /// budget plus that segment's length. Arcs whose edge the route already
    /// uses outside that segment are skipped. Returns whether the arc was
    /// inserted.
    pub fn insert_arc_at_min_path_segment<O>(&mut self, arc: &Arc, oracle: &O) -> bool
    where
        O: ShortestPathOracle + ?Sized,
    {
        let mut index = 0;
        let mut replaced = 0.0;
        for (i, segment) in self.segments.iter().enumerate() {
            if i == 0 || segment.distance < replaced {
                index = i;
                replaced = segment.distance;
            }
        }

        let blacklist = self.gap_blacklist(index);
        if blacklist.contains(&arc.edge_id) {
            return false;
        }
        let Ok((head, tail)) = self.bridge(index, arc, blacklist, oracle) else {
            return false;
        };
        if head.distance + arc.cost + tail.distance > self.remaining_budget() + replaced {
            return false;
        }
        self.splice_arc(index, arc.clone(), head, tail);
        true
    }

    /// Indices of arcs whose improve potential is at least the route mean.
    ///
    /// Improve potential is the summed score gain over the arc's CAS divided
    /// by the cost headroom between the costliest CAS alternative and the
    /// arc itself, all measured across the arc's own gap. NaN, negative and
    /// zero values are cached as `+0.0`. Each arc caches its potential.
    pub fn candidate_arcs_by_improve_potential<O>(&mut self, oracle: &O) -> Vec<usize>
    where
        O: ShortestPathOracle + ?Sized,
    {
        for index in 0..self.arcs.len() {
            let (from, to) = (self.gap_start(index), self.gap_end(index + 1));
            if let Some(arc) = self.arcs.get_mut(index) {
                let potential = improve_potential(arc, from, to, oracle);
                arc.set_improve_potential(potential);
            }
        }

        let potentials: Vec<f64> = self
            .arcs
            .iter()
            .map(|arc| arc.improve_potential().unwrap_or(0.0))
            .collect();
        let mean = mean(&potentials);
        potentials
            .iter()
            .enumerate()
            .filter(|(_, potential)| **potential >= mean)
            .map(|(index, _)| index)
            .collect()
    }

    /// Convert the route into a host-displayable [`Path`].
    ///
    /// A route that is empty or still holds the fake arc yields the plain
    /// shortest path with `found = false`.
    pub fn to_path<O>(&self, oracle: &O, weighting: &ScoreWeighting) -> Path
    where
        O: ShortestPathOracle + ?Sized,
    {
        if self.is_empty() || self.arcs.iter().any(Arc::is_fake) {
            return Path::fallback(oracle, self.start, self.end, weighting);
        }
        let mut edges = Vec::new();
        for (index, segment) in self.segments.iter().enumerate() {
            edges.extend(
                segment
                    .edges
                    .iter()
                    .map(|edge| PathEdge::from_edge(edge, weighting)),
            );
            if let Some(arc) = self.arcs.get(index) {
                edges.push(PathEdge::from(arc));
            }
        }
        let path = Path::new(self.start, self.end, edges, true);
        log::debug!("route distance {} score {}", path.distance, path.score);
        path
    }

    fn check_insert_index(&self, index: usize) -> Result<(), RouteError> {
        let len = self.len();
        if index > len {
            return Err(RouteError::IndexOutOfBounds { index, len });
        }
        Ok(())
    }

    /// Node a blank segment at `index` starts from.
    fn gap_start(&self, index: usize) -> NodeId {
        index
            .checked_sub(1)
            .and_then(|prev| self.arcs.get(prev))
            .map_or(self.start, |arc| arc.adj_node)
    }

    /// Node a blank segment at `index` ends at.
    fn gap_end(&self, index: usize) -> NodeId {
        self.arcs.get(index).map_or(self.end, |arc| arc.base_node)
    }

    /// Route edges excluding those of the segment at `index`.
    fn gap_blacklist(&self, index: usize) -> EdgeSet {
        self.arcs
            .iter()
            .map(|arc| arc.edge_id)
            .chain(
                self.segments
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != index)
                    .flat_map(|(_, segment)| segment.edge_ids()),
            )
            .collect()
    }

    /// Segments from the gap start to `arc` and from `arc` to the gap end.
    fn bridge<O>(
        &self,
        index: usize,
        arc: &Arc,
        mut blacklist: EdgeSet,
        oracle: &O,
    ) -> Result<(Segment, Segment), RouteError>
    where
        O: ShortestPathOracle + ?Sized,
    {
        let (from, to) = (self.gap_start(index), self.gap_end(index));
        blacklist.insert(arc.edge_id);
        let head = oracle
            .shortest_path_avoiding(from, arc.base_node, &blacklist)
            .ok_or(RouteError::SegmentNotFound {
                from,
                to: arc.base_node,
            })?;
        blacklist.extend(head.edge_ids());
        let tail = oracle
            .shortest_path_avoiding(arc.adj_node, to, &blacklist)
            .ok_or(RouteError::SegmentNotFound {
                from: arc.adj_node,
                to,
            })?;
        Ok((head, tail))
    }

    fn splice_arc(&mut self, index: usize, arc: Arc, head: Segment, tail: Segment) {
        let drop_gap = usize::from(!self.is_empty());
        self.segments.splice(index..index + drop_gap, [head, tail]);
        self.arcs.insert(index, arc);
        self.refresh_totals();
    }

    fn refresh_totals(&mut self) {
        self.cost = self.arcs.iter().map(|arc| arc.cost).sum::<f64>()
            + self
                .segments
                .iter()
                .map(|segment| segment.distance)
                .sum::<f64>();
        self.score = self.arcs.iter().map(|arc| arc.score).sum();
    }
}

fn improve_potential<O>(arc: &Arc, from: NodeId, to: NodeId, oracle: &O) -> f64
where
    O: ShortestPathOracle + ?Sized,
{
    let own = arc.path_cost(from, to, oracle);
    let (gain, costliest) = arc
        .cas()
        .iter()
        .fold((0.0, 0.0_f64), |(gain, costliest), candidate| {
            (
                gain + candidate.score - arc.score,
                costliest.max(candidate.path_cost(from, to, oracle)),
            )
        });
    let value = gain / (costliest - own);
    if value.is_nan() || value <= 0.0 {
        0.0
    } else {
        value
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
