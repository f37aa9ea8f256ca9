//! Flat route used by the backtracking search.

use veloroute_core::{
    Arc, EdgeId, EdgeSet, NodeId, Path, PathEdge, ScoreWeighting, ShortestPathOracle,
};

/// An ordered list of arcs with running totals and an edge blacklist.
///
/// Unlike [`Route`](veloroute_core::Route) there are no blank segments: the
/// arcs themselves form the walk. The edge set holds every arc id plus any
/// ids blacklisted from another route, so a search can refuse edges used
/// elsewhere without walking them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRoute {
    arcs: Vec<Arc>,
    edges: EdgeSet,
    cost: f64,
    score: f64,
}

impl FlatRoute {
    /// Create an empty route.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Length of the walk in metres.
    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Summed arc scores.
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Arcs in walk order.
    #[must_use]
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Number of arcs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Whether the route holds no arcs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Whether `edge_id` is walked or blacklisted.
    #[must_use]
    pub fn contains_edge(&self, edge_id: EdgeId) -> bool {
        self.edges.contains(&edge_id)
    }

    /// Append `arc` to the walk.
    pub fn push(&mut self, arc: Arc) {
        self.edges.insert(arc.edge_id);
        self.arcs.push(arc);
        self.refresh_totals();
    }

    /// Remove the last arc walking `edge_id`.
    ///
    /// The id leaves the edge set only when no other arc walks it.
    pub fn remove_edge(&mut self, edge_id: EdgeId) -> Option<Arc> {
        let index = self.arcs.iter().rposition(|arc| arc.edge_id == edge_id)?;
        self.remove_at(index)
    }

    /// Remove and return the arc at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<Arc> {
        if index >= self.arcs.len() {
            return None;
        }
        let arc = self.arcs.remove(index);
        if !self.arcs.iter().any(|other| other.edge_id == arc.edge_id) {
            self.edges.remove(&arc.edge_id);
        }
        self.refresh_totals();
        Some(arc)
    }

    /// Drop every arc and blacklisted id.
    pub fn clear(&mut self) {
        self.arcs.clear();
        self.edges.clear();
        self.refresh_totals();
    }

    /// Splice the arcs of `other` in at `index` and adopt its edge set.
    ///
    /// An `index` past the end appends.
    pub fn insert_route(&mut self, other: Self, index: usize) {
        let at = index.min(self.arcs.len());
        self.edges.extend(other.edges);
        self.arcs.splice(at..at, other.arcs);
        self.refresh_totals();
    }

    /// Blacklist every edge `other` walks or blacklists.
    pub fn blacklist(&mut self, other: &Self) {
        self.edges.extend(other.edges.iter().copied());
    }

    /// Convert the walk into a [`Path`] from `start` to `end`.
    ///
    /// An empty route gives up and yields the plain shortest path with
    /// `found = false`.
    #[must_use]
    pub fn to_path<O>(
        &self,
        start: NodeId,
        end: NodeId,
        oracle: &O,
        weighting: &ScoreWeighting,
    ) -> Path
    where
        O: ShortestPathOracle + ?Sized,
    {
        if self.arcs.is_empty() {
            return Path::fallback(oracle, start, end, weighting);
        }
        Path::new(start, end, self.arcs.iter().map(PathEdge::from).collect(), true)
    }

    fn refresh_totals(&mut self) {
        self.cost = self.arcs.iter().map(|arc| arc.cost).sum();
        self.score = self.arcs.iter().map(|arc| arc.score).sum();
    }
}
