//! Attractive arcs and their candidate arc sets.
//!
//! An [`Arc`] is a graph edge considered as a scored route building block.
//! Identity is the `(edge_id, base_node, adj_node)` triple; the cached
//! metrics and the candidate arc set (CAS) do not take part in equality.
//! A CAS is an owned list of independent arcs, replaced wholesale on
//! recomputation, so arcs never refer back to one another.

use std::hash::{Hash, Hasher};

use geo::Coord;

use crate::{Edge, EdgeId, NodeId, ScoreWeighting, ShortestPathOracle};

/// Edge id reserved for the placeholder arc spanning an unsolved gap.
pub const FAKE_ARC_ID: EdgeId = EdgeId::MAX;

/// A directed edge candidate carrying both cost and score.
///
/// # Examples
/// ```
/// use veloroute_core::{Arc, FAKE_ARC_ID};
///
/// let placeholder = Arc::fake(0, 9, 1_000.0);
/// assert!(placeholder.is_fake());
/// assert_eq!(placeholder.edge_id, FAKE_ARC_ID);
/// assert!(placeholder.cas().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Arc {
    /// Edge identifier, or [`FAKE_ARC_ID`] for the placeholder.
    pub edge_id: EdgeId,
    /// Node the arc starts at.
    pub base_node: NodeId,
    /// Node the arc ends at.
    pub adj_node: NodeId,
    /// Length in metres.
    pub cost: f64,
    /// Weighted desirability.
    pub score: f64,
    /// Intermediate points used for spatial containment tests.
    pub geometry: Vec<Coord<f64>>,
    quality_ratio: Option<f64>,
    improve_potential: Option<f64>,
    cas: Vec<Self>,
}

impl Arc {
    /// Construct an arc with no cached metrics and an empty CAS.
    pub const fn new(
        edge_id: EdgeId,
        base_node: NodeId,
        adj_node: NodeId,
        cost: f64,
        score: f64,
        geometry: Vec<Coord<f64>>,
    ) -> Self {
        Self {
            edge_id,
            base_node,
            adj_node,
            cost,
            score,
            geometry,
            quality_ratio: None,
            improve_potential: None,
            cas: Vec::new(),
        }
    }

    /// Build an arc from a graph edge, scoring it with `weighting`.
    pub fn from_edge(edge: &Edge, weighting: &ScoreWeighting) -> Self {
        Self::new(
            edge.id,
            edge.base,
            edge.adj,
            edge.distance,
            weighting.score_of(edge),
            edge.geometry.clone(),
        )
    }

    /// Construct the placeholder arc spanning `start` to `end` at a given cost.
    pub const fn fake(start: NodeId, end: NodeId, cost: f64) -> Self {
        Self::new(FAKE_ARC_ID, start, end, cost, 0.0, Vec::new())
    }

    /// Return whether this is the placeholder arc.
    pub const fn is_fake(&self) -> bool {
        self.edge_id == FAKE_ARC_ID
    }

    /// Cached quality ratio, if computed.
    pub const fn quality_ratio(&self) -> Option<f64> {
        self.quality_ratio
    }

    /// Cache the quality ratio.
    pub const fn set_quality_ratio(&mut self, value: f64) {
        self.quality_ratio = Some(value);
    }

    /// Cached improve potential, if computed.
    pub const fn improve_potential(&self) -> Option<f64> {
        self.improve_potential
    }

    /// Cache the improve potential.
    pub const fn set_improve_potential(&mut self, value: f64) {
        self.improve_potential = Some(value);
    }

    /// Candidate arcs considered substitutable at this arc's position.
    pub fn cas(&self) -> &[Self] {
        &self.cas
    }

    /// Replace the candidate arc set.
    pub fn set_cas(&mut self, cas: Vec<Self>) {
        self.cas = cas;
    }

    /// Length of the unrestricted shortest walk `from -> arc -> to`.
    ///
    /// Infinite when either leg is unreachable.
    pub fn path_cost<O>(&self, from: NodeId, to: NodeId, oracle: &O) -> f64
    where
        O: ShortestPathOracle + ?Sized,
    {
        oracle.shortest_distance(from, self.base_node)
            + self.cost
            + oracle.shortest_distance(self.adj_node, to)
    }

    /// Detach the arc from its CAS, keeping identity, cost, score and
    /// geometry.
    #[must_use]
    pub fn without_cas(&self) -> Self {
        Self {
            edge_id: self.edge_id,
            base_node: self.base_node,
            adj_node: self.adj_node,
            cost: self.cost,
            score: self.score,
            geometry: self.geometry.clone(),
            quality_ratio: self.quality_ratio,
            improve_potential: self.improve_potential,
            cas: Vec::new(),
        }
    }
}

impl PartialEq for Arc {
    fn eq(&self, other: &Self) -> bool {
        self.edge_id == other.edge_id
            && self.base_node == other.base_node
            && self.adj_node == other.adj_node
    }
}

impl Eq for Arc {}

impl Hash for Arc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.edge_id.hash(state);
        self.base_node.hash(state);
        self.adj_node.hash(state);
    }
}
