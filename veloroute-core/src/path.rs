//! Host-displayable search results.

use crate::{Arc, Edge, EdgeId, NodeId, ScoreWeighting, Segment, ShortestPathOracle};

/// One traversed edge of a [`Path`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathEdge {
    /// Edge identifier.
    pub id: EdgeId,
    /// Node the traversal enters the edge at.
    pub base: NodeId,
    /// Node the traversal leaves the edge at.
    pub adj: NodeId,
    /// Length in metres.
    pub distance: f64,
    /// Weighted score.
    pub score: f64,
}

impl PathEdge {
    /// Describe a blank-segment edge, scoring it with `weighting`.
    pub fn from_edge(edge: &Edge, weighting: &ScoreWeighting) -> Self {
        Self {
            id: edge.id,
            base: edge.base,
            adj: edge.adj,
            distance: edge.distance,
            score: weighting.score_of(edge),
        }
    }
}

impl From<&Arc> for PathEdge {
    fn from(arc: &Arc) -> Self {
        Self {
            id: arc.edge_id,
            base: arc.base_node,
            adj: arc.adj_node,
            distance: arc.cost,
            score: arc.score,
        }
    }
}

/// An ordered edge sequence from `start` to `end` with its totals.
///
/// `found` is `false` when the search produced no scored route; the edges
/// are then the plain shortest path, or empty when even that is missing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Requested start node.
    pub start: NodeId,
    /// Requested end node.
    pub end: NodeId,
    /// Traversed edges in order.
    pub edges: Vec<PathEdge>,
    /// Total length in metres.
    pub distance: f64,
    /// Total weighted score.
    pub score: f64,
    /// Whether a scored route was produced.
    pub found: bool,
}

impl Path {
    /// Assemble a path, totalling distance and score over `edges`.
    pub fn new(start: NodeId, end: NodeId, edges: Vec<PathEdge>, found: bool) -> Self {
        Self {
            start,
            end,
            distance: edges.iter().map(|edge| edge.distance).sum(),
            score: edges.iter().map(|edge| edge.score).sum(),
            edges,
            found,
        }
    }

    /// The plain shortest path from `start` to `end`, marked not found.
    ///
    /// # Examples
    /// ```
    /// use veloroute_core::{EdgeSet, NodeId, Path, ScoreWeighting, Segment, ShortestPathOracle};
    ///
    /// struct Unreachable;
    ///
    /// impl ShortestPathOracle for Unreachable {
    ///     fn shortest_path_avoiding(&self, _: NodeId, _: NodeId, _: &EdgeSet) -> Option<Segment> {
    ///         None
    ///     }
    /// }
    ///
    /// let path = Path::fallback(&Unreachable, 1, 2, &ScoreWeighting::Raw);
    /// assert!(!path.found);
    /// assert!(path.edges.is_empty());
    /// ```
    pub fn fallback<O>(oracle: &O, start: NodeId, end: NodeId, weighting: &ScoreWeighting) -> Self
    where
        O: ShortestPathOracle + ?Sized,
    {
        let segment = oracle.shortest_path(start, end).unwrap_or_else(Segment::empty);
        let edges = segment
            .edges
            .iter()
            .map(|edge| PathEdge::from_edge(edge, weighting))
            .collect();
        Self::new(start, end, edges, false)
    }

    /// Identifiers of the traversed edges in order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().map(|edge| edge.id)
    }
}
