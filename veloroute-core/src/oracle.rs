//! Shortest-path queries between graph nodes.
//!
//! The `ShortestPathOracle` trait abstracts the host's shortest-path engine
//! (for example a contraction hierarchy). Callers receive a [`Segment`]
//! holding the traversed edges and their total distance, or `None` when the
//! target cannot be reached.

use std::collections::HashSet;

use crate::{Edge, EdgeId, NodeId};

/// Set of edge identifiers a query must not traverse.
pub type EdgeSet = HashSet<EdgeId>;

/// A shortest path between two nodes.
///
/// # Examples
/// ```
/// use veloroute_core::{Edge, Segment};
///
/// let segment = Segment::new(vec![Edge::new(1, 0, 1, 5.0, 0.0), Edge::new(2, 1, 2, 7.5, 0.0)]);
/// assert_eq!(segment.distance, 12.5);
/// assert!(Segment::empty().edges.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Segment {
    /// Total length of the traversed edges in metres.
    pub distance: f64,
    /// Traversed edges in order.
    pub edges: Vec<Edge>,
}

impl Segment {
    /// Construct a segment from ordered edges, summing their distance.
    pub fn new(edges: Vec<Edge>) -> Self {
        let distance = edges.iter().map(|edge| edge.distance).sum();
        Self { distance, edges }
    }

    /// Construct the zero-length segment joining a node to itself.
    pub const fn empty() -> Self {
        Self {
            distance: 0.0,
            edges: Vec::new(),
        }
    }

    /// Iterate over the identifiers of the traversed edges.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().map(|edge| edge.id)
    }
}

/// Answer shortest-path queries on the host graph.
///
/// Implementations must be pure functions of their arguments: identical
/// queries return identical segments. A query from a node to itself returns
/// [`Segment::empty`].
///
/// # Examples
///
/// ```rust
/// use veloroute_core::{EdgeSet, NodeId, Segment, ShortestPathOracle};
///
/// struct Nowhere;
///
/// impl ShortestPathOracle for Nowhere {
///     fn shortest_path_avoiding(
///         &self,
///         from: NodeId,
///         to: NodeId,
///         _forbidden: &EdgeSet,
///     ) -> Option<Segment> {
///         (from == to).then(Segment::empty)
///     }
/// }
///
/// assert!(Nowhere.shortest_path(1, 2).is_none());
/// assert_eq!(Nowhere.shortest_distance(1, 2), f64::INFINITY);
/// assert_eq!(Nowhere.shortest_distance(3, 3), 0.0);
/// ```
pub trait ShortestPathOracle {
    /// Return the shortest path from `from` to `to` that uses no edge in
    /// `forbidden`, or `None` when no such path exists.
    fn shortest_path_avoiding(
        &self,
        from: NodeId,
        to: NodeId,
        forbidden: &EdgeSet,
    ) -> Option<Segment>;

    /// Return the unrestricted shortest path from `from` to `to`.
    fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Segment> {
        self.shortest_path_avoiding(from, to, &EdgeSet::new())
    }

    /// Return the unrestricted shortest distance, or infinity when `to` is
    /// unreachable.
    fn shortest_distance(&self, from: NodeId, to: NodeId) -> f64 {
        self.shortest_path(from, to)
            .map_or(f64::INFINITY, |segment| segment.distance)
    }
}

impl<T: ShortestPathOracle + ?Sized> ShortestPathOracle for &T {
    fn shortest_path_avoiding(
        &self,
        from: NodeId,
        to: NodeId,
        forbidden: &EdgeSet,
    ) -> Option<Segment> {
        (**self).shortest_path_avoiding(from, to, forbidden)
    }

    fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Segment> {
        (**self).shortest_path(from, to)
    }

    fn shortest_distance(&self, from: NodeId, to: NodeId) -> f64 {
        (**self).shortest_distance(from, to)
    }
}
