//! Road graph access for the search engines.
//!
//! The `RoadGraph` trait is the edge enumerator and coordinate lookup the
//! engines consume from the host graph. Storage, indexing and travel-mode
//! filtering stay behind the trait.

use geo::Coord;

/// Opaque node identifier into the host graph.
pub type NodeId = u64;

/// Opaque edge identifier into the host graph.
pub type EdgeId = u64;

/// A directed view of a road segment as enumerated from its base node.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use veloroute_core::Edge;
///
/// let edge = Edge::new(7, 1, 2, 120.0, 0.8);
/// assert_eq!(edge.id, 7);
/// assert!(edge.geometry.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Edge identifier, shared by both directions of a bidirectional road.
    pub id: EdgeId,
    /// Node the edge is enumerated from.
    pub base: NodeId,
    /// Node the edge leads to.
    pub adj: NodeId,
    /// Physical length in metres.
    pub distance: f64,
    /// Raw desirability of the road before weighting.
    pub priority: f64,
    /// Intermediate points between the two end nodes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub geometry: Vec<Coord<f64>>,
}

impl Edge {
    /// Construct a straight edge without intermediate points.
    pub const fn new(id: EdgeId, base: NodeId, adj: NodeId, distance: f64, priority: f64) -> Self {
        Self {
            id,
            base,
            adj,
            distance,
            priority,
            geometry: Vec::new(),
        }
    }

    /// Attach intermediate geometry while returning `self` for chaining.
    #[must_use]
    pub fn with_geometry(mut self, geometry: Vec<Coord<f64>>) -> Self {
        self.geometry = geometry;
        self
    }
}

/// Read-only access to the host road graph.
///
/// `edges_from` yields only edges traversable by the graph's travel mode.
/// A bidirectional road is reported from both of its nodes with the same
/// [`Edge::id`] and swapped `base`/`adj`.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use geo::Coord;
/// use veloroute_core::{Edge, NodeId, RoadGraph};
///
/// struct TwoNodes {
///     coords: HashMap<NodeId, Coord<f64>>,
/// }
///
/// impl RoadGraph for TwoNodes {
///     fn coordinate(&self, node: NodeId) -> Option<Coord<f64>> {
///         self.coords.get(&node).copied()
///     }
///
///     fn edges_from(&self, node: NodeId) -> Box<dyn Iterator<Item = Edge> + '_> {
///         match node {
///             0 => Box::new(std::iter::once(Edge::new(1, 0, 1, 10.0, 1.0))),
///             1 => Box::new(std::iter::once(Edge::new(1, 1, 0, 10.0, 1.0))),
///             _ => Box::new(std::iter::empty()),
///         }
///     }
/// }
///
/// let graph = TwoNodes {
///     coords: HashMap::from([(0, Coord { x: 0.0, y: 0.0 }), (1, Coord { x: 0.0001, y: 0.0 })]),
/// };
/// assert_eq!(graph.edges_from(0).count(), 1);
/// assert!(graph.coordinate(2).is_none());
/// ```
pub trait RoadGraph {
    /// Return the coordinate of `node`, if the graph knows it.
    fn coordinate(&self, node: NodeId) -> Option<Coord<f64>>;

    /// Enumerate the outgoing edges of `node`.
    fn edges_from(&self, node: NodeId) -> Box<dyn Iterator<Item = Edge> + '_>;
}

impl<T: RoadGraph + ?Sized> RoadGraph for &T {
    fn coordinate(&self, node: NodeId) -> Option<Coord<f64>> {
        (**self).coordinate(node)
    }

    fn edges_from(&self, node: NodeId) -> Box<dyn Iterator<Item = Edge> + '_> {
        (**self).edges_from(node)
    }
}
