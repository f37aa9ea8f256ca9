//! Test-only, in-memory road graph used by unit, behaviour and benchmark
//! code.
//!
//! Nodes sit on a flat metre grid laid over the equator, so one grid metre
//! east or north maps to the same great-circle distance on the sphere used
//! by [`Ellipse`](crate::Ellipse). Road lengths are measured with the same
//! haversine formula, which keeps ellipse pruning exact for these graphs.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::f64::consts::PI;

use geo::{Coord, Distance, Haversine, Point};

use crate::{Edge, EdgeId, EdgeSet, NodeId, RoadGraph, Segment, ShortestPathOracle};

/// Great-circle metres per degree on the mean Earth sphere.
pub const METRES_PER_DEGREE: f64 = 6_371_008.8 * PI / 180.0;

/// Coordinate `east` and `north` metres from the grid origin.
pub fn grid_coord(east: f64, north: f64) -> Coord<f64> {
    Coord {
        x: east / METRES_PER_DEGREE,
        y: north / METRES_PER_DEGREE,
    }
}

/// In-memory bidirectional road graph answering shortest-path queries with
/// Dijkstra's algorithm.
///
/// Edge enumeration follows insertion order, so searches over the graph are
/// reproducible.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    coords: HashMap<NodeId, Coord<f64>>,
    adjacency: HashMap<NodeId, Vec<Edge>>,
    next_edge: EdgeId,
}

impl MemoryGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `node` at grid position (`east`, `north`) in metres.
    pub fn add_node(&mut self, node: NodeId, east: f64, north: f64) {
        self.coords.insert(node, grid_coord(east, north));
        self.adjacency.entry(node).or_default();
    }

    /// Join two placed nodes with a two-way road and return its edge id.
    ///
    /// The road length is the great-circle distance between the nodes.
    /// Unknown nodes give a zero-length road.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, priority: f64) -> EdgeId {
        let distance = match (self.coords.get(&a), self.coords.get(&b)) {
            (Some(ca), Some(cb)) => Haversine.distance(Point::from(*ca), Point::from(*cb)),
            _ => 0.0,
        };
        self.add_road_with_distance(a, b, distance, priority)
    }

    /// Join two nodes with a two-way road of an explicit length.
    pub fn add_road_with_distance(
        &mut self,
        a: NodeId,
        b: NodeId,
        distance: f64,
        priority: f64,
    ) -> EdgeId {
        let id = self.next_edge;
        self.next_edge += 1;
        self.adjacency
            .entry(a)
            .or_default()
            .push(Edge::new(id, a, b, distance, priority));
        self.adjacency
            .entry(b)
            .or_default()
            .push(Edge::new(id, b, a, distance, priority));
        id
    }

    /// Set the priority of both directions of road `id`.
    pub fn set_priority(&mut self, id: EdgeId, priority: f64) {
        for edges in self.adjacency.values_mut() {
            for edge in edges.iter_mut().filter(|edge| edge.id == id) {
                edge.priority = priority;
            }
        }
    }

    /// Attach a polyline to both directions of road `id`.
    pub fn set_geometry(&mut self, id: EdgeId, geometry: &[Coord<f64>]) {
        for edges in self.adjacency.values_mut() {
            for edge in edges.iter_mut().filter(|edge| edge.id == id) {
                edge.geometry = geometry.to_vec();
            }
        }
    }

    /// Set every road's priority from its edge id.
    pub fn set_priorities_with(&mut self, mut priority: impl FnMut(EdgeId) -> f64) {
        for id in 0..self.next_edge {
            self.set_priority(id, priority(id));
        }
    }

    /// Edge id of the road from `a` to `b`, if any.
    pub fn road_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.adjacency
            .get(&a)?
            .iter()
            .find(|edge| edge.adj == b)
            .map(|edge| edge.id)
    }

    /// The edge `id` as enumerated from `base`.
    pub fn edge(&self, base: NodeId, id: EdgeId) -> Option<Edge> {
        self.adjacency
            .get(&base)?
            .iter()
            .find(|edge| edge.id == id)
            .cloned()
    }

    /// Number of distinct roads.
    pub const fn road_count(&self) -> u64 {
        self.next_edge
    }

    /// Nodes `0..len` spaced `spacing` metres apart along the equator and
    /// joined by zero-priority roads.
    pub fn line(len: u64, spacing: f64) -> Self {
        let mut graph = Self::new();
        for node in 0..len {
            graph.add_node(node, node as f64 * spacing, 0.0);
        }
        for node in 1..len {
            graph.add_road(node - 1, node, 0.0);
        }
        graph
    }

    /// A `cols` by `rows` lattice with `spacing` metres between neighbours.
    ///
    /// Node `row * cols + col` sits at (`col * spacing`, `row * spacing`).
    /// Roads run east-west before north-south and start with zero priority.
    pub fn grid(cols: u64, rows: u64, spacing: f64) -> Self {
        let mut graph = Self::new();
        for row in 0..rows {
            for col in 0..cols {
                graph.add_node(row * cols + col, col as f64 * spacing, row as f64 * spacing);
            }
        }
        for row in 0..rows {
            for col in 1..cols {
                graph.add_road(row * cols + col - 1, row * cols + col, 0.0);
            }
        }
        for row in 1..rows {
            for col in 0..cols {
                graph.add_road((row - 1) * cols + col, row * cols + col, 0.0);
            }
        }
        graph
    }
}

impl RoadGraph for MemoryGraph {
    fn coordinate(&self, node: NodeId) -> Option<Coord<f64>> {
        self.coords.get(&node).copied()
    }

    fn edges_from(&self, node: NodeId) -> Box<dyn Iterator<Item = Edge> + '_> {
        match self.adjacency.get(&node) {
            Some(edges) => Box::new(edges.iter().cloned()),
            None => Box::new(std::iter::empty()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Frontier {
    distance: f64,
    node: NodeId,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; node id breaks ties.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl ShortestPathOracle for MemoryGraph {
    fn shortest_path_avoiding(
        &self,
        from: NodeId,
        to: NodeId,
        forbidden: &EdgeSet,
    ) -> Option<Segment> {
        if from == to {
            return Some(Segment::empty());
        }
        let mut best: HashMap<NodeId, f64> = HashMap::from([(from, 0.0)]);
        let mut via: HashMap<NodeId, Edge> = HashMap::new();
        let mut heap = BinaryHeap::from([Frontier {
            distance: 0.0,
            node: from,
        }]);

        while let Some(Frontier { distance, node }) = heap.pop() {
            if node == to {
                break;
            }
            if best.get(&node).is_some_and(|known| distance > *known) {
                continue;
            }
            for edge in self.adjacency.get(&node).into_iter().flatten() {
                if forbidden.contains(&edge.id) {
                    continue;
                }
                let candidate = distance + edge.distance;
                if best.get(&edge.adj).is_none_or(|known| candidate < *known) {
                    best.insert(edge.adj, candidate);
                    via.insert(edge.adj, edge.clone());
                    heap.push(Frontier {
                        distance: candidate,
                        node: edge.adj,
                    });
                }
            }
        }

        let mut edges = Vec::new();
        let mut cursor = to;
        while cursor != from {
            let edge = via.get(&cursor)?;
            cursor = edge.base;
            edges.push(edge.clone());
        }
        edges.reverse();
        Some(Segment::new(edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn line_roads_measure_their_spacing() {
        let graph = MemoryGraph::line(3, 10.0);
        let segment = graph.shortest_path(0, 2).expect("reachable");
        assert_eq!(segment.edge_ids().collect::<Vec<_>>(), vec![0, 1]);
        assert!((segment.distance - 20.0).abs() < 1e-6);
    }

    #[rstest]
    fn forbidden_edges_force_a_detour() {
        let graph = MemoryGraph::grid(2, 2, 10.0);
        let direct = graph.road_between(0, 1).expect("road");
        let segment = graph
            .shortest_path_avoiding(0, 1, &EdgeSet::from([direct]))
            .expect("detour");
        assert_eq!(segment.edges.len(), 3);
        assert!((segment.distance - 30.0).abs() < 1e-6);
    }

    #[rstest]
    fn unreachable_target_yields_none() {
        let graph = MemoryGraph::line(2, 10.0);
        assert!(graph.shortest_path_avoiding(0, 1, &EdgeSet::from([0])).is_none());
        assert_eq!(graph.shortest_distance(0, 7), f64::INFINITY);
    }

    #[rstest]
    fn roads_are_enumerated_from_both_ends() {
        let mut graph = MemoryGraph::line(2, 10.0);
        graph.set_priority(0, 0.9);
        let forward = graph.edge(0, 0).expect("forward");
        let backward = graph.edge(1, 0).expect("backward");
        assert_eq!((forward.base, forward.adj), (0, 1));
        assert_eq!((backward.base, backward.adj), (1, 0));
        assert_eq!(backward.priority, 0.9);
    }
}
