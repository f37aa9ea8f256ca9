//! Shared utilities for golden route tests.
//!
//! This module contains the fixture format and helpers used by both the
//! rstest parameterised tests and the BDD behavioural tests.
//!
//! # Road numbering
//!
//! Roads receive edge ids in the order they are listed, starting from `0`,
//! so `expected.edge_ids` refers to positions in the `roads` array.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use veloroute_core::test_support::MemoryGraph;
use veloroute_core::{NodeId, RouteSearch, SearchConfig, SearchError, SearchResponse};
use veloroute_solver_ils::{BacktrackSearch, CasSearch};

/// Deserialised golden route test case.
#[derive(Debug, Deserialize, Clone)]
#[expect(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    reason = "fields are used by some test binaries but not others"
)]
pub struct GoldenRoute {
    /// Name of the test case (used in error messages).
    #[allow(dead_code)]
    pub name: String,
    /// Human-readable description of what the test validates.
    #[allow(dead_code)]
    pub description: String,
    /// Engine that solves the case.
    pub engine: Engine,
    /// Nodes to place on the metre grid.
    pub nodes: Vec<NodeSpec>,
    /// Two-way roads; the position in this list is the edge id.
    pub roads: Vec<RoadSpec>,
    /// Request parameters.
    pub request: RequestSpec,
    /// Expected results for validation.
    pub expected: ExpectedResult,
}

/// Search engine selector.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    /// [`CasSearch`].
    Cas,
    /// [`BacktrackSearch`].
    Backtrack,
}

/// Node entry from JSON.
#[derive(Debug, Deserialize, Clone)]
pub struct NodeSpec {
    /// Node identifier.
    pub id: NodeId,
    /// Metres east of the grid origin.
    pub east: f64,
    /// Metres north of the grid origin.
    pub north: f64,
}

/// Road entry from JSON.
#[derive(Debug, Deserialize, Clone)]
pub struct RoadSpec {
    /// One end of the road.
    pub a: NodeId,
    /// The other end of the road.
    pub b: NodeId,
    /// Raw desirability.
    pub priority: f64,
}

/// Request parameters from JSON.
#[derive(Debug, Deserialize, Clone)]
pub struct RequestSpec {
    /// Start node.
    pub start: NodeId,
    /// End node.
    pub end: NodeId,
    /// Search parameters; omitted fields take their defaults.
    #[serde(default)]
    pub config: SearchConfig,
}

/// Expected result from JSON.
#[derive(Debug, Deserialize, Clone)]
pub struct ExpectedResult {
    /// Whether a scored route should be produced.
    pub found: bool,
    /// Edge ids of the path in traversal order.
    pub edge_ids: Vec<u64>,
    /// Minimum acceptable path score.
    pub min_score: f64,
    /// Maximum acceptable path score.
    pub max_score: f64,
}

/// Load a golden route from the data directory by name (without extension).
///
/// # Panics
///
/// Panics if the file cannot be read or parsed.
#[must_use]
pub fn load_golden_route(name: &str) -> GoldenRoute {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden_routes/data")
        .join(format!("{name}.json"));
    let content = fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "failed to read golden route file at {}: {}",
            path.display(),
            e
        )
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        panic!(
            "failed to parse golden route JSON at {}: {}",
            path.display(),
            e
        )
    })
}

/// Build the in-memory graph described by a golden route.
#[must_use]
pub fn build_graph(golden: &GoldenRoute) -> MemoryGraph {
    let mut graph = MemoryGraph::new();
    for node in &golden.nodes {
        graph.add_node(node.id, node.east, node.north);
    }
    for road in &golden.roads {
        graph.add_road(road.a, road.b, road.priority);
    }
    graph
}

/// Solve a golden route with its configured engine.
///
/// # Errors
///
/// Propagates the engine's [`SearchError`].
pub fn solve(golden: &GoldenRoute) -> Result<SearchResponse, SearchError> {
    let graph = build_graph(golden);
    let config = golden.request.config.clone();
    let (start, end) = (golden.request.start, golden.request.end);
    match golden.engine {
        Engine::Cas => CasSearch::new(&graph, &graph, config).calc_path(start, end),
        Engine::Backtrack => BacktrackSearch::new(&graph, &graph, config).calc_path(start, end),
    }
}

/// Tolerance for score comparisons.
pub const SCORE_TOLERANCE: f64 = 1e-9;
