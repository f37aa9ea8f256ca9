#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
#![expect(clippy::float_arithmetic, reason = "score checks allow a rounding margin")]

//! Behavioural tests for the backtracking search using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use veloroute_core::test_support::MemoryGraph;
use veloroute_core::{NodeId, RouteSearch, SearchConfig, SearchResponse};
use veloroute_solver_ils::BacktrackSearch;

/// World state for backtracking scenarios.
#[derive(Debug)]
struct BacktrackWorld {
    graph: RefCell<Option<MemoryGraph>>,
    config: RefCell<SearchConfig>,
    response: RefCell<Option<SearchResponse>>,
}

impl BacktrackWorld {
    fn with_graph<T>(&self, read: impl FnOnce(&MemoryGraph) -> T) -> T {
        let borrowed = self.graph.borrow();
        read(borrowed.as_ref().expect("graph should be built"))
    }

    fn with_response<T>(&self, check: impl FnOnce(&SearchResponse) -> T) -> T {
        let borrowed = self.response.borrow();
        check(borrowed.as_ref().expect("search should have run"))
    }

    fn update_config(&self, change: impl FnOnce(SearchConfig) -> SearchConfig) {
        let updated = change(self.config.borrow().clone());
        self.config.replace(updated);
    }
}

#[fixture]
fn world() -> BacktrackWorld {
    BacktrackWorld {
        graph: RefCell::new(None),
        config: RefCell::new(SearchConfig::default().with_max_iterations(5)),
        response: RefCell::new(None),
    }
}

#[given("a line of {count} nodes {spacing} metres apart")]
fn given_line(world: &BacktrackWorld, count: u64, spacing: f64) {
    world.graph.replace(Some(MemoryGraph::line(count, spacing)));
}

#[given("a diamond with a scored detour over node 3")]
fn given_diamond(world: &BacktrackWorld) {
    let mut graph = MemoryGraph::new();
    graph.add_node(0, 0.0, 0.0);
    graph.add_node(1, 10.0, 0.0);
    graph.add_node(2, 20.0, 0.0);
    graph.add_node(3, 10.0, 10.0);
    graph.add_road(0, 1, 0.0);
    graph.add_road(1, 2, 0.0);
    graph.add_road(0, 3, 1.0);
    graph.add_road(3, 2, 1.0);
    world.graph.replace(Some(graph));
}

#[given("the road from node {a} to node {b} scores {priority}")]
fn given_priority(world: &BacktrackWorld, a: NodeId, b: NodeId, priority: f64) {
    let mut borrowed = world.graph.borrow_mut();
    let graph = borrowed.as_mut().expect("graph should be built");
    let id = graph.road_between(a, b).expect("road should exist");
    graph.set_priority(id, priority);
}

#[given("a budget of {budget} metres")]
fn given_budget(world: &BacktrackWorld, budget: f64) {
    world.update_config(|config| config.with_max_cost(budget));
}

#[given("a depth cap of {depth}")]
fn given_depth(world: &BacktrackWorld, depth: usize) {
    world.update_config(|config| config.with_max_depth(depth));
}

#[given("a minimum length of {length} metres")]
fn given_min_length(world: &BacktrackWorld, length: f64) {
    world.update_config(|config| config.with_min_cost(length));
}

#[when("the backtracking search runs from node {start} to node {end}")]
fn when_search_runs(world: &BacktrackWorld, start: NodeId, end: NodeId) {
    let config = world.config.borrow().clone();
    let response = world.with_graph(|graph| {
        BacktrackSearch::new(graph, graph, config)
            .calc_path(start, end)
            .expect("search should succeed")
    });
    world.response.replace(Some(response));
}

#[then("a scored route is reported")]
fn then_found(world: &BacktrackWorld) {
    world.with_response(|response| assert!(response.path.found));
}

#[then("no scored route is reported")]
fn then_not_found(world: &BacktrackWorld) {
    world.with_response(|response| assert!(!response.path.found));
}

#[then("the path score is {score}")]
fn then_score(world: &BacktrackWorld, score: f64) {
    world.with_response(|response| {
        assert!(
            (response.path.score - score).abs() < 1e-9,
            "path score {} differs from {score}",
            response.path.score
        );
    });
}

#[then("the path has {count} edges")]
fn then_edge_count(world: &BacktrackWorld, count: usize) {
    world.with_response(|response| assert_eq!(response.path.edges.len(), count));
}

#[then("the path runs from node {start} through node {via} to node {end}")]
fn then_runs_via(world: &BacktrackWorld, start: NodeId, via: NodeId, end: NodeId) {
    let roads: Vec<_> = world.with_graph(|graph| {
        [(start, via), (via, end)]
            .into_iter()
            .map(|(a, b)| graph.road_between(a, b).expect("road should exist"))
            .collect()
    });
    world.with_response(|response| {
        let edges: Vec<_> = response.path.edge_ids().collect();
        assert_eq!(edges, roads);
    });
}

#[scenario(path = "tests/features/backtrack_search.feature", index = 0)]
fn line_walk(world: BacktrackWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/backtrack_search.feature", index = 1)]
fn scored_detour(world: BacktrackWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/backtrack_search.feature", index = 2)]
fn depth_cap(world: BacktrackWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/backtrack_search.feature", index = 3)]
fn minimum_length(world: BacktrackWorld) {
    let _ = world;
}
