//! Property-based tests for the route model and the pruning ellipse.
//!
//! # Invariants tested
//!
//! - **Cost bookkeeping:** route cost equals arc costs plus segment lengths
//!   after every edit.
//! - **Score bookkeeping:** route score equals the summed arc scores.
//! - **Segment shape:** a route of `n` arcs holds `n + 1` blank segments.
//! - **Budget respect:** greedy insertion and gap replacement never exceed
//!   the budget.
//! - **Ellipse symmetry:** swapping the foci never changes containment.

use proptest::prelude::*;
use veloroute_core::test_support::{MemoryGraph, grid_coord};
use veloroute_core::{Arc, Ellipse, RoadGraph, Route, ScoreWeighting};

const COLS: u64 = 4;

/// An edit applied to a route under test.
#[derive(Debug, Clone)]
enum Edit {
    Insert { node: u64, pick: usize, score: f64 },
    Add { index: usize, node: u64, pick: usize, score: f64 },
    Replace { target: usize, node: u64, pick: usize, score: f64 },
    Remove { pick: usize },
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    let arc_choice = || (0..COLS * COLS, 0_usize..4, 0.0_f64..5.0);
    prop_oneof![
        3 => arc_choice().prop_map(|(node, pick, score)| Edit::Insert { node, pick, score }),
        2 => (0_usize..8, arc_choice())
            .prop_map(|(index, (node, pick, score))| Edit::Add { index, node, pick, score }),
        2 => (0_usize..8, arc_choice())
            .prop_map(|(target, (node, pick, score))| Edit::Replace { target, node, pick, score }),
        1 => (0_usize..8).prop_map(|pick| Edit::Remove { pick }),
    ]
}

fn nth_arc(graph: &MemoryGraph, node: u64, pick: usize, score: f64) -> Option<Arc> {
    let edges: Vec<_> = graph.edges_from(node).collect();
    let edge = edges.get(pick % edges.len().max(1))?;
    let mut arc = Arc::from_edge(edge, &ScoreWeighting::Raw);
    arc.score = score;
    Some(arc)
}

fn check_bookkeeping(route: &Route) -> Result<(), TestCaseError> {
    let arcs: f64 = route.arcs().iter().map(|arc| arc.cost).sum();
    let segments: f64 = route.segments().iter().map(|s| s.distance).sum();
    let score: f64 = route.arcs().iter().map(|arc| arc.score).sum();
    prop_assert!((route.cost() - arcs - segments).abs() < 1e-6);
    prop_assert!((route.score() - score).abs() < 1e-9);
    let expected_segments = if route.is_empty() { 0 } else { route.len() + 1 };
    prop_assert_eq!(route.segments().len(), expected_segments);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: any sequence of greedy insertions, indexed insertions that
    /// fit the budget, arc replacements and successful removals keeps the
    /// totals consistent with the parts and within budget.
    ///
    /// A replacement spans the arc's gap under the remaining budget plus the
    /// arc's own length, as the search loop builds it.
    #[test]
    fn edits_preserve_bookkeeping(
        edits in proptest::collection::vec(edit_strategy(), 1..24),
        budget in 60.0_f64..200.0,
    ) {
        let graph = MemoryGraph::grid(COLS, COLS, 10.0);
        let mut route = Route::new(0, COLS * COLS - 1, budget);

        for edit in edits {
            match edit {
                Edit::Insert { node, pick, score } => {
                    if let Some(arc) = nth_arc(&graph, node, pick, score) {
                        route.insert_arc_at_min_path_segment(&arc, &graph);
                    }
                }
                Edit::Add { index, node, pick, score } => {
                    if let Some(arc) = nth_arc(&graph, node, pick, score) {
                        let mut trial = route.clone();
                        let at = index % (route.len() + 1);
                        if trial.add_arc(at, arc, &graph).is_ok() && trial.cost() <= budget {
                            route = trial;
                        }
                    }
                }
                Edit::Replace { target, node, pick, score } => {
                    let target = target % route.len().max(1);
                    let replacement = nth_arc(&graph, node, pick, score);
                    if let (Some(arc), Some((prev, next)), Some(replacement)) =
                        (route.arcs().get(target).cloned(), route.neighbours(target), replacement)
                    {
                        let mut sub = Route::new(prev, next, route.remaining_budget() + arc.cost);
                        if sub.insert_arc_at_min_path_segment(&replacement, &graph) {
                            let mut trial = route.clone();
                            let inserted = sub.len();
                            if trial.replace_arc(&arc, sub, &graph).is_ok() {
                                prop_assert_eq!(trial.len(), route.len() - 1 + inserted);
                                route = trial;
                            }
                        }
                    }
                }
                Edit::Remove { pick } => {
                    if let Some(arc) = route.arcs().get(pick % route.len().max(1)).cloned() {
                        let mut trial = route.clone();
                        if trial.remove_arc(&arc, &graph).is_ok() {
                            prop_assert!(!trial.contains(&arc));
                            route = trial;
                        }
                    }
                }
            }
            check_bookkeeping(&route)?;
            prop_assert!(route.cost() <= budget + 1e-9);
        }
    }

    /// Property: containment does not depend on focus order.
    #[test]
    fn ellipse_containment_is_symmetric(
        f1 in (-500.0_f64..500.0, -500.0_f64..500.0),
        f2 in (-500.0_f64..500.0, -500.0_f64..500.0),
        point in (-800.0_f64..800.0, -800.0_f64..800.0),
        radius in 0.0_f64..2_000.0,
    ) {
        let (a, b) = (grid_coord(f1.0, f1.1), grid_coord(f2.0, f2.1));
        let p = grid_coord(point.0, point.1);
        prop_assert_eq!(
            Ellipse::new(a, b, radius).contains_coord(p),
            Ellipse::new(b, a, radius).contains_coord(p)
        );
    }
}
