//! Facade crate for the veloroute bike-route search engines.
//!
//! This crate re-exports the core domain types and exposes the iterated local
//! search engines behind a feature flag.

#![forbid(unsafe_code)]

pub use veloroute_core::{
    Arc, BudgetMode, ConfigError, Diagnostics, Edge, EdgeId, EdgeSet, Ellipse, Iteration,
    IterationTracker, NodeId, Path, PathEdge, RoadGraph, Route, RouteError, RouteSearch,
    ScoreWeighting, SearchConfig, SearchError, SearchResponse, Segment, ShortestPathOracle,
};

#[cfg(feature = "solver-ils")]
pub use veloroute_solver_ils::{BacktrackSearch, CasSearch};
