//! Core domain types for the veloroute search engines.
//!
//! The crate models the budget-constrained score-maximising path problem:
//! every road has a length and a desirability score, and a route from a
//! start to an end node should collect as much score as possible without
//! exceeding a length budget. It provides the collaborator seams the engines
//! consume ([`RoadGraph`] and [`ShortestPathOracle`]), the [`Route`] and
//! [`Arc`] data model with its cost bookkeeping, the [`Ellipse`] pruning
//! region, and the [`RouteSearch`] result surface.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod arc;
pub mod config;
pub mod ellipse;
pub mod error;
pub mod graph;
pub mod iteration;
pub mod oracle;
pub mod path;
pub mod route;
pub mod search;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
pub mod weighting;

pub use arc::{Arc, FAKE_ARC_ID};
pub use config::{BudgetMode, SearchConfig};
pub use ellipse::Ellipse;
pub use error::{ConfigError, RouteError, SearchError};
pub use graph::{Edge, EdgeId, NodeId, RoadGraph};
pub use iteration::{Iteration, IterationTracker};
pub use oracle::{EdgeSet, Segment, ShortestPathOracle};
pub use path::{Path, PathEdge};
pub use route::Route;
pub use search::{Diagnostics, RouteSearch, SearchResponse};
pub use weighting::ScoreWeighting;
