//! The search engine abstraction.

use std::time::Duration;

use crate::{Iteration, NodeId, Path, SearchError};

/// Counters describing one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall time spent in the run.
    pub solve_time: Duration,
    /// Number of full candidate-arc-set computations performed.
    pub cas_computations: u64,
    /// Iterations that replaced part of the route.
    pub improvements: u64,
}

/// Result of a completed search run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResponse {
    /// The final path.
    pub path: Path,
    /// One entry per main-loop iteration, in order.
    pub iterations: Vec<Iteration>,
    /// Run counters.
    pub diagnostics: Diagnostics,
}

impl SearchResponse {
    /// Scores and elapsed times of every iteration.
    pub fn iteration_info(&self) -> &[Iteration] {
        &self.iterations
    }
}

/// Find a high-scoring path between two nodes within a length budget.
///
/// Implementations are deterministic: the same graph, parameters and seed
/// produce the same iteration scores and the same path. Infeasible requests
/// degrade to the plain shortest path with [`Path::found`] unset rather than
/// failing.
///
/// # Examples
///
/// ```rust
/// use veloroute_core::{Diagnostics, NodeId, Path, RouteSearch, SearchError, SearchResponse};
///
/// struct Stay;
///
/// impl RouteSearch for Stay {
///     fn calc_path(&self, start: NodeId, end: NodeId) -> Result<SearchResponse, SearchError> {
///         if start != end {
///             return Err(SearchError::UnknownNode { node: end });
///         }
///         Ok(SearchResponse {
///             path: Path::new(start, end, Vec::new(), false),
///             iterations: Vec::new(),
///             diagnostics: Diagnostics::default(),
///         })
///     }
/// }
///
/// let response = Stay.calc_path(4, 4).expect("same node");
/// assert!(response.iteration_info().is_empty());
/// assert!(Stay.calc_path(4, 5).is_err());
/// ```
pub trait RouteSearch {
    /// Search for a path from `start` to `end`.
    fn calc_path(&self, start: NodeId, end: NodeId) -> Result<SearchResponse, SearchError>;
}
