//! Error types shared by the route model and the search engines.

use thiserror::Error;

use crate::{EdgeId, NodeId};

/// Errors from [`Route`](crate::Route) edits.
///
/// `SegmentNotFound` signals an invariant violation: edits are only issued
/// after feasibility has been established, so an unreachable blank segment
/// means the graph or the segment bookkeeping is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// An insertion index was outside `0..=len`.
    #[error("index {index} out of bounds for route of length {len}")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of arcs in the route.
        len: usize,
    },
    /// The arc is not part of the route.
    #[error("arc {edge_id} is not in route")]
    ArcNotInRoute {
        /// Edge id of the missing arc.
        edge_id: EdgeId,
    },
    /// The oracle could not connect two nodes with a blank segment.
    #[error("no blank segment from node {from} to node {to}")]
    SegmentNotFound {
        /// Segment start node.
        from: NodeId,
        /// Segment end node.
        to: NodeId,
    },
}

/// Errors from [`SearchConfig::validate`](crate::SearchConfig::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The maximum route cost was not a positive finite number.
    #[error("maximum cost must be positive and finite, got {0}")]
    InvalidMaxCost(f64),
    /// The minimum route cost was negative, non-finite or above the maximum.
    #[error("minimum cost must lie within 0..=max_cost, got {0}")]
    InvalidMinCost(f64),
    /// No iterations were requested.
    #[error("at least one iteration is required")]
    ZeroIterations,
    /// The backtracking depth cap was zero.
    #[error("maximum search depth must be at least 1")]
    ZeroDepth,
    /// A road threshold was negative or non-finite.
    #[error("road thresholds must be non-negative and finite, got {0}")]
    InvalidThreshold(f64),
    /// A budget percentage fell outside `(0, 1]`.
    #[error("budget percentage must lie within (0, 1], got {0}")]
    InvalidPercentage(f64),
}

/// Errors returned by [`RouteSearch::calc_path`](crate::RouteSearch::calc_path).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Search parameters were invalid.
    #[error("invalid search configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// A requested endpoint has no coordinate in the graph.
    #[error("node {node} is not in the graph")]
    UnknownNode {
        /// The unknown node.
        node: NodeId,
    },
    /// A route edit broke an invariant and the run was aborted.
    #[error(transparent)]
    Route(#[from] RouteError),
}
